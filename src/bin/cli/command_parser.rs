use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use bookfinder::types::query::Query;

fn query_arg() -> Arg {
    Arg::new("query")
        .help("Book title, author, or genre")
        .num_args(1..)
        .action(ArgAction::Append)
}

pub fn arg_parser() -> Command {
    Command::new("bookfinder")
        .about("Find books in the Open Library catalog")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search by title, author, or subject (guessed from the query)")
                .arg(
                    Arg::new("field")
                        .long("field")
                        .short('f')
                        .help("Search this field instead of guessing")
                        .value_parser(["title", "author", "subject"]),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('o')
                        .value_parser(["text", "json", "csv"])
                        .default_value("text"),
                )
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("classify")
                .about("Show which field a query would be searched by")
                .arg(query_arg()),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser()
        .subcommand(Command::new("repl").about("Launch a read eval print loop"))
        .subcommand(
            Command::new("serve").about("Serve searches over HTTP").arg(
                Arg::new("port")
                    .long("port")
                    .short('p')
                    .value_parser(value_parser!(u16)),
            ),
        )
}

pub fn arg_parser_repl() -> Command {
    arg_parser().subcommand(Command::new("exit").about("Leave the REPL"))
}

/// Query words joined back together, `None` when none were given.
pub fn query_from(matches: &ArgMatches) -> Option<Query> {
    let words = matches
        .get_many::<String>("query")?
        .map(String::as_str)
        .collect::<Vec<_>>();
    Some(Query::new(words.join(" ")))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!("{parent_fn_name} {}", cmd.get_name())
            .trim()
            .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}
