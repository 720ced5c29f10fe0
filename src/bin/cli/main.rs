use std::{env, ffi::OsString, process::exit};

use anyhow::{bail, Result};
use clap::ArgMatches;
use dotenvy::dotenv;
use reedline::Signal;
use tracing::debug;

mod command_parser;
mod input;
mod prompt;
mod repl;
mod server;

use bookfinder::{
    classify::classify,
    config::Config,
    export::{self, Format},
    logging,
    openlibrary::SearchClient,
    session::{SearchState, Session},
    traits::DisplayTerminal,
    types::search_field::SearchFieldTag,
};

struct App {
    config:  Config,
    client:  SearchClient,
    session: Session,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = SearchClient::from_config(&config)?;
        Ok(Self {
            config,
            client,
            session: Session::new(),
        })
    }
}

fn print_state(state: &SearchState, format: Format, config: &Config) -> Result<()> {
    match (state, format) {
        (SearchState::Success(results), Format::Json) => println!("{}", export::to_json(results)?),
        (SearchState::Success(results), Format::Csv) => print!("{}", export::to_csv(results, config)?),
        (state, Format::Text) => println!("{}", state.fmt_to_string(config)?),
        (state, _) => eprintln!("{}", state.fmt_to_string(config)?),
    }
    Ok(())
}

/// Process exit code for a one-shot search that did not produce results.
fn failure_code(state: &SearchState) -> Option<i32> {
    match state {
        SearchState::Empty => Some(2),
        SearchState::Failed(_) => Some(1),
        _ => None,
    }
}

async fn search(matches: &ArgMatches, app: &mut App) -> Result<()> {
    let query = match command_parser::query_from(matches) {
        Some(query) => query,
        None => input::prompt_query()?,
    };
    if !query.is_submittable() {
        bail!("Enter a book title, author, or genre to search for");
    }
    let field = matches
        .get_one::<String>("field")
        .map(|s| s.parse::<SearchFieldTag>())
        .transpose()?;
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.parse::<Format>())
        .transpose()?
        .unwrap_or_default();
    let state = app.session.run(&app.client, query, field).await;
    print_state(state, format, &app.config)
}

async fn handle_command(matches: &ArgMatches, app: &mut App) -> Result<()> {
    match matches.subcommand() {
        Some(("search", matches)) => search(matches, app).await?,
        Some(("classify", matches)) => {
            let query = match command_parser::query_from(matches) {
                Some(query) => query,
                None => input::prompt_query()?,
            };
            println!("{}", classify(query.as_str()));
        }
        Some(("config", _matches)) => {
            print!("{}", Config::default_as_string()?);
        }
        Some(("exit", _matches)) => {
            exit(0);
        }
        Some((name, _matches)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

async fn handle_line(line: &str, app: &mut App) -> Result<()> {
    let Some(command) = shlex::split(line) else {
        bail!("Invalid command");
    };
    if command.is_empty() {
        return Ok(());
    }
    let matches = command_parser::arg_parser_repl().try_get_matches_from(command)?;
    handle_command(&matches, app).await
}

async fn run_repl(app: &mut App) -> Result<()> {
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        &app.config.history_file,
    )?;
    loop {
        match repl.read_line(app.session.state()) {
            Ok(Signal::Success(buffer)) => {
                if let Err(e) = handle_line(&buffer, app).await {
                    println!("Error: {}", e);
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            Ok(signal) => {
                debug!("Ignoring {:?}", signal);
            }
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenv();
    let config = Config::read_config()?;
    logging::init(&config.log_level)?;
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let args = env::args_os().skip(1).collect::<Vec<OsString>>();
    if args.is_empty() {
        command_parser::arg_parser_cli().print_help()?;
        return Ok(());
    }
    let args_parsed = command_parser::arg_parser_cli().get_matches_from(args);

    match args_parsed.subcommand() {
        Some(("serve", matches)) => {
            let port = matches
                .get_one::<u16>("port")
                .copied()
                .unwrap_or(config.server_port);
            server::start(config, port).await?;
        }
        Some(("repl", _)) => {
            let mut app = App::new(config)?;
            run_repl(&mut app).await?;
        }
        _ => {
            let mut app = App::new(config)?;
            handle_command(&args_parsed, &mut app).await?;
            if let Some(code) = failure_code(app.session.state()) {
                exit(code);
            }
        }
    }

    Ok(())
}
