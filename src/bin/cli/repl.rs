use std::path::{Path, PathBuf};

use anyhow::Result;
use reedline::{
    ColumnarMenu, DefaultCompleter, Emacs, ExampleHighlighter, FileBackedHistory, KeyCode,
    KeyModifiers, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};

use bookfinder::session::SearchState;

use crate::prompt::BookfinderPrompt;

const HISTORY_SIZE: usize = 1000;

pub struct Repl {
    reedline: Reedline,
    prompt:   BookfinderPrompt,
}

fn history_path(configured: &str) -> Result<PathBuf> {
    let path = shellexpand::path::tilde(Path::new(configured)).into_owned();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(path)
}

impl Repl {
    pub fn new(commands: Vec<String>, history_file: &str) -> Result<Self> {
        let history = Box::new(FileBackedHistory::with_file(
            HISTORY_SIZE,
            history_path(history_file)?,
        )?);

        let completer = Box::new(DefaultCompleter::new_with_wordlen(commands.clone(), 1));

        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = reedline::default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let edit_mode = Box::new(Emacs::new(keybindings));

        let line_editor = Reedline::create()
            .with_history(history)
            .with_highlighter(Box::new(ExampleHighlighter::new(commands)))
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode);

        Ok(Repl {
            reedline: line_editor,
            prompt:   BookfinderPrompt::default(),
        })
    }

    /// Reads one line, with `last` summarized on the right of the prompt.
    pub fn read_line(&mut self, last: &SearchState) -> Result<Signal> {
        self.prompt = BookfinderPrompt::from_state(last);
        Ok(self.reedline.read_line(&self.prompt)?)
    }
}
