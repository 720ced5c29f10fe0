use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use bookfinder::session::SearchState;

/// Line prompt whose right side reports how the last search ended.
#[derive(Default, Debug)]
pub struct BookfinderPrompt {
    last_search: String,
}

impl BookfinderPrompt {
    pub fn from_state(state: &SearchState) -> Self {
        let last_search = match state {
            SearchState::Idle => String::new(),
            SearchState::InFlight { query, .. } => format!("searching {query}"),
            SearchState::Success(results) => match results.len() {
                1 => format!("{}: 1 book", results.field()),
                n => format!("{}: {n} books", results.field()),
            },
            SearchState::Empty => "no results".into(),
            SearchState::Failed(_) => "search failed".into(),
        };
        Self { last_search }
    }
}

impl Prompt for BookfinderPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("Bookfinder ")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed(&self.last_search)
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        match prompt_mode {
            PromptEditMode::Custom(mode) => format!("({mode}) ").into(),
            _ => "> ".into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed(":> ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        format!("({prefix}search: {}) ", history_search.term).into()
    }
}
