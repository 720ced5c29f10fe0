//! The single "current search" slot shared by a frontend and its renderer.
//!
//! Every search goes `Idle -> InFlight -> {Success | Empty | Failed}`. Each
//! [`Session::begin`] issues a fresh [`Ticket`]; a completion is applied only
//! when its ticket is still the latest one, so an overlapping older search can
//! never overwrite a newer one.

use anyhow::Result;
use std::fmt::Write;
use tracing::debug;

use crate::{
    config::Config,
    error::SearchError,
    openlibrary::{SearchClient, Transport},
    traits::DisplayTerminal,
    types::{query::Query, result_set::ResultSet, search_field::SearchFieldTag},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    InFlight {
        ticket: Ticket,
        query:  Query,
    },
    Success(ResultSet),
    Empty,
    Failed(SearchError),
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Empty | Self::Failed(_))
    }
}

#[derive(Default, Debug)]
pub struct Session {
    issued: u64,
    state:  SearchState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::InFlight { .. })
    }

    /// The user-facing message for the current state, if it is an error.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            SearchState::Empty => Some(SearchError::NoResults.message()),
            SearchState::Failed(e) => Some(e.message()),
            _ => None,
        }
    }

    /// Starts a new search, superseding any one still in flight.
    pub fn begin(&mut self, query: Query) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.state = SearchState::InFlight { ticket, query };
        ticket
    }

    /// Applies `outcome` if `ticket` belongs to the search in flight.
    /// Returns whether the outcome was applied.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<ResultSet, SearchError>) -> bool {
        match self.state {
            SearchState::InFlight { ticket: current, .. } if current == ticket => {}
            _ => {
                debug!("Discarding stale result for search {}", ticket.0);
                return false;
            }
        }
        self.state = match outcome {
            Ok(results) => SearchState::Success(results),
            Err(SearchError::NoResults) => SearchState::Empty,
            Err(e) => SearchState::Failed(e),
        };
        true
    }

    /// Runs one search through the slot from start to finish. `field`
    /// overrides classification when set.
    pub async fn run<T: Transport>(
        &mut self,
        client: &SearchClient<T>,
        query: Query,
        field: Option<SearchFieldTag>,
    ) -> &SearchState {
        let ticket = self.begin(query.clone());
        let outcome = match field {
            Some(field) => client.search_with_field(query.as_str(), field).await,
            None => client.search(query.as_str()).await,
        };
        self.complete(ticket, outcome);
        &self.state
    }
}

impl DisplayTerminal for SearchState {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        match self {
            SearchState::Idle => {}
            SearchState::InFlight { query, .. } => write!(f, "Searching for {query}...")?,
            SearchState::Success(results) => DisplayTerminal::fmt(results, f, config)?,
            SearchState::Empty => write!(
                f,
                "{}",
                config.output_empty.format_str(SearchError::NoResults.message())
            )?,
            SearchState::Failed(e) => write!(f, "{}", config.output_error.format_str(e.message()))?,
        }
        Ok(())
    }
}
