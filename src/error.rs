use thiserror::Error;

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const TRANSIENT_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why a search produced no result set. The message is user facing; causes
/// of transient failures are logged, never carried here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("No results found.")]
    NoResults,
    #[error("Something went wrong. Please try again.")]
    Transient,
}

impl SearchError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoResults => NO_RESULTS_MESSAGE,
            Self::Transient => TRANSIENT_MESSAGE,
        }
    }
}
