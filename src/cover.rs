use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::config::Config;

pub const DEFAULT_COVER_HOST: &str = "covers.openlibrary.org";
pub const DEFAULT_PLACEHOLDER: &str = "https://via.placeholder.com/150x200?text=No+Cover";

/// Cover image sizes served by the covers endpoint.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    S,
    #[default]
    M,
    L,
}

impl Display for CoverSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CoverSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            _ => Err(anyhow!("Cover size must be one of S, M, L, got {s}")),
        }
    }
}

pub fn cover_url(host: &str, cover_id: i64, size: CoverSize) -> String {
    format!("https://{host}/b/id/{cover_id}-{size}.jpg")
}

/// What a view should show in a record's cover slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum CoverRef {
    Image(String),
    Placeholder(String),
}

impl CoverRef {
    /// Ids of zero or below are not real covers and get the placeholder.
    pub fn resolve(cover_id: Option<i64>, config: &Config) -> Self {
        match cover_id {
            Some(id) if id > 0 => Self::Image(cover_url(&config.cover_host, id, config.cover_size)),
            _ => Self::Placeholder(config.placeholder_cover.clone()),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Image(url) | Self::Placeholder(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}
