use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    cover::{CoverSize, DEFAULT_COVER_HOST, DEFAULT_PLACEHOLDER},
    default_colors::*,
    openlibrary::DEFAULT_SEARCH_URL,
    types::result_set::MAX_RESULTS,
};

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "BOOKFINDER_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    fn head(&self) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        if self.description.is_empty() {
            return prefix;
        }
        let description = self.description.style(&self.style_description);
        format!("{prefix}{description} ")
    }

    pub fn format_str(&self, content: impl ToString) -> String {
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        format!("{}{content}{suffix}", self.head())
    }

    pub fn format_vec(&self, content: &[impl ToString]) -> String {
        let suffix = self.suffix.style(&self.style_suffix);
        let separator = self.separator.style(&self.style_separator);
        let mut s = self.head();
        let mut i = content.iter().peekable();
        while let Some(x) = i.next() {
            s.push_str(&x.to_string().style(&self.style_content));
            if i.peek().is_some() {
                s.push_str(&separator);
            }
        }
        s.push_str(&suffix);
        s
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            separator:         ", ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog; `/search.json` is appended.
    pub search_url:           String,
    pub cover_host:           String,
    pub cover_size:           CoverSize,
    pub placeholder_cover:    String,
    /// Records kept per search, never more than [`MAX_RESULTS`].
    pub limit:                usize,
    /// Enforced by the HTTP transport. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    pub history_file:         String,
    pub server_port:          u16,
    pub log_level:            String,
    pub output_title:         OutputConfig,
    pub output_author:        OutputConfig,
    pub output_year:          OutputConfig,
    pub output_cover:         OutputConfig,
    pub output_field:         OutputConfig,
    pub output_empty:         OutputConfig,
    pub output_error:         OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then `config.toml`, then `BOOKFINDER_*` environment variables.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url:           DEFAULT_SEARCH_URL.into(),
            cover_host:           DEFAULT_COVER_HOST.into(),
            cover_size:           CoverSize::default(),
            placeholder_cover:    DEFAULT_PLACEHOLDER.into(),
            limit:                MAX_RESULTS,
            request_timeout_secs: None,
            history_file:         "~/.local/share/bookfinder/history.txt".into(),
            server_port:          3000,
            log_level:            "INFO".into(),
            output_title:         OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_TITLE,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:        OutputConfig {
                description: "Written by:".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_year:          OutputConfig {
                description: "First published:".into(),
                style_content: StyleConfig {
                    color: COLOR_YEAR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_cover:         OutputConfig {
                description: "Cover:".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_field:         OutputConfig {
                prefix: "[".into(),
                suffix: "]".into(),
                description: "Searched by".into(),
                style_content: StyleConfig {
                    color: COLOR_FIELD,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_empty:         OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_EMPTY,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:         OutputConfig {
                description: "Error".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
