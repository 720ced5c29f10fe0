use anyhow::{anyhow, Result};
use tracing::Level;

pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for exported results.
pub fn init(level: &str) -> Result<()> {
    let parsed = parse_level(level);
    tracing_subscriber::fmt()
        .with_max_level(parsed.unwrap_or(Level::INFO))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    if parsed.is_none() {
        tracing::warn!("Unknown log level {level:?}, using INFO");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(Level::WARN));
        assert_eq!(parse_level("verbose"), None);
    }
}
