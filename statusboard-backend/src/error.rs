///! Per-location failure taxonomy
///!
///! None of these ever escape the aggregator: each one is folded into a
///! `LocationStatus` or `AggregatedServiceStatus` carrying `unknown` and a
///! diagnostic string.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// A requested service id has no registry entry. The id is kept for
    /// logging; the display text is the fixed phrase shown on the card.
    #[error("Service configuration not found")]
    ConfigurationMissing(String),

    /// HTTP error status, transport failure, or unreadable badge document
    #[error("{0}")]
    FetchFailure(String),

    /// Badge `message` does not match the expected numeric pattern
    #[error("Unparseable {what} badge message: {message:?}")]
    ParseFailure { what: &'static str, message: String },
}

impl StatusError {
    pub fn fetch(reason: impl Into<String>) -> Self {
        StatusError::FetchFailure(reason.into())
    }

    pub fn parse(what: &'static str, message: impl Into<String>) -> Self {
        StatusError::ParseFailure {
            what,
            message: message.into(),
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, StatusError::FetchFailure(_))
    }
}

pub type StatusResult<T> = std::result::Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StatusError::fetch("Unable to fetch data (HTTP 404)").to_string(),
            "Unable to fetch data (HTTP 404)"
        );
        assert_eq!(
            StatusError::parse("uptime", "abc").to_string(),
            "Unparseable uptime badge message: \"abc\""
        );
        assert_eq!(
            StatusError::ConfigurationMissing("Foo".into()).to_string(),
            "Service configuration not found"
        );
    }
}
