//! Error types for the multilog facade

pub type Result<T> = std::result::Result<T, MultilogError>;

#[derive(Debug, thiserror::Error)]
pub enum MultilogError {
    /// A severity token that is neither a canonical level nor a known alias
    #[error("unknown log level: '{0}'")]
    UnknownLevel(String),

    /// Context mutation referenced keys that are not present
    #[error("keys not found in context: {}", .0.join(", "))]
    ContextKeys(Vec<String>),

    /// A sink failed to deliver a payload; wraps the underlying cause
    #[error("sink '{sink}' failed: {source}")]
    Sink {
        sink: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid or incomplete configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[cfg(feature = "betterstack")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl MultilogError {
    /// Create a sink error wrapping the underlying cause
    pub fn sink(
        sink: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        MultilogError::Sink {
            sink,
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        MultilogError::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_display() {
        let err = MultilogError::UnknownLevel("verbose".to_string());
        assert_eq!(err.to_string(), "unknown log level: 'verbose'");
    }

    #[test]
    fn test_context_keys_lists_every_missing_key() {
        let err = MultilogError::ContextKeys(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "keys not found in context: a, b");
    }

    #[test]
    fn test_sink_error_wraps_cause() {
        let cause = std::io::Error::other("disk full");
        let err = MultilogError::sink("file", cause);
        assert!(matches!(err, MultilogError::Sink { sink: "file", .. }));
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err = MultilogError::config("BETTERSTACK_TOKEN is missing");
        assert_eq!(
            err.to_string(),
            "invalid configuration: BETTERSTACK_TOKEN is missing"
        );
    }
}
