use thiserror::Error;

/// Errors raised by the report pipeline.
///
/// One coarse variant per subsystem; the shell collapses all of them into
/// a single "Error Crítico" log line, so the payload is a human-readable
/// message rather than structured data.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Model error: {0}")]
    Model(String),

    /// The model response contained no `{...}` span to parse.
    #[error("IA no generó JSON válido.")]
    InvalidModelOutput,

    #[error("Render error: {0}")]
    Render(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::Search("timeout".to_string());
        assert_eq!(err.to_string(), "Search error: timeout");
    }

    #[test]
    fn test_invalid_model_output_message() {
        assert_eq!(SimError::InvalidModelOutput.to_string(), "IA no generó JSON válido.");
    }
}
