use thiserror::Error;

/// Centralized error types for the application
///
/// Startup and transport failures end up here. The navigator itself never
/// fails: unknown actions are an ordinary reply.
#[derive(Error, Debug)]
pub enum AppError {
    /// Neither BOT_TOKEN nor TELOXIDE_TOKEN is set
    #[error("BOT_TOKEN environment variable not set")]
    MissingToken,

    /// A mode was requested without the settings it needs
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AppError::MissingToken.to_string(), "BOT_TOKEN environment variable not set");
        assert_eq!(
            AppError::Config("WEBHOOK_URL is not set".to_string()).to_string(),
            "Configuration error: WEBHOOK_URL is not set"
        );
    }

    #[test]
    fn test_url_error_converts() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, AppError::Url(_)));
        assert!(err.to_string().starts_with("URL parsing error"));
    }
}
