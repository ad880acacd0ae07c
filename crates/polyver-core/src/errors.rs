use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all polyver parsing and comparison failures.
#[derive(Debug, Error, Diagnostic)]
pub enum VersionError {
    /// Malformed version string or constraint expression.
    #[error("{message}")]
    #[diagnostic(help("Check the input against the scheme's accepted grammar"))]
    Parsing {
        message: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// Versions from two different schemes were compared.
    #[error("cannot compare '{left}' ({left_scheme}) with '{right}' ({right_scheme})")]
    #[diagnostic(help("Parse both versions with the same scheme before comparing them"))]
    SchemeMismatch {
        left: String,
        left_scheme: String,
        right: String,
        right_scheme: String,
    },
}

impl VersionError {
    /// A parsing error carrying only a message.
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
            cause: None,
        }
    }

    /// A parsing error wrapping an underlying cause.
    pub fn parsing_with(
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parsing {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }
}

/// Convenience alias for results carrying a [`VersionError`].
pub type VersionResult<T> = Result<T, VersionError>;
