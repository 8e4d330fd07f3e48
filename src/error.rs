//! Typed errors for rubric loading and analyzer adapters.
//! The scoring engine itself never fails; these only surface at load time
//! or inside adapters, where they are converted into fallback scores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("I/O error while reading rubric at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("rubric TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{section} `{name}` regex error: {source}")]
    Regex {
        section: &'static str,
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("rubric invariant violated: {0}")]
    Invariant(String),
}

impl RubricError {
    pub(crate) fn regex(section: &'static str, name: impl Into<String>, source: regex::Error) -> Self {
        Self::Regex {
            section,
            name: name.into(),
            source,
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("transport error while {context}: {message}")]
    Transport {
        context: &'static str,
        message: String,
    },
    #[error("{context}: unexpected HTTP status {status}")]
    Status { context: &'static str, status: u16 },
    #[error("malformed response while {context}: {message}")]
    Malformed {
        context: &'static str,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl AnalyzerError {
    pub(crate) fn transport(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
