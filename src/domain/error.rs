//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for intrinsic.
#[derive(Debug, thiserror::Error)]
pub enum IntrinsicError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("missing or non-positive {field} for {ticker}")]
    MissingData { ticker: String, field: String },

    #[error(transparent)]
    UniverseParse(#[from] UniverseError),

    #[error("no tickers could be analyzed")]
    NoResults,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&IntrinsicError> for std::process::ExitCode {
    fn from(err: &IntrinsicError) -> Self {
        let code: u8 = match err {
            IntrinsicError::Io(_) | IntrinsicError::Csv(_) => 1,
            IntrinsicError::ConfigParse { .. }
            | IntrinsicError::ConfigMissing { .. }
            | IntrinsicError::ConfigInvalid { .. } => 2,
            IntrinsicError::DataSource { .. } => 3,
            IntrinsicError::UniverseParse(_) => 4,
            IntrinsicError::MissingData { .. } | IntrinsicError::NoResults => 5,
        };
        std::process::ExitCode::from(code)
    }
}
