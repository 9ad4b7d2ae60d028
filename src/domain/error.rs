//! Domain error types.

/// Top-level error type for quantkit.
#[derive(Debug, thiserror::Error)]
pub enum QuantkitError {
    #[error("insufficient data: have {actual} points, need {required}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid period: {period} (must be at least 1)")]
    InvalidPeriod { period: usize },

    #[error("{name} cannot be zero")]
    ZeroDenominator { name: &'static str },

    #[error("insufficient capital: order costs {required:.2}, have {available:.2}")]
    InsufficientCapital { required: f64, available: f64 },

    #[error("insufficient shares of {symbol}: tried to sell {requested}, hold {held}")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        held: u64,
    },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantkitError> for std::process::ExitCode {
    fn from(err: &QuantkitError) -> Self {
        let code: u8 = match err {
            QuantkitError::Io(_) => 1,
            QuantkitError::ConfigParse { .. }
            | QuantkitError::ConfigMissing { .. }
            | QuantkitError::ConfigInvalid { .. } => 2,
            QuantkitError::Data { .. } => 3,
            QuantkitError::InsufficientData { .. }
            | QuantkitError::InvalidPeriod { .. }
            | QuantkitError::ZeroDenominator { .. } => 4,
            QuantkitError::InsufficientCapital { .. }
            | QuantkitError::InsufficientShares { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
