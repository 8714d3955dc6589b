//! Domain error types.

/// Top-level error type for dcatrader.
#[derive(Debug, thiserror::Error)]
pub enum DcaError {
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

    #[error("invest day must be in 1..=28, got {0}")]
    InvalidInvestDay(u32),

    #[error("trailing years must be in 1..=100, got {0}")]
    InvalidTrailingYears(u32),

    #[error("series length mismatch: {reason}")]
    SeriesLengthMismatch { reason: String },

    #[error("empty price series")]
    EmptySeries,

    #[error("invalid weights ({0}, {1}): must be non-negative and sum to 1.0")]
    InvalidWeights(f64, f64),

    #[error("unknown strategy: {key}. Available: {available}")]
    UnknownStrategy { key: String, available: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("data error: {reason}")]
    DataParse { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DcaError> for std::process::ExitCode {
    fn from(err: &DcaError) -> Self {
        let code: u8 = match err {
            DcaError::Io(_) => 1,
            DcaError::ConfigParse { .. }
            | DcaError::ConfigMissing { .. }
            | DcaError::ConfigInvalid { .. } => 2,
            DcaError::NoData { .. }
            | DcaError::InsufficientData { .. }
            | DcaError::DataParse { .. } => 3,
            DcaError::UnknownStrategy { .. } => 4,
            DcaError::InvalidInvestDay(_)
            | DcaError::InvalidTrailingYears(_)
            | DcaError::SeriesLengthMismatch { .. }
            | DcaError::EmptySeries
            | DcaError::InvalidWeights(..) => 5,
        };
        std::process::ExitCode::from(code)
    }
}
