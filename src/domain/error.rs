//! Domain error types.
//!
//! Every failure inside the engines propagates as a [`MomtraderError`];
//! nothing is silently defaulted. Degenerate ratio denominators are not
//! errors — see the sentinel policy documented on
//! [`Metrics::compute`](crate::domain::metrics::Metrics::compute).

/// Top-level error type for momtrader.
#[derive(Debug, thiserror::Error)]
pub enum MomtraderError {
    #[error("insufficient data: have {have} {what}, need {need}")]
    InsufficientData {
        what: &'static str,
        have: usize,
        need: usize,
    },

    #[error("empty return series: metrics require at least one period")]
    EmptySeries,

    #[error("invalid price table: {reason}")]
    InvalidTable { reason: String },

    #[error("non-finite {what} at {date}")]
    NonFinite {
        what: &'static str,
        date: chrono::NaiveDate,
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

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MomtraderError> for std::process::ExitCode {
    fn from(err: &MomtraderError) -> Self {
        let code: u8 = match err {
            MomtraderError::Io(_) => 1,
            MomtraderError::ConfigParse { .. }
            | MomtraderError::ConfigMissing { .. }
            | MomtraderError::ConfigInvalid { .. } => 2,
            MomtraderError::DataSource { .. } | MomtraderError::InvalidTable { .. } => 3,
            MomtraderError::InsufficientData { .. } | MomtraderError::EmptySeries => 4,
            MomtraderError::NonFinite { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
