//! Domain error types.

/// Top-level error type for blotter.
///
/// Lookup misses are not errors: `by_id` returns `Option` because a trade
/// "may be missing" the same way an optional field may be absent.
#[derive(Debug, thiserror::Error)]
pub enum BlotterError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid buy/sell indicator: {value:?} (expected BUY or SELL)")]
    InvalidSide { value: String },

    #[error("invalid sort order: {value:?} (expected asc or desc)")]
    InvalidOrder { value: String },

    #[error("unknown sort field: {field}")]
    InvalidSortField { field: String },

    #[error("invalid pagination: page={page} limit={limit} (both must be >= 1)")]
    InvalidPagination { page: usize, limit: usize },

    #[error("storage error: {reason}")]
    Storage { reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BlotterError> for std::process::ExitCode {
    fn from(err: &BlotterError) -> Self {
        let code: u8 = match err {
            BlotterError::Io(_) => 1,
            BlotterError::ConfigParse { .. }
            | BlotterError::ConfigMissing { .. }
            | BlotterError::ConfigInvalid { .. } => 2,
            BlotterError::Storage { .. } => 3,
            BlotterError::MissingField { .. }
            | BlotterError::InvalidSide { .. }
            | BlotterError::InvalidOrder { .. } => 4,
            BlotterError::InvalidSortField { .. } | BlotterError::InvalidPagination { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
