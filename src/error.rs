use thiserror::Error;

/// Errors raised while building or reshaping a simulation.
///
/// Per-tick operations never fail; only construction-time inputs are checked.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid world dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
