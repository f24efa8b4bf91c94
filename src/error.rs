use crate::breakpoint::Breakpoint;

pub type Result<T, E = BreakpointError> = std::result::Result<T, E>;

/// Errors raised while building breakpoint configuration or parsing
/// predicate queries. Subscribing, dispatching and reading never fail.
#[derive(Debug, thiserror::Error)]
pub enum BreakpointError {
    #[error("the `sm` threshold must be above 0px")]
    ZeroThreshold,

    #[error("`{upper}` ({upper_px}px) must be wider than `{lower}` ({lower_px}px)")]
    NotIncreasing {
        lower: Breakpoint,
        upper: Breakpoint,
        lower_px: u32,
        upper_px: u32,
    },

    #[error("invalid media query `{0}`")]
    InvalidQuery(String),

    #[cfg(feature = "serde")]
    #[error("invalid breakpoint configuration: {0}")]
    Config(#[from] serde_json::Error),
}
