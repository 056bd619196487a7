// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Telos Kernel failures.
#[derive(Error, Debug)]
pub enum TelosError {
    /// A state vector component is NaN or Inf.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A call parameter violates its contract (non-positive duration,
    /// step size, or generation count; coupling or weight outside [0, 1]).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Blend weights are negative or do not sum to one.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// Self-referential harmony is undefined for the given baseline.
    #[error("undefined harmony: {0}")]
    UndefinedHarmony(String),

    /// Configuration or reference-frame validation failed.
    #[error("config error: {0}")]
    Config(String),
}

pub type TelosResult<T> = Result<T, TelosError>;
