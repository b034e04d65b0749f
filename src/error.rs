use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Only construction and explicit driver calls can fail. Numerical trouble
/// inside `step()` (coincident particles, runaway velocities) is never an
/// error: it is skipped by the force model or handled by the boundary policy.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid runtime argument from the driver (e.g. a non-finite position).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Particle index does not exist in the collection.
    #[error("particle index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
