//! Typed errors for context loading and proving.

use g16_circom::{ArtifactError, WitnessError};

/// Errors from [`Context::load`](crate::Context::load). Loading is
/// all-or-nothing: any error means no context exists.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("inconsistent circuit: {0}")]
    Inconsistent(String),
}

/// Errors from proof construction.
#[derive(Debug, thiserror::Error)]
pub enum ProveError {
    #[error("witness has {got} wires, circuit expects {expected}")]
    WitnessSizeMismatch { expected: usize, got: usize },

    #[error("constraint system exceeds the supported FFT domain")]
    CircuitTooLarge,

    #[error(transparent)]
    Witness(#[from] WitnessError),
}
