//! Typed errors for artifact loading and witness computation.

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("malformed artifact: {0}")]
    Malformed(String),

    #[error("unsupported witness calculator version {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn malformed(msg: impl Into<String>) -> ArtifactError {
    ArtifactError::Malformed(msg.into())
}

#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    #[error("missing input signals: circuit expects {expected} values, got {got}")]
    UnsatisfiedSignal { expected: usize, got: usize },

    #[error("unknown input signal `{0}`")]
    UnknownSignal(String),

    #[error("circuit execution trapped: {0}")]
    ExecutionTrap(String),

    #[error("invalid input assignment: {0}")]
    InvalidInput(String),
}
