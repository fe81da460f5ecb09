//! Typed errors for verification. A failed pairing check is *not* an error;
//! see [`Verdict`](crate::Verdict).

use g16_types::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("have {got} public inputs, verifying key expects {expected}")]
    PublicInputSizeMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Encoding(#[from] CodecError),

    #[error("pairing computation failed")]
    Pairing,
}
