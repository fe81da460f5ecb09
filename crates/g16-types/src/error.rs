//! Typed errors for wire-format encoding and decoding.

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("buffer too small: need {required} bytes, have {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    #[error("malformed encoding: {0}")]
    Malformed(String),
}
