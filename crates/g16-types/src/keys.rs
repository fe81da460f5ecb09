//! Groth16 key material for BN254.

use ark_bn254::{G1Affine, G2Affine};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};

use crate::error::CodecError;

/// Groth16 verification key.
///
/// `ic` is a unified input-commitment vector: `ic[0]` is the constant term,
/// `ic[1..]` are the coefficients for the public inputs, so
/// `ic.len() == 1 + n_pub` always holds.
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerifyingKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    pub ic: Vec<G1Affine>,
}

impl VerifyingKey {
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }

    /// Exact byte length of the canonical compressed encoding. A pure
    /// function of the number of public inputs, independent of key material.
    pub fn serialized_len(&self) -> usize {
        self.serialized_size(Compress::Yes)
    }

    /// Write the canonical compressed encoding into `buf`, returning the
    /// number of bytes written. Callers query [`Self::serialized_len`] first;
    /// a short buffer fails with [`CodecError::BufferTooSmall`] and writes
    /// nothing.
    pub fn write_into(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let required = self.serialized_len();
        if buf.len() < required {
            return Err(CodecError::BufferTooSmall {
                required,
                provided: buf.len(),
            });
        }
        self.serialize_with_mode(&mut buf[..required], Compress::Yes)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        Ok(required)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.serialize_compressed(&mut out)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        Ok(out)
    }

    /// Inverse of [`Self::to_bytes`], with curve and subgroup validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let vk = Self::deserialize_with_mode(bytes, Compress::Yes, Validate::Yes)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        if vk.ic.is_empty() {
            return Err(CodecError::Malformed(
                "verifying key is missing the constant input-commitment term".into(),
            ));
        }
        Ok(vk)
    }

    /// Hex transport of the canonical compressed encoding (legacy format).
    pub fn to_hex(&self) -> Result<String, CodecError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let bytes =
            hex::decode(s.trim()).map_err(|e| CodecError::Malformed(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

/// Groth16 proving key. Embeds the verifying key; the per-wire query vectors
/// are kept in affine form for multi-scalar multiplication.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProvingKey {
    pub vk: VerifyingKey,
    pub beta_g1: G1Affine,
    pub delta_g1: G1Affine,
    pub a_query: Vec<G1Affine>,
    pub b_g1_query: Vec<G1Affine>,
    pub b_g2_query: Vec<G2Affine>,
    pub h_query: Vec<G1Affine>,
    pub l_query: Vec<G1Affine>,
}

impl ProvingKey {
    /// Number of wires covered by the per-wire query vectors.
    pub fn num_wires(&self) -> usize {
        self.a_query.len()
    }

    /// Size of the QAP evaluation domain the key was generated for.
    pub fn domain_size(&self) -> usize {
        self.h_query.len()
    }
}
