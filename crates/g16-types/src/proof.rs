//! Proof and public-input wire formats.
//!
//! Two encodings travel between prover and verifier:
//!
//! - the canonical compressed byte forms (proof: 128 bytes; public inputs:
//!   `n_pub` concatenated 32-byte little-endian scalars);
//! - the legacy combined [`ProvingOutput`] blob, JSON with base-10 public
//!   inputs and a hex proof, kept for callers of the historical interface.

use std::str::FromStr;

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Byte length of one compressed scalar in the public-input encoding.
pub const FR_SERIALIZED_LEN: usize = 32;

/// A Groth16 proof. Self-contained and independent of any context lifetime.
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

impl Proof {
    /// Canonical compressed length: 32 (G1) + 64 (G2) + 32 (G1).
    pub const COMPRESSED_LEN: usize = 128;

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(Self::COMPRESSED_LEN);
        self.serialize_compressed(&mut out)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        Ok(out)
    }

    /// Structural decode only. Curve and subgroup membership is checked
    /// separately by the verifier so that an off-subgroup point can be
    /// reported as a rejection rather than an encoding error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::COMPRESSED_LEN {
            return Err(CodecError::Malformed(format!(
                "proof must be {} bytes, got {}",
                Self::COMPRESSED_LEN,
                bytes.len()
            )));
        }
        Self::deserialize_with_mode(bytes, Compress::Yes, Validate::No)
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }

    /// Curve and prime-order-subgroup membership of all three elements.
    pub fn is_well_formed(&self) -> bool {
        self.a.is_on_curve()
            && self.a.is_in_correct_subgroup_assuming_on_curve()
            && self.b.is_on_curve()
            && self.b.is_in_correct_subgroup_assuming_on_curve()
            && self.c.is_on_curve()
            && self.c.is_in_correct_subgroup_assuming_on_curve()
    }

    pub fn to_hex(&self) -> Result<String, CodecError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let bytes =
            hex::decode(s.trim()).map_err(|e| CodecError::Malformed(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

/// Concatenated 32-byte little-endian compressed scalars.
pub fn encode_public_inputs(inputs: &[Fr]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(inputs.len() * FR_SERIALIZED_LEN);
    for v in inputs {
        v.serialize_compressed(&mut out)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
    }
    Ok(out)
}

/// Inverse of [`encode_public_inputs`]. Rejects buffers that are not a
/// multiple of the scalar width and non-canonical scalars (values >= r).
pub fn decode_public_inputs(bytes: &[u8]) -> Result<Vec<Fr>, CodecError> {
    if bytes.len() % FR_SERIALIZED_LEN != 0 {
        return Err(CodecError::Malformed(format!(
            "public input buffer length {} is not a multiple of {}",
            bytes.len(),
            FR_SERIALIZED_LEN
        )));
    }
    bytes
        .chunks_exact(FR_SERIALIZED_LEN)
        .map(|chunk| {
            Fr::deserialize_compressed(chunk).map_err(|e| CodecError::Malformed(e.to_string()))
        })
        .collect()
}

/// Parse a base-10 field element (legacy public-input encoding). Negative
/// values wrap modulo the scalar-field order.
pub fn fr_from_decimal(s: &str) -> Result<Fr, CodecError> {
    let value = BigInt::from_str(s.trim())
        .map_err(|_| CodecError::Malformed(format!("not a base-10 integer: {s:?}")))?;
    let modulus = BigInt::from(BigUint::from(Fr::MODULUS));
    let value = ((value % &modulus) + &modulus) % &modulus;
    let (_, bytes) = value.to_bytes_be();
    Ok(Fr::from_be_bytes_mod_order(&bytes))
}

/// The legacy combined prover output: public inputs as base-10 strings plus
/// the hex-encoded compressed proof, wrapped in one JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvingOutput {
    pub public_inputs: Vec<String>,
    pub proof: String,
}

impl ProvingOutput {
    pub fn from_parts(public_inputs: &[Fr], proof: &Proof) -> Result<Self, CodecError> {
        Ok(Self {
            public_inputs: public_inputs.iter().map(|v| v.to_string()).collect(),
            proof: proof.to_hex()?,
        })
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(|e| CodecError::Malformed(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self, CodecError> {
        serde_json::from_str(s).map_err(|e| CodecError::Malformed(e.to_string()))
    }

    /// Decode into the canonical `(public_inputs, proof)` pair.
    pub fn decode(&self) -> Result<(Vec<Fr>, Proof), CodecError> {
        let inputs = self
            .public_inputs
            .iter()
            .map(|s| fr_from_decimal(s))
            .collect::<Result<Vec<_>, _>>()?;
        let proof = Proof::from_hex(&self.proof)?;
        Ok((inputs, proof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{G1Projective, G2Projective};
    use ark_ec::CurveGroup;
    use ark_ff::BigInteger;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use ark_std::UniformRand;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn dummy_proof(rng: &mut StdRng) -> Proof {
        Proof {
            a: G1Projective::rand(rng).into_affine(),
            b: G2Projective::rand(rng).into_affine(),
            c: G1Projective::rand(rng).into_affine(),
        }
    }

    #[test]
    fn test_proof_byte_round_trip() {
        let mut rng = test_rng();
        let proof = dummy_proof(&mut rng);
        let bytes = proof.to_bytes().unwrap();
        assert_eq!(bytes.len(), Proof::COMPRESSED_LEN);
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);
        assert!(proof.is_well_formed());
    }

    #[test]
    fn test_proof_length_enforced() {
        let mut rng = test_rng();
        let bytes = dummy_proof(&mut rng).to_bytes().unwrap();
        assert!(Proof::from_bytes(&bytes[..bytes.len() - 1]).is_err());

        let mut long = bytes.clone();
        long.push(0);
        assert!(Proof::from_bytes(&long).is_err());
    }

    #[test]
    fn test_public_input_buffer_round_trip() {
        let mut rng = test_rng();
        let inputs: Vec<Fr> = (0..4).map(|_| Fr::rand(&mut rng)).collect();
        let bytes = encode_public_inputs(&inputs).unwrap();
        assert_eq!(bytes.len(), 4 * FR_SERIALIZED_LEN);
        assert_eq!(decode_public_inputs(&bytes).unwrap(), inputs);
    }

    #[test]
    fn test_public_input_buffer_bad_length() {
        assert!(decode_public_inputs(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_non_canonical_scalar_rejected() {
        // The field modulus itself is not a canonical scalar encoding.
        let bytes = Fr::MODULUS.to_bytes_le();
        assert!(decode_public_inputs(&bytes).is_err());
    }

    #[test]
    fn test_decimal_parse() {
        assert_eq!(fr_from_decimal("15").unwrap(), Fr::from(15u64));
        assert_eq!(fr_from_decimal("-1").unwrap(), -Fr::from(1u64));
        assert!(fr_from_decimal("not a number").is_err());
    }

    #[test]
    fn test_proving_output_round_trip() {
        let mut rng = test_rng();
        let proof = dummy_proof(&mut rng);
        let inputs: Vec<Fr> = (0..3).map(|_| Fr::rand(&mut rng)).collect();

        let blob = ProvingOutput::from_parts(&inputs, &proof).unwrap();
        let json = blob.to_json().unwrap();
        let (decoded_inputs, decoded_proof) =
            ProvingOutput::from_json(&json).unwrap().decode().unwrap();
        assert_eq!(decoded_inputs, inputs);
        assert_eq!(decoded_proof, proof);
    }
}
