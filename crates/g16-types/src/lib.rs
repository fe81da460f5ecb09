pub mod constraints;
pub mod error;
pub mod keys;
pub mod proof;

pub use constraints::{evaluate_lc, Constraint, ConstraintSystem, LinearCombination};
pub use error::CodecError;
pub use keys::{ProvingKey, VerifyingKey};
pub use proof::{
    decode_public_inputs, encode_public_inputs, fr_from_decimal, Proof, ProvingOutput,
    FR_SERIALIZED_LEN,
};

// The pairing-friendly curve and its groups default to BN254 for the whole
// engine. Wire formats assume Fr to be 4x8 = 32 bytes in size; changing to a
// curve with a different encoding would break proof and key (de)serialization.
pub type Curve = ark_bn254::Bn254;
pub type Fr = ark_bn254::Fr;
pub type Fq = ark_bn254::Fq;
pub type Fq2 = ark_bn254::Fq2;
pub type G1Affine = ark_bn254::G1Affine;
pub type G1Projective = ark_bn254::G1Projective;
pub type G2Affine = ark_bn254::G2Affine;
pub type G2Projective = ark_bn254::G2Projective;
