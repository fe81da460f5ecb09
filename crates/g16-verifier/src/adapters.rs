// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Boundary adapters for the two historical verification entry points.
//!
//! Both decode into the canonical `(VerifyingKey, PublicInputs, Proof)`
//! triple and then run the one pairing check in [`crate::verify`]; neither
//! carries verification logic of its own.

use ark_bn254::Fr;

use g16_types::{decode_public_inputs, Proof, ProvingOutput, VerifyingKey};

use crate::error::VerifyError;
use crate::verify::{verify, Verdict};

/// Legacy entry point: a hex-encoded verifying key plus the combined
/// proving-output JSON blob emitted by the prover
/// (`{"public_inputs": [...], "proof": "<hex>"}`).
pub fn verify_proving_output(
    vk_hex: &str,
    proving_output_json: &str,
) -> Result<Verdict, VerifyError> {
    let vk = VerifyingKey::from_hex(vk_hex)?;
    let (public_inputs, proof) = ProvingOutput::from_json(proving_output_json)?.decode()?;
    verify(&vk, &public_inputs, &proof)
}

/// Current entry point: three explicit byte buffers holding the verifying
/// key, the concatenated 32-byte public-input scalars, and the 128-byte
/// proof.
pub fn verify_buffers(
    vk: &[u8],
    public_inputs: &[u8],
    proof: &[u8],
) -> Result<Verdict, VerifyError> {
    let vk = VerifyingKey::from_bytes(vk)?;
    let public_inputs: Vec<Fr> = decode_public_inputs(public_inputs)?;
    let proof = Proof::from_bytes(proof)?;
    verify(&vk, &public_inputs, &proof)
}
