// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Groth16 verification via a single multi-pairing.
//!
//! Algorithm:
//! 1. Compute `vk_x = ic[0] + MSM(ic[1..], public_inputs)`
//! 2. Check `e(A, B) * e(-vk_x, gamma) * e(-C, delta) * e(-alpha, beta) == 1`

use ark_bn254::{Bn254, Fr, G1Projective};
use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::{One, PrimeField};
use tracing::debug;

use g16_types::{Proof, VerifyingKey};

use crate::error::VerifyError;

/// Outcome of a verification run. `Rejected` is a valid result, not an
/// error: the verifier ran and the proof failed the cryptographic check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Check `proof` against `vk` for the given ordered public inputs
/// (`public_inputs[i]` pairs with `ic[i + 1]`).
pub fn verify(
    vk: &VerifyingKey,
    public_inputs: &[Fr],
    proof: &Proof,
) -> Result<Verdict, VerifyError> {
    if public_inputs.len() + 1 != vk.ic.len() {
        return Err(VerifyError::PublicInputSizeMismatch {
            expected: vk.ic.len().saturating_sub(1),
            got: public_inputs.len(),
        });
    }

    // Group-membership failures are rejections, not errors: the bytes
    // decoded, the proof is simply not valid.
    if !proof.is_well_formed() {
        debug!("proof elements fail curve or subgroup membership");
        return Ok(Verdict::Rejected);
    }

    let bigints: Vec<_> = public_inputs.iter().map(|v| v.into_bigint()).collect();
    let vk_x = G1Projective::msm_bigint(&vk.ic[1..], &bigints) + vk.ic[0];

    let g1_terms: [<Bn254 as Pairing>::G1Prepared; 4] = [
        proof.a.into(),
        (-vk_x).into_affine().into(),
        (-proof.c).into(),
        (-vk.alpha_g1).into(),
    ];
    let g2_terms: [<Bn254 as Pairing>::G2Prepared; 4] = [
        proof.b.into(),
        vk.gamma_g2.into(),
        vk.delta_g2.into(),
        vk.beta_g2.into(),
    ];

    let miller = Bn254::multi_miller_loop(g1_terms, g2_terms);
    let product = Bn254::final_exponentiation(miller).ok_or(VerifyError::Pairing)?;

    if product.0.is_one() {
        Ok(Verdict::Accepted)
    } else {
        debug!("pairing equation does not hold");
        Ok(Verdict::Rejected)
    }
}
