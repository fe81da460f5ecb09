// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Groth16 proof construction.

use ark_bn254::{Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_std::rand::{CryptoRng, RngCore};
use ark_std::UniformRand;
use tracing::debug;

use g16_types::{ConstraintSystem, Proof, ProvingKey};

use crate::error::ProveError;
use crate::qap;

/// Create a proof with fresh blinding scalars from `rng`.
///
/// The rng must be cryptographically secure: predictable or reused blinding
/// leaks the witness.
pub fn create_proof<R: RngCore + CryptoRng>(
    pk: &ProvingKey,
    cs: &ConstraintSystem,
    witness: &[Fr],
    rng: &mut R,
) -> Result<Proof, ProveError> {
    let r = Fr::rand(rng);
    let s = Fr::rand(rng);
    create_proof_with_blinders(pk, cs, witness, r, s)
}

/// Deterministic core of [`create_proof`]. Callers must never reuse an
/// `(r, s)` pair across proofs.
pub fn create_proof_with_blinders(
    pk: &ProvingKey,
    cs: &ConstraintSystem,
    witness: &[Fr],
    r: Fr,
    s: Fr,
) -> Result<Proof, ProveError> {
    if witness.len() != cs.num_wires {
        return Err(ProveError::WitnessSizeMismatch {
            expected: cs.num_wires,
            got: witness.len(),
        });
    }
    debug_assert_eq!(pk.num_wires(), cs.num_wires);
    debug_assert!(cs.is_satisfied(witness));

    let h_evals = qap::witness_quotient_evals(cs, witness)?;
    debug_assert_eq!(h_evals.len(), pk.h_query.len());
    let h_bigint: Vec<_> = h_evals.iter().map(|v| v.into_bigint()).collect();
    let h_acc = G1Projective::msm_bigint(&pk.h_query, &h_bigint);

    let aux_bigint: Vec<_> = witness[cs.num_instance()..]
        .iter()
        .map(|v| v.into_bigint())
        .collect();
    let l_acc = G1Projective::msm_bigint(&pk.l_query, &aux_bigint);

    // Wire 0 is the constant-one wire; its query points enter the sums
    // directly instead of through the MSMs.
    let scalars: Vec<_> = witness[1..].iter().map(|v| v.into_bigint()).collect();

    let g_a = pk.delta_g1 * r
        + pk.vk.alpha_g1
        + pk.a_query[0]
        + G1Projective::msm_bigint(&pk.a_query[1..], &scalars);

    let g1_b = pk.delta_g1 * s
        + pk.beta_g1
        + pk.b_g1_query[0]
        + G1Projective::msm_bigint(&pk.b_g1_query[1..], &scalars);

    let g2_b = pk.vk.delta_g2 * s
        + pk.vk.beta_g2
        + pk.b_g2_query[0]
        + G2Projective::msm_bigint(&pk.b_g2_query[1..], &scalars);

    let g_c = g_a * s + g1_b * r - pk.delta_g1 * (r * s) + l_acc + h_acc;

    debug!("constructed proof");
    Ok(Proof {
        a: g_a.into_affine(),
        b: g2_b.into_affine(),
        c: g_c.into_affine(),
    })
}
