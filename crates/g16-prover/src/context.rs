// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Proving context: the load-once, prove-many unit of reuse.

use std::path::Path;
use std::sync::Mutex;

use ark_bn254::Fr;
use ark_poly::EvaluationDomain;
use ark_std::rand::{CryptoRng, RngCore};
use tracing::info;

use g16_circom::{
    parse_input_json, read_r1cs_file, read_zkey_file, InputAssignment, WitnessCalculator,
    WitnessError,
};
use g16_types::{CodecError, ConstraintSystem, Proof, ProvingKey, VerifyingKey};

use crate::error::{LoadError, ProveError};
use crate::{prover, qap};

/// Exclusive owner of one circuit's parsed artifacts.
///
/// The constraint system and proving key are immutable after load and safe
/// to read concurrently. The witness calculator carries mutable wasm scratch
/// state, so it sits behind a mutex: one witness computation is in flight
/// per context at a time, and `init` re-runs on every call so sequential
/// reuse never observes stale state. Dropping the context releases all
/// artifact memory; the borrow checker stands in for the release-then-use
/// discipline of the historical raw-handle API.
pub struct Context {
    constraints: ConstraintSystem,
    calculator: Mutex<WitnessCalculator>,
    pk: ProvingKey,
}

impl Context {
    /// Parse and cross-validate the three circuit artifacts.
    pub fn load(
        wasm_path: impl AsRef<Path>,
        r1cs_path: impl AsRef<Path>,
        zkey_path: impl AsRef<Path>,
    ) -> Result<Self, LoadError> {
        let constraints = read_r1cs_file(r1cs_path)?;
        let calculator = WitnessCalculator::from_file(wasm_path)?;
        let pk = read_zkey_file(zkey_path)?;
        Self::from_parts(constraints, calculator, pk)
    }

    /// Assemble a context from already-parsed artifacts, applying the same
    /// cross-validation as [`Self::load`].
    pub fn from_parts(
        constraints: ConstraintSystem,
        calculator: WitnessCalculator,
        pk: ProvingKey,
    ) -> Result<Self, LoadError> {
        if pk.num_wires() != constraints.num_wires {
            return Err(inconsistent(format!(
                "proving key covers {} wires, constraint system has {}",
                pk.num_wires(),
                constraints.num_wires
            )));
        }
        if pk.vk.ic.len() != constraints.num_instance() {
            return Err(inconsistent(format!(
                "verifying key commits to {} instance wires, circuit has {}",
                pk.vk.ic.len(),
                constraints.num_instance()
            )));
        }
        if pk.l_query.len() != constraints.num_aux() {
            return Err(inconsistent(format!(
                "proving key L query covers {} private wires, circuit has {}",
                pk.l_query.len(),
                constraints.num_aux()
            )));
        }
        let domain_size = qap::domain_for(&constraints)
            .map_err(|_| inconsistent("constraint system exceeds the FFT domain".into()))?
            .size();
        if pk.domain_size() != domain_size {
            return Err(inconsistent(format!(
                "proving key H query spans {} evaluations, circuit needs {domain_size}",
                pk.domain_size()
            )));
        }
        let expected_inputs =
            constraints.num_public_inputs + constraints.num_private_inputs;
        if calculator.num_inputs() != expected_inputs {
            return Err(inconsistent(format!(
                "witness calculator takes {} input values, constraint system declares {expected_inputs}",
                calculator.num_inputs()
            )));
        }

        info!(
            wires = constraints.num_wires,
            public = constraints.num_public(),
            constraints = constraints.num_constraints(),
            "proving context ready"
        );
        Ok(Self {
            constraints,
            calculator: Mutex::new(calculator),
            pk,
        })
    }

    pub fn constraint_system(&self) -> &ConstraintSystem {
        &self.constraints
    }

    pub fn proving_key(&self) -> &ProvingKey {
        &self.pk
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.pk.vk
    }

    pub fn num_public_inputs(&self) -> usize {
        self.constraints.num_public()
    }

    /// Exact byte size of the exported verifying key. Query this before
    /// calling [`Self::export_verifying_key`].
    pub fn verifying_key_size(&self) -> usize {
        self.pk.vk.serialized_len()
    }

    /// Write the verifying key into a caller-allocated buffer, returning the
    /// bytes written. Fails with [`CodecError::BufferTooSmall`] if the buffer
    /// is shorter than [`Self::verifying_key_size`].
    pub fn export_verifying_key(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
        self.pk.vk.write_into(buf)
    }

    /// Run the witness calculator on one input assignment.
    pub fn compute_witness(
        &self,
        assignment: &InputAssignment,
    ) -> Result<Vec<Fr>, WitnessError> {
        let mut calculator = self
            .calculator
            .lock()
            .map_err(|_| WitnessError::ExecutionTrap("witness calculator mutex poisoned".into()))?;
        let witness = calculator.calculate_witness(assignment)?;
        if witness.len() != self.constraints.num_wires {
            return Err(WitnessError::ExecutionTrap(format!(
                "calculator produced {} wires, circuit has {}",
                witness.len(),
                self.constraints.num_wires
            )));
        }
        Ok(witness)
    }

    /// Prove over an already-computed witness vector.
    pub fn prove_witness<R: RngCore + CryptoRng>(
        &self,
        witness: &[Fr],
        rng: &mut R,
    ) -> Result<Proof, ProveError> {
        prover::create_proof(&self.pk, &self.constraints, witness, rng)
    }

    /// Full pipeline for one input assignment: witness, then proof. Returns
    /// the circuit's public signals alongside the proof.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        assignment: &InputAssignment,
        rng: &mut R,
    ) -> Result<(Vec<Fr>, Proof), ProveError> {
        let witness = self.compute_witness(assignment)?;
        let proof = self.prove_witness(&witness, rng)?;
        Ok((self.constraints.public_inputs(&witness).to_vec(), proof))
    }

    /// [`Self::prove`] over the reference JSON input format, using the
    /// thread-local CSPRNG.
    pub fn prove_json(&self, input_json: &str) -> Result<(Vec<Fr>, Proof), ProveError> {
        let assignment = parse_input_json(input_json)?;
        self.prove(&assignment, &mut rand::thread_rng())
    }
}

fn inconsistent(detail: String) -> LoadError {
    LoadError::Inconsistent(detail)
}
