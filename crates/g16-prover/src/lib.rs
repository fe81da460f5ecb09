// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! # g16-prover
//!
//! Proving side of the g16 engine: load a circuit once, prove many times.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | [`context`] | [`Context`]: owns the parsed artifacts, load/drop lifecycle |
//! | [`prover`] | Groth16 proof construction over a witness vector |
//! | [`qap`] | R1CS → QAP witness map (quotient evaluations) |
//!
//! ## Typical flow
//!
//! ```rust,no_run
//! use g16_prover::Context;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Context::load("circuit.wasm", "circuit.r1cs", "circuit.zkey")?;
//!
//! // Export the verifying key once (size-then-write).
//! let mut vk = vec![0u8; ctx.verifying_key_size()];
//! ctx.export_verifying_key(&mut vk)?;
//!
//! // Prove as many times as needed.
//! let (public_inputs, proof) =
//!     ctx.prove_json(r#"{"a": ["3"], "b": ["5"]}"#)?;
//! # let _ = (public_inputs, proof);
//! // The context releases all artifact memory when dropped.
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod prover;
pub mod qap;

pub use context::Context;
pub use error::{LoadError, ProveError};
pub use prover::{create_proof, create_proof_with_blinders};

// Re-exports so most callers only need this crate.
pub use g16_circom::{parse_input_json, InputAssignment};
pub use g16_types::{ConstraintSystem, Proof, ProvingKey, ProvingOutput, VerifyingKey};
