// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! # g16-verifier
//!
//! Standalone Groth16 verification over BN254. A verifying party needs only
//! an exported verifying key, the public inputs and a proof; it never sees
//! the proving context or key material.
//!
//! The canonical check is [`verify`]. Two boundary adapters decode the
//! historical wire formats into the same request before running it:
//! [`verify_proving_output`] (hex key + combined JSON blob) and
//! [`verify_buffers`] (three explicit byte buffers).

pub mod adapters;
pub mod error;
pub mod verify;

pub use adapters::{verify_buffers, verify_proving_output};
pub use error::VerifyError;
pub use verify::{verify, Verdict};

pub use g16_types::{Proof, VerifyingKey};
