// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Circom circuit artifacts for the g16 engine.
//!
//! A circuit arrives as three files: the compiled witness calculator
//! (`.wasm`), the constraint system (`.r1cs`) and the Groth16 proving key
//! (`.zkey`). This crate parses the two binary formats into the shared
//! [`g16_types`] data model and drives the wasm calculator through the
//! circom-2 runtime ABI.

pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod input;
pub mod r1cs;
mod sections;
pub mod witness;
pub mod zkey;

pub use error::{ArtifactError, WitnessError};
pub use input::parse_input_json;
pub use r1cs::{read_r1cs, read_r1cs_file};
pub use witness::{InputAssignment, WitnessCalculator};
pub use zkey::{read_zkey, read_zkey_file};
