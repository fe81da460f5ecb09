// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! `.r1cs` constraint-system parsing.
//!
//! Layout (little-endian throughout): magic `r1cs`, version 1, then a
//! section directory. Section 1 is the header (field size, prime, wire and
//! constraint counts), section 2 the constraints as sparse `(wire, coeff)`
//! rows for A, B and C. Coefficients are canonical little-endian scalars.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ark_bn254::Fr;
use ark_ff::{BigInteger256, PrimeField};
use ark_serialize::CanonicalDeserialize;
use byteorder::{LittleEndian, ReadBytesExt};
use num_bigint::BigUint;
use tracing::debug;

use g16_types::{Constraint, ConstraintSystem, LinearCombination};

use crate::error::{malformed, ArtifactError};
use crate::sections::{enter_section, read_preamble};

const MAGIC: [u8; 4] = *b"r1cs";
const VERSION: u32 = 1;

const SECTION_HEADER: u32 = 1;
const SECTION_CONSTRAINTS: u32 = 2;

pub fn read_r1cs_file(path: impl AsRef<Path>) -> Result<ConstraintSystem, ArtifactError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_r1cs(&mut reader)
}

pub fn read_r1cs<R: Read + Seek>(reader: &mut R) -> Result<ConstraintSystem, ArtifactError> {
    let sections = read_preamble(reader, &MAGIC, VERSION, "r1cs")?;

    enter_section(reader, &sections, SECTION_HEADER, "r1cs")?;
    let header = read_header(reader)?;

    enter_section(reader, &sections, SECTION_CONSTRAINTS, "r1cs")?;
    let mut constraints = Vec::with_capacity(header.n_constraints as usize);
    for _ in 0..header.n_constraints {
        constraints.push(Constraint {
            a: read_lc(reader, header.n_wires)?,
            b: read_lc(reader, header.n_wires)?,
            c: read_lc(reader, header.n_wires)?,
        });
    }

    let cs = ConstraintSystem {
        num_public_inputs: header.n_pub_in as usize,
        num_public_outputs: header.n_pub_out as usize,
        num_private_inputs: header.n_prv_in as usize,
        num_wires: header.n_wires as usize,
        constraints,
    };
    if cs.num_wires < cs.num_instance() {
        return Err(malformed(format!(
            "wire count {} is below the {} instance wires",
            cs.num_wires,
            cs.num_instance()
        )));
    }
    debug!(
        wires = cs.num_wires,
        public = cs.num_public(),
        constraints = cs.num_constraints(),
        "parsed constraint system"
    );
    Ok(cs)
}

struct Header {
    n_wires: u32,
    n_pub_out: u32,
    n_pub_in: u32,
    n_prv_in: u32,
    n_constraints: u32,
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header, ArtifactError> {
    let field_size = reader.read_u32::<LittleEndian>()?;
    if field_size != 32 {
        return Err(malformed(format!("unexpected field size {field_size}")));
    }
    let mut prime = vec![0u8; field_size as usize];
    reader.read_exact(&mut prime)?;
    if BigUint::from_bytes_le(&prime) != BigUint::from(Fr::MODULUS) {
        return Err(malformed("constraint system field is not the BN254 scalar field"));
    }

    let n_wires = reader.read_u32::<LittleEndian>()?;
    let n_pub_out = reader.read_u32::<LittleEndian>()?;
    let n_pub_in = reader.read_u32::<LittleEndian>()?;
    let n_prv_in = reader.read_u32::<LittleEndian>()?;
    let _n_labels = reader.read_u64::<LittleEndian>()?;
    let n_constraints = reader.read_u32::<LittleEndian>()?;

    Ok(Header {
        n_wires,
        n_pub_out,
        n_pub_in,
        n_prv_in,
        n_constraints,
    })
}

fn read_lc<R: Read>(reader: &mut R, n_wires: u32) -> Result<LinearCombination, ArtifactError> {
    let n_terms = reader.read_u32::<LittleEndian>()?;
    let mut lc = Vec::with_capacity(n_terms as usize);
    for _ in 0..n_terms {
        let wire = reader.read_u32::<LittleEndian>()?;
        if wire >= n_wires {
            return Err(malformed(format!(
                "constraint references wire {wire}, circuit has {n_wires}"
            )));
        }
        lc.push((wire as usize, read_coefficient(reader)?));
    }
    Ok(lc)
}

fn read_coefficient<R: Read>(reader: &mut R) -> Result<Fr, ArtifactError> {
    let repr = BigInteger256::deserialize_uncompressed(reader)
        .map_err(|e| malformed(format!("bad coefficient: {e}")))?;
    Fr::from_bigint(repr).ok_or_else(|| malformed("coefficient is not a canonical field element"))
}
