// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! `.zkey` proving-key parsing (snarkjs layout).
//!
//! Section map: 1 prover scheme, 2 Groth16 header (moduli, counts, the
//! alpha/beta/gamma/delta elements), 3 input commitments, 4 constraint
//! coefficients, 5 A query, 6 B query (G1), 7 B query (G2), 8 L query,
//! 9 H query. Base-field limbs are stored in the snarkjs doubled-Montgomery
//! form; each `new_unchecked`/`into_bigint` pass strips one factor of R.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ark_bn254::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ff::{BigInteger256, PrimeField, Zero};
use ark_serialize::CanonicalDeserialize;
use byteorder::{LittleEndian, ReadBytesExt};
use num_bigint::BigUint;
use tracing::debug;

use g16_types::{ProvingKey, VerifyingKey};

use crate::error::{malformed, ArtifactError};
use crate::sections::{enter_section, read_preamble};

const MAGIC: [u8; 4] = *b"zkey";
const VERSION: u32 = 1;

const SECTION_SCHEME: u32 = 1;
const SECTION_GROTH_HEADER: u32 = 2;
const SECTION_IC: u32 = 3;
const SECTION_COEFFS: u32 = 4;
const SECTION_A: u32 = 5;
const SECTION_B1: u32 = 6;
const SECTION_B2: u32 = 7;
const SECTION_L: u32 = 8;
const SECTION_H: u32 = 9;

const SCHEME_GROTH16: u32 = 1;

const G1_LEN: u64 = 64;
const G2_LEN: u64 = 128;

pub fn read_zkey_file(path: impl AsRef<Path>) -> Result<ProvingKey, ArtifactError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_zkey(&mut reader)
}

pub fn read_zkey<R: Read + Seek>(reader: &mut R) -> Result<ProvingKey, ArtifactError> {
    let sections = read_preamble(reader, &MAGIC, VERSION, "zkey")?;

    enter_section(reader, &sections, SECTION_SCHEME, "zkey")?;
    let scheme = reader.read_u32::<LittleEndian>()?;
    if scheme != SCHEME_GROTH16 {
        return Err(malformed(format!("zkey prover scheme {scheme} is not groth16")));
    }

    enter_section(reader, &sections, SECTION_GROTH_HEADER, "zkey")?;
    let header = read_groth_header(reader)?;

    let n_private = header
        .n_vars
        .checked_sub(header.n_public + 1)
        .ok_or_else(|| malformed("zkey declares more public signals than wires"))?;

    let size = enter_section(reader, &sections, SECTION_IC, "zkey")?;
    let ic = read_g1_vec(reader, header.n_public + 1, size, "input commitments")?;

    enter_section(reader, &sections, SECTION_COEFFS, "zkey")?;
    validate_coefficients(reader, &header)?;

    let size = enter_section(reader, &sections, SECTION_A, "zkey")?;
    let a_query = read_g1_vec(reader, header.n_vars, size, "A query")?;
    let size = enter_section(reader, &sections, SECTION_B1, "zkey")?;
    let b_g1_query = read_g1_vec(reader, header.n_vars, size, "B1 query")?;
    let size = enter_section(reader, &sections, SECTION_B2, "zkey")?;
    let b_g2_query = read_g2_vec(reader, header.n_vars, size, "B2 query")?;
    let size = enter_section(reader, &sections, SECTION_L, "zkey")?;
    let l_query = read_g1_vec(reader, n_private, size, "L query")?;
    let size = enter_section(reader, &sections, SECTION_H, "zkey")?;
    let h_query = read_g1_vec(reader, header.domain_size, size, "H query")?;

    debug!(
        wires = header.n_vars,
        public = header.n_public,
        domain = header.domain_size,
        "parsed proving key"
    );

    Ok(ProvingKey {
        vk: VerifyingKey {
            alpha_g1: header.alpha_g1,
            beta_g2: header.beta_g2,
            gamma_g2: header.gamma_g2,
            delta_g2: header.delta_g2,
            ic,
        },
        beta_g1: header.beta_g1,
        delta_g1: header.delta_g1,
        a_query,
        b_g1_query,
        b_g2_query,
        h_query,
        l_query,
    })
}

struct GrothHeader {
    n_vars: usize,
    n_public: usize,
    domain_size: usize,
    alpha_g1: G1Affine,
    beta_g1: G1Affine,
    beta_g2: G2Affine,
    gamma_g2: G2Affine,
    delta_g1: G1Affine,
    delta_g2: G2Affine,
}

fn read_groth_header<R: Read>(reader: &mut R) -> Result<GrothHeader, ArtifactError> {
    let n8q = reader.read_u32::<LittleEndian>()?;
    if n8q != 32 {
        return Err(malformed(format!("unexpected base-field size {n8q}")));
    }
    let mut q = vec![0u8; n8q as usize];
    reader.read_exact(&mut q)?;
    if BigUint::from_bytes_le(&q) != BigUint::from(Fq::MODULUS) {
        return Err(malformed("zkey base field is not BN254"));
    }

    let n8r = reader.read_u32::<LittleEndian>()?;
    if n8r != 32 {
        return Err(malformed(format!("unexpected scalar-field size {n8r}")));
    }
    let mut r = vec![0u8; n8r as usize];
    reader.read_exact(&mut r)?;
    if BigUint::from_bytes_le(&r) != BigUint::from(Fr::MODULUS) {
        return Err(malformed("zkey scalar field is not BN254"));
    }

    let n_vars = reader.read_u32::<LittleEndian>()? as usize;
    let n_public = reader.read_u32::<LittleEndian>()? as usize;
    let domain_size = reader.read_u32::<LittleEndian>()? as usize;
    if !domain_size.is_power_of_two() {
        return Err(malformed(format!("domain size {domain_size} is not a power of two")));
    }

    Ok(GrothHeader {
        n_vars,
        n_public,
        domain_size,
        alpha_g1: read_g1(reader)?,
        beta_g1: read_g1(reader)?,
        beta_g2: read_g2(reader)?,
        gamma_g2: read_g2(reader)?,
        delta_g1: read_g1(reader)?,
        delta_g2: read_g2(reader)?,
    })
}

/// Streamed sanity check of the coefficient section. The matrices themselves
/// drive nothing here (proving evaluates the r1cs-file constraints), but the
/// indices must agree with the header for the artifacts to be coherent.
fn validate_coefficients<R: Read>(reader: &mut R, header: &GrothHeader) -> Result<(), ArtifactError> {
    let n_coeffs = reader.read_u32::<LittleEndian>()?;
    for _ in 0..n_coeffs {
        let matrix = reader.read_u32::<LittleEndian>()?;
        if matrix > 1 {
            return Err(malformed(format!("coefficient references matrix {matrix}")));
        }
        let constraint = reader.read_u32::<LittleEndian>()? as usize;
        if constraint >= header.domain_size {
            return Err(malformed(format!(
                "coefficient row {constraint} exceeds domain size {}",
                header.domain_size
            )));
        }
        let signal = reader.read_u32::<LittleEndian>()? as usize;
        if signal >= header.n_vars {
            return Err(malformed(format!(
                "coefficient wire {signal} exceeds wire count {}",
                header.n_vars
            )));
        }
        let _ = read_fr(reader)?;
    }
    Ok(())
}

fn read_fq<R: Read>(reader: &mut R) -> Result<Fq, ArtifactError> {
    let repr = BigInteger256::deserialize_uncompressed(reader)
        .map_err(|e| malformed(format!("bad base-field element: {e}")))?;
    Ok(Fq::new_unchecked(Fq::new_unchecked(repr).into_bigint()))
}

fn read_fr<R: Read>(reader: &mut R) -> Result<Fr, ArtifactError> {
    let repr = BigInteger256::deserialize_uncompressed(reader)
        .map_err(|e| malformed(format!("bad scalar-field element: {e}")))?;
    Ok(Fr::new_unchecked(Fr::new_unchecked(repr).into_bigint()))
}

fn read_g1<R: Read>(reader: &mut R) -> Result<G1Affine, ArtifactError> {
    let x = read_fq(reader)?;
    let y = read_fq(reader)?;
    // snarkjs encodes the point at infinity as (0, 0)
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }
    let p = G1Affine::new_unchecked(x, y);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(malformed("G1 point is not in the prime-order group"));
    }
    Ok(p)
}

fn read_g2<R: Read>(reader: &mut R) -> Result<G2Affine, ArtifactError> {
    let x = Fq2::new(read_fq(reader)?, read_fq(reader)?);
    let y = Fq2::new(read_fq(reader)?, read_fq(reader)?);
    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::identity());
    }
    let p = G2Affine::new_unchecked(x, y);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(malformed("G2 point is not in the prime-order group"));
    }
    Ok(p)
}

fn read_g1_vec<R: Read>(
    reader: &mut R,
    n: usize,
    section_size: u64,
    what: &str,
) -> Result<Vec<G1Affine>, ArtifactError> {
    if section_size != n as u64 * G1_LEN {
        return Err(malformed(format!(
            "{what} section holds {section_size} bytes, expected {} points",
            n
        )));
    }
    (0..n).map(|_| read_g1(reader)).collect()
}

fn read_g2_vec<R: Read>(
    reader: &mut R,
    n: usize,
    section_size: u64,
    what: &str,
) -> Result<Vec<G2Affine>, ArtifactError> {
    if section_size != n as u64 * G2_LEN {
        return Err(malformed(format!(
            "{what} section holds {section_size} bytes, expected {} points",
            n
        )));
    }
    (0..n).map(|_| read_g2(reader)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{G1Projective, G2Projective};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::BigInteger;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use ark_std::UniformRand;
    use byteorder::WriteBytesExt;
    use num_bigint::BigUint;
    use num_traits::One;
    use std::io::Cursor;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    /// Encode a base-field element the way snarkjs does: limbs of
    /// `v * R^2 mod q`, little-endian, 32 bytes.
    fn push_fq(out: &mut Vec<u8>, v: &Fq) {
        let q = BigUint::from(Fq::MODULUS);
        let r = (BigUint::one() << 256) % &q;
        let enc: BigUint = (BigUint::from(v.into_bigint()) * &r % &q) * &r % &q;
        let mut bytes = enc.to_bytes_le();
        bytes.resize(32, 0);
        out.extend_from_slice(&bytes);
    }

    fn push_fr_mont(out: &mut Vec<u8>, v: &Fr) {
        let m = BigUint::from(Fr::MODULUS);
        let r = (BigUint::one() << 256) % &m;
        let enc: BigUint = (BigUint::from(v.into_bigint()) * &r % &m) * &r % &m;
        let mut bytes = enc.to_bytes_le();
        bytes.resize(32, 0);
        out.extend_from_slice(&bytes);
    }

    fn push_g1(out: &mut Vec<u8>, p: &G1Affine) {
        if p.is_zero() {
            out.extend_from_slice(&[0u8; 64]);
        } else {
            push_fq(out, &p.x);
            push_fq(out, &p.y);
        }
    }

    fn push_g2(out: &mut Vec<u8>, p: &G2Affine) {
        if p.is_zero() {
            out.extend_from_slice(&[0u8; 128]);
        } else {
            push_fq(out, &p.x.c0);
            push_fq(out, &p.x.c1);
            push_fq(out, &p.y.c0);
            push_fq(out, &p.y.c1);
        }
    }

    struct TestKey {
        alpha_g1: G1Affine,
        beta_g1: G1Affine,
        beta_g2: G2Affine,
        gamma_g2: G2Affine,
        delta_g1: G1Affine,
        delta_g2: G2Affine,
        ic: Vec<G1Affine>,
        a: Vec<G1Affine>,
        b1: Vec<G1Affine>,
        b2: Vec<G2Affine>,
        l: Vec<G1Affine>,
        h: Vec<G1Affine>,
    }

    // 4 wires, 1 public signal, domain size 4, with one identity point in
    // the A query to exercise the (0, 0) encoding.
    fn sample_key(rng: &mut StdRng) -> TestKey {
        let g1 = |rng: &mut StdRng| G1Projective::rand(rng).into_affine();
        let g2 = |rng: &mut StdRng| G2Projective::rand(rng).into_affine();
        let mut a: Vec<G1Affine> = (0..4).map(|_| g1(rng)).collect();
        a[3] = G1Affine::identity();
        TestKey {
            alpha_g1: g1(rng),
            beta_g1: g1(rng),
            beta_g2: g2(rng),
            gamma_g2: g2(rng),
            delta_g1: g1(rng),
            delta_g2: g2(rng),
            ic: (0..2).map(|_| g1(rng)).collect(),
            a,
            b1: (0..4).map(|_| g1(rng)).collect(),
            b2: (0..4).map(|_| g2(rng)).collect(),
            l: (0..2).map(|_| g1(rng)).collect(),
            h: (0..4).map(|_| g1(rng)).collect(),
        }
    }

    fn encode_zkey(key: &TestKey) -> Vec<u8> {
        let mut scheme = Vec::new();
        scheme.write_u32::<LittleEndian>(1).unwrap();

        let mut header = Vec::new();
        header.write_u32::<LittleEndian>(32).unwrap();
        header.extend_from_slice(&Fq::MODULUS.to_bytes_le());
        header.write_u32::<LittleEndian>(32).unwrap();
        header.extend_from_slice(&Fr::MODULUS.to_bytes_le());
        header.write_u32::<LittleEndian>(4).unwrap(); // wires
        header.write_u32::<LittleEndian>(1).unwrap(); // public signals
        header.write_u32::<LittleEndian>(4).unwrap(); // domain size
        push_g1(&mut header, &key.alpha_g1);
        push_g1(&mut header, &key.beta_g1);
        push_g2(&mut header, &key.beta_g2);
        push_g2(&mut header, &key.gamma_g2);
        push_g1(&mut header, &key.delta_g1);
        push_g2(&mut header, &key.delta_g2);

        let mut ic = Vec::new();
        for p in &key.ic {
            push_g1(&mut ic, p);
        }

        // out = a * b plus the two input-consistency rows snarkjs appends
        let mut coeffs = Vec::new();
        coeffs.write_u32::<LittleEndian>(4).unwrap();
        for (matrix, constraint, signal) in [(0u32, 0u32, 2u32), (1, 0, 3), (0, 1, 0), (0, 2, 1)] {
            coeffs.write_u32::<LittleEndian>(matrix).unwrap();
            coeffs.write_u32::<LittleEndian>(constraint).unwrap();
            coeffs.write_u32::<LittleEndian>(signal).unwrap();
            push_fr_mont(&mut coeffs, &Fr::one());
        }

        let mut a = Vec::new();
        for p in &key.a {
            push_g1(&mut a, p);
        }
        let mut b1 = Vec::new();
        for p in &key.b1 {
            push_g1(&mut b1, p);
        }
        let mut b2 = Vec::new();
        for p in &key.b2 {
            push_g2(&mut b2, p);
        }
        let mut l = Vec::new();
        for p in &key.l {
            push_g1(&mut l, p);
        }
        let mut h = Vec::new();
        for p in &key.h {
            push_g1(&mut h, p);
        }

        let sections: [(u32, &Vec<u8>); 9] = [
            (1, &scheme),
            (2, &header),
            (3, &ic),
            (4, &coeffs),
            (5, &a),
            (6, &b1),
            (7, &b2),
            (8, &l),
            (9, &h),
        ];
        let mut out = Vec::new();
        out.extend_from_slice(b"zkey");
        out.write_u32::<LittleEndian>(1).unwrap();
        out.write_u32::<LittleEndian>(sections.len() as u32).unwrap();
        for (id, body) in sections {
            out.write_u32::<LittleEndian>(id).unwrap();
            out.write_u64::<LittleEndian>(body.len() as u64).unwrap();
            out.extend_from_slice(body);
        }
        out
    }

    #[test]
    fn test_parse_round_trip() {
        let mut rng = test_rng();
        let key = sample_key(&mut rng);
        let pk = read_zkey(&mut Cursor::new(encode_zkey(&key))).unwrap();

        assert_eq!(pk.vk.alpha_g1, key.alpha_g1);
        assert_eq!(pk.vk.beta_g2, key.beta_g2);
        assert_eq!(pk.vk.gamma_g2, key.gamma_g2);
        assert_eq!(pk.vk.delta_g2, key.delta_g2);
        assert_eq!(pk.vk.ic, key.ic);
        assert_eq!(pk.beta_g1, key.beta_g1);
        assert_eq!(pk.delta_g1, key.delta_g1);
        assert_eq!(pk.a_query, key.a);
        assert!(pk.a_query[3].is_zero());
        assert_eq!(pk.b_g1_query, key.b1);
        assert_eq!(pk.b_g2_query, key.b2);
        assert_eq!(pk.l_query, key.l);
        assert_eq!(pk.h_query, key.h);
        assert_eq!(pk.num_wires(), 4);
        assert_eq!(pk.domain_size(), 4);
    }

    #[test]
    fn test_truncated_zkey() {
        let mut rng = test_rng();
        let bytes = encode_zkey(&sample_key(&mut rng));
        for cut in [bytes.len() - 1, bytes.len() / 2, 10] {
            assert!(read_zkey(&mut Cursor::new(&bytes[..cut])).is_err());
        }
    }

    #[test]
    fn test_wrong_scheme() {
        let mut rng = test_rng();
        let mut bytes = encode_zkey(&sample_key(&mut rng));
        // Section 1 payload starts right after the 12-byte file preamble and
        // the 12-byte section header.
        bytes[24] = 2;
        let err = read_zkey(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed(_)));
    }

    #[test]
    fn test_point_off_curve() {
        let mut rng = test_rng();
        let key = sample_key(&mut rng);
        let mut bytes = encode_zkey(&key);
        // Corrupt one byte of alpha_g1's x coordinate. The Groth16 header
        // payload starts at 12 + 12 + 4 + 12 = 40; the moduli and counts
        // occupy 84 bytes before alpha.
        bytes[40 + 84] ^= 1;
        assert!(read_zkey(&mut Cursor::new(bytes)).is_err());
    }
}
