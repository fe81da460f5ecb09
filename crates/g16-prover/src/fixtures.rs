//! Test fixtures: tiny circuits and an insecure key generator.
//!
//! The generator samples the toxic waste directly so the pipeline can be
//! exercised end to end in tests without ceremony artifacts. Never use it
//! outside tests.

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, Zero};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use ark_std::rand::{CryptoRng, RngCore};
use ark_std::UniformRand;

use g16_types::{Constraint, ConstraintSystem, ProvingKey, VerifyingKey};

type Domain = Radix2EvaluationDomain<Fr>;

/// `out = a * b`; wires `[1, out, a, b]`, one public output.
pub fn product_circuit() -> ConstraintSystem {
    ConstraintSystem {
        num_public_inputs: 0,
        num_public_outputs: 1,
        num_private_inputs: 2,
        num_wires: 4,
        constraints: vec![Constraint {
            a: vec![(2, Fr::one())],
            b: vec![(3, Fr::one())],
            c: vec![(1, Fr::one())],
        }],
    }
}

pub fn product_witness(a: u64, b: u64) -> Vec<Fr> {
    vec![
        Fr::one(),
        Fr::from(a) * Fr::from(b),
        Fr::from(a),
        Fr::from(b),
    ]
}

/// `out = a + b`: same shape as the product circuit, different relation;
/// used for cross-circuit rejection tests.
pub fn sum_circuit() -> ConstraintSystem {
    ConstraintSystem {
        num_public_inputs: 0,
        num_public_outputs: 1,
        num_private_inputs: 2,
        num_wires: 4,
        constraints: vec![Constraint {
            a: vec![(2, Fr::one()), (3, Fr::one())],
            b: vec![(0, Fr::one())],
            c: vec![(1, Fr::one())],
        }],
    }
}

pub fn sum_witness(a: u64, b: u64) -> Vec<Fr> {
    vec![
        Fr::one(),
        Fr::from(a) + Fr::from(b),
        Fr::from(a),
        Fr::from(b),
    ]
}

/// Groth16 key generation from freshly sampled toxic waste.
pub fn insecure_setup<R: RngCore + CryptoRng>(cs: &ConstraintSystem, rng: &mut R) -> ProvingKey {
    let domain = Domain::new(cs.num_constraints() + cs.num_instance())
        .expect("fixture circuit exceeds the FFT domain");
    let n = domain.size();

    let tau = Fr::rand(rng);
    let alpha = Fr::rand(rng);
    let beta = Fr::rand(rng);
    let gamma = Fr::rand(rng);
    let delta = Fr::rand(rng);

    // Per-wire QAP evaluations at tau, including the input-consistency rows
    // the witness map adds for the instance wires.
    let lagrange = domain.evaluate_all_lagrange_coefficients(tau);
    let mut a_t = vec![Fr::zero(); cs.num_wires];
    let mut b_t = vec![Fr::zero(); cs.num_wires];
    let mut c_t = vec![Fr::zero(); cs.num_wires];
    for (row, constraint) in cs.constraints.iter().enumerate() {
        for (wire, coeff) in &constraint.a {
            a_t[*wire] += lagrange[row] * coeff;
        }
        for (wire, coeff) in &constraint.b {
            b_t[*wire] += lagrange[row] * coeff;
        }
        for (wire, coeff) in &constraint.c {
            c_t[*wire] += lagrange[row] * coeff;
        }
    }
    for i in 0..cs.num_instance() {
        a_t[i] += lagrange[cs.num_constraints() + i];
    }

    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();
    let gamma_inv = gamma.inverse().expect("gamma is nonzero");
    let delta_inv = delta.inverse().expect("delta is nonzero");

    let ic = (0..cs.num_instance())
        .map(|i| (g1 * ((beta * a_t[i] + alpha * b_t[i] + c_t[i]) * gamma_inv)).into_affine())
        .collect();
    let l_query = (cs.num_instance()..cs.num_wires)
        .map(|i| (g1 * ((beta * a_t[i] + alpha * b_t[i] + c_t[i]) * delta_inv)).into_affine())
        .collect();
    let a_query = a_t.iter().map(|v| (g1 * v).into_affine()).collect();
    let b_g1_query = b_t.iter().map(|v| (g1 * v).into_affine()).collect();
    let b_g2_query = b_t.iter().map(|v| (g2 * v).into_affine()).collect();

    // H points live over the odd coset of the doubled domain, where the base
    // domain's vanishing polynomial is the constant eta^n - 1. Scaling the
    // coset Lagrange basis by Z(tau) / ((eta^n - 1) * delta) makes the
    // prover's quotient evaluations land on H(tau) * Z(tau) / delta.
    let eta = Domain::new(2 * n)
        .expect("fixture circuit exceeds the FFT domain")
        .element(1);
    let coset = domain.get_coset(eta).expect("coset of the base domain");
    let coset_lagrange = coset.evaluate_all_lagrange_coefficients(tau);
    let z_tau = domain.evaluate_vanishing_polynomial(tau);
    let h_scale = z_tau
        * (eta.pow([n as u64]) - Fr::one())
            .inverse()
            .expect("eta^n != 1 on the odd coset")
        * delta_inv;
    let h_query = coset_lagrange
        .iter()
        .map(|l| (g1 * (h_scale * l)).into_affine())
        .collect();

    ProvingKey {
        vk: VerifyingKey {
            alpha_g1: (g1 * alpha).into_affine(),
            beta_g2: (g2 * beta).into_affine(),
            gamma_g2: (g2 * gamma).into_affine(),
            delta_g2: (g2 * delta).into_affine(),
            ic,
        },
        beta_g1: (g1 * beta).into_affine(),
        delta_g1: (g1 * delta).into_affine(),
        a_query,
        b_g1_query,
        b_g2_query,
        h_query,
        l_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_fixture_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let cs = product_circuit();
        let pk = insecure_setup(&cs, &mut rng);

        assert_eq!(pk.num_wires(), cs.num_wires);
        assert_eq!(pk.vk.ic.len(), cs.num_instance());
        assert_eq!(pk.l_query.len(), cs.num_aux());
        assert_eq!(pk.domain_size(), 4);
        assert!(cs.is_satisfied(&product_witness(3, 5)));
        assert!(sum_circuit().is_satisfied(&sum_witness(3, 5)));
    }
}
