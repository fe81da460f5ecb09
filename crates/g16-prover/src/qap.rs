// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! R1CS → QAP witness map.
//!
//! The proving key's H points are generated against the odd coset of the
//! doubled evaluation domain, where the base domain's vanishing polynomial
//! is a nonzero constant. Evaluating `A·B - C` there yields the quotient
//! polynomial up to that constant, which the key already absorbs, so no
//! polynomial division happens at proving time.

use ark_bn254::Fr;
use ark_ff::Zero;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};

use g16_types::{evaluate_lc, ConstraintSystem};

use crate::error::ProveError;

type Domain = Radix2EvaluationDomain<Fr>;

/// The evaluation domain used for a constraint system: the constraint rows
/// plus one input-consistency row per instance wire.
pub fn domain_for(cs: &ConstraintSystem) -> Result<Domain, ProveError> {
    Domain::new(cs.num_constraints() + cs.num_instance()).ok_or(ProveError::CircuitTooLarge)
}

/// Evaluations of `A·B - C` over the shifted domain, ready to combine with
/// the proving key's H query. `witness` must already have been checked
/// against the circuit's wire count.
pub fn witness_quotient_evals(
    cs: &ConstraintSystem,
    witness: &[Fr],
) -> Result<Vec<Fr>, ProveError> {
    let num_constraints = cs.num_constraints();
    let num_instance = cs.num_instance();
    let domain = domain_for(cs)?;
    let domain_size = domain.size();

    let mut a = vec![Fr::zero(); domain_size];
    let mut b = vec![Fr::zero(); domain_size];
    for (row, constraint) in cs.constraints.iter().enumerate() {
        a[row] = evaluate_lc(&constraint.a, witness);
        b[row] = evaluate_lc(&constraint.b, witness);
    }
    // Input-consistency rows pin the instance wires.
    for (i, value) in witness[..num_instance].iter().enumerate() {
        a[num_constraints + i] = *value;
    }

    // A satisfying witness has C·w = (A·w)∘(B·w) row by row, which is the
    // form the key generator assumes.
    let mut c = vec![Fr::zero(); domain_size];
    for row in 0..num_constraints {
        c[row] = a[row] * b[row];
    }

    domain.ifft_in_place(&mut a);
    domain.ifft_in_place(&mut b);

    let shift = Domain::new(2 * domain_size)
        .ok_or(ProveError::CircuitTooLarge)?
        .element(1);
    Domain::distribute_powers(&mut a, shift);
    Domain::distribute_powers(&mut b, shift);

    domain.fft_in_place(&mut a);
    domain.fft_in_place(&mut b);

    let mut ab = domain.mul_polynomials_in_evaluation_domain(&a, &b);
    drop(a);
    drop(b);

    domain.ifft_in_place(&mut c);
    Domain::distribute_powers(&mut c, shift);
    domain.fft_in_place(&mut c);

    for (ab_i, c_i) in ab.iter_mut().zip(c) {
        *ab_i -= &c_i;
    }
    Ok(ab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{product_circuit, product_witness};
    use ark_poly::univariate::DensePolynomial;
    use ark_poly::{DenseUVPolynomial, Polynomial};

    /// Interpolate the evaluations the witness map starts from, so the
    /// shifted-domain output can be cross-checked against direct evaluation.
    fn interpolated(
        cs: &ConstraintSystem,
        witness: &[Fr],
        pick: impl Fn(&g16_types::Constraint) -> &g16_types::LinearCombination,
        with_instance_rows: bool,
    ) -> DensePolynomial<Fr> {
        let domain = domain_for(cs).unwrap();
        let mut evals = vec![Fr::zero(); domain.size()];
        for (row, constraint) in cs.constraints.iter().enumerate() {
            evals[row] = evaluate_lc(pick(constraint), witness);
        }
        if with_instance_rows {
            for (i, value) in witness[..cs.num_instance()].iter().enumerate() {
                evals[cs.num_constraints() + i] = *value;
            }
        }
        DensePolynomial::from_coefficients_vec(domain.ifft(&evals))
    }

    #[test]
    fn test_quotient_matches_direct_evaluation() {
        let cs = product_circuit();
        let witness = product_witness(3, 5);
        let h_evals = witness_quotient_evals(&cs, &witness).unwrap();

        let domain = domain_for(&cs).unwrap();
        assert_eq!(h_evals.len(), domain.size());

        let a_poly = interpolated(&cs, &witness, |c| &c.a, true);
        let b_poly = interpolated(&cs, &witness, |c| &c.b, false);
        let c_poly = interpolated(&cs, &witness, |c| &c.c, false);

        let shift = Domain::new(2 * domain.size()).unwrap().element(1);
        for (i, h) in h_evals.iter().enumerate() {
            let point = shift * domain.element(i);
            let direct = a_poly.evaluate(&point) * b_poly.evaluate(&point)
                - c_poly.evaluate(&point);
            assert_eq!(*h, direct, "mismatch at coset point {i}");
        }
    }

    #[test]
    fn test_numerator_vanishes_on_base_domain() {
        // A·B - C must be divisible by the vanishing polynomial, i.e. zero
        // on every base-domain point, for a satisfying witness.
        let cs = product_circuit();
        let witness = product_witness(7, 11);
        let domain = domain_for(&cs).unwrap();

        let a_poly = interpolated(&cs, &witness, |c| &c.a, true);
        let b_poly = interpolated(&cs, &witness, |c| &c.b, false);
        let c_poly = interpolated(&cs, &witness, |c| &c.c, false);

        for i in 0..domain.size() {
            let point = domain.element(i);
            assert_eq!(
                a_poly.evaluate(&point) * b_poly.evaluate(&point),
                c_poly.evaluate(&point)
            );
        }
    }
}
