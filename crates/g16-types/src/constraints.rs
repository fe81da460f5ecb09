use ark_bn254::Fr;
use ark_ff::Zero;

/// Sparse linear combination over wire indices with scalar coefficients.
pub type LinearCombination = Vec<(usize, Fr)>;

/// One R1CS row: `(A·w) * (B·w) = (C·w)` for the full witness vector `w`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constraint {
    pub a: LinearCombination,
    pub b: LinearCombination,
    pub c: LinearCombination,
}

/// A rank-1 constraint system as parsed from a circuit description.
///
/// Wire `0` is the constant-one wire. Public signals occupy wires
/// `1 ..= num_public()` (outputs first, then public inputs); everything after
/// that is auxiliary (private inputs and intermediate signals). Immutable
/// once loaded.
#[derive(Clone, Debug)]
pub struct ConstraintSystem {
    pub num_public_inputs: usize,
    pub num_public_outputs: usize,
    pub num_private_inputs: usize,
    pub num_wires: usize,
    pub constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    /// Number of public signals (outputs + public inputs).
    pub fn num_public(&self) -> usize {
        self.num_public_outputs + self.num_public_inputs
    }

    /// Number of instance wires: the constant-one wire plus public signals.
    pub fn num_instance(&self) -> usize {
        1 + self.num_public()
    }

    /// Number of auxiliary (private) wires.
    pub fn num_aux(&self) -> usize {
        self.num_wires - self.num_instance()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The public-signal slice of a full witness vector.
    pub fn public_inputs<'a>(&self, witness: &'a [Fr]) -> &'a [Fr] {
        &witness[1..self.num_instance()]
    }

    /// Whether `witness` satisfies every constraint. `witness` must have
    /// length `num_wires` with `witness[0] == 1`.
    pub fn is_satisfied(&self, witness: &[Fr]) -> bool {
        if witness.len() != self.num_wires {
            return false;
        }
        self.constraints.iter().all(|row| {
            evaluate_lc(&row.a, witness) * evaluate_lc(&row.b, witness)
                == evaluate_lc(&row.c, witness)
        })
    }
}

/// Evaluate a sparse linear combination against a witness vector.
pub fn evaluate_lc(lc: &LinearCombination, witness: &[Fr]) -> Fr {
    lc.iter()
        .fold(Fr::zero(), |acc, (wire, coeff)| acc + witness[*wire] * coeff)
}
