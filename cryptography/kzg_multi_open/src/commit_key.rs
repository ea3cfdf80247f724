use bls12_381::{lincomb::g1_lincomb, G1Point, G1Projective, Scalar};

/// Commitment key: the G1 powers of tau, `[tau^i]G1`, used to commit to
/// polynomials in monomial form.
#[derive(Debug, Clone)]
pub struct CommitKey {
    pub g1s: Vec<G1Point>,
}

impl CommitKey {
    pub fn new(g1s: Vec<G1Point>) -> Self {
        assert!(!g1s.is_empty(), "commitment key needs at least one point");
        Self { g1s }
    }

    /// Commits to a polynomial in monomial form. The polynomial may be
    /// shorter than the key; it must not be longer.
    pub fn commit_g1(&self, coefficients: &[Scalar]) -> G1Projective {
        assert!(
            self.g1s.len() >= coefficients.len(),
            "polynomial has more coefficients than the commitment key has points"
        );
        g1_lincomb(&self.g1s[..coefficients.len()], coefficients)
            .expect("point and scalar slices have equal length")
    }
}
