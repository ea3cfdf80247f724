use bls12_381::{
    lincomb::{g1_lincomb, g2_lincomb},
    G1Point, G1Projective, G2Point, G2Projective, Scalar,
};

/// Verification key for multi-point opening proofs.
///
/// Holds short prefixes of the G1 and G2 powers of tau: the verifier
/// commits to the interpolation polynomial in G1 and (conceptually) to the
/// degree-`coset_size` vanishing polynomial in G2, so it needs one more G2
/// point than the coset size and `coset_size + 1` G1 points.
#[derive(Debug, Clone)]
pub struct VerificationKey {
    /// `[tau^i]G1` for `i` in `0..=coset_size`.
    pub g1s: Vec<G1Point>,
    /// `[tau^i]G2` for `i` in `0..=coset_size`.
    pub g2s: Vec<G2Point>,
    /// `[1]G2`, cached from `g2s[0]`.
    pub g2_gen: G2Point,
    /// Number of evaluation points a single proof attests to.
    pub coset_size: usize,
    /// Number of coefficients in the committed polynomials the proofs
    /// speak about.
    pub num_coefficients_in_polynomial: usize,
}

impl VerificationKey {
    pub fn new(
        g1s: Vec<G1Point>,
        g2s: Vec<G2Point>,
        coset_size: usize,
        num_coefficients_in_polynomial: usize,
    ) -> Self {
        assert!(
            coset_size < g2s.len(),
            "the verifier needs tau^coset_size in G2, so the key must hold coset_size + 1 G2 points"
        );
        let g2_gen = g2s[0];

        Self {
            g1s,
            g2s,
            g2_gen,
            coset_size,
            num_coefficients_in_polynomial,
        }
    }

    /// Commits to a polynomial in monomial form over G1.
    pub fn commit_g1(&self, coefficients: &[Scalar]) -> G1Projective {
        assert!(self.g1s.len() >= coefficients.len());
        g1_lincomb(&self.g1s[..coefficients.len()], coefficients)
            .expect("point and scalar slices have equal length")
    }

    /// Commits to a polynomial in monomial form over G2.
    pub fn commit_g2(&self, coefficients: &[Scalar]) -> G2Projective {
        assert!(self.g2s.len() >= coefficients.len());
        g2_lincomb(&self.g2s[..coefficients.len()], coefficients)
            .expect("point and scalar slices have equal length")
    }

    pub fn g2_gen(&self) -> G2Point {
        self.g2_gen
    }
}
