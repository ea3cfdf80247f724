use bls12_381::{
    fixed_base_msm::FixedBasePrecomp, g1_batch_normalize, group::prime::PrimeCurveAffine, G1Point,
    Scalar,
};
use polynomial::{domain::Domain, poly_coeff::PolyCoeff, reverse_bit_order};

use crate::{
    commit_key::CommitKey,
    fk20::{
        batch_toeplitz::BatchToeplitz,
        h_poly::{compute_h_poly_commitments, take_every_nth},
    },
};

/// The two shapes a polynomial arrives in.
pub enum ProverInput {
    /// Monomial coefficients.
    Coefficients(PolyCoeff),
    /// Evaluations over the bit-reversal-permuted domain, i.e. the order
    /// blob data is laid out in. The first `poly_len` output evaluations
    /// then reproduce the input verbatim, which is what makes this
    /// ordering worth the extra permutation.
    BitReversedEvaluations(Vec<Scalar>),
}

/// Prover for KZG multi-point openings over cosets of the roots of unity,
/// using the FK20 algorithm to produce every proof in one batch.
///
/// FK20 only works when the opening points are (cosets of) roots of unity;
/// arbitrary points need the generic single-point scheme.
///
/// See [the FK20 paper](https://github.com/khovratovich/Kate/blob/master/Kate_amortized.pdf).
#[derive(Debug)]
pub struct MultiOpenProver {
    /// Precomputed Toeplitz column cache over windows of the SRS.
    batch_toeplitz: BatchToeplitz,
    /// Number of points a single proof attests to (`l` in the paper).
    coset_size: usize,
    /// Total number of evaluation points across all cosets.
    num_points_to_open: usize,
    /// Domain of size `num_points_to_open / coset_size`; the proofs are an
    /// FFT over it.
    proof_domain: Domain,
    /// Domain of size `num_points_to_open`; the coset evaluations are an
    /// FFT over it.
    evaluation_domain: Domain,
    /// Domain of size `polynomial_bound`, for interpolating evaluation
    /// input back to coefficients.
    poly_domain: Domain,
    /// Monomial commitment key.
    commit_key: CommitKey,
}

impl MultiOpenProver {
    /// `polynomial_bound` is the coefficient count of the committed
    /// polynomials, `coset_size` the points per proof and
    /// `num_points_to_open` the total evaluation count; all powers of two.
    pub fn new(
        commit_key: CommitKey,
        polynomial_bound: usize,
        coset_size: usize,
        num_points_to_open: usize,
        precomp: FixedBasePrecomp,
    ) -> Self {
        assert!(coset_size.is_power_of_two());
        assert!(polynomial_bound.is_power_of_two());
        assert!(num_points_to_open.is_power_of_two());
        assert!(num_points_to_open > coset_size);
        assert!(commit_key.g1s.len() >= polynomial_bound);

        // The Toeplitz products run against strided windows of the SRS
        // read back-to-front, with the top `coset_size` points dropped —
        // the quotients never touch them, just as a single-point quotient
        // never needs the highest setup power.
        let srs_reversed_truncated: Vec<G1Point> = commit_key
            .g1s
            .iter()
            .rev()
            .skip(coset_size)
            .copied()
            .collect();
        let mut srs_windows = take_every_nth(&srs_reversed_truncated, coset_size);

        // Pad each window to a power of two with identity points. The FFT
        // would zero-pad anyway; doing it here keeps the fixed-base tables
        // uniform.
        for window in &mut srs_windows {
            window.resize(window.len().next_power_of_two(), G1Point::identity());
        }

        let batch_toeplitz = BatchToeplitz::new(srs_windows, precomp);

        let num_cosets = num_points_to_open / coset_size;

        Self {
            batch_toeplitz,
            coset_size,
            num_points_to_open,
            proof_domain: Domain::new(num_cosets),
            evaluation_domain: Domain::new(num_points_to_open),
            poly_domain: Domain::new(polynomial_bound),
            commit_key,
        }
    }

    /// Number of proofs a single opening produces.
    pub const fn num_cosets(&self) -> usize {
        self.num_points_to_open / self.coset_size
    }

    /// Brings either input shape into monomial form.
    fn into_coefficients(&self, input: ProverInput) -> PolyCoeff {
        match input {
            ProverInput::Coefficients(coefficients) => coefficients,
            ProverInput::BitReversedEvaluations(mut evaluations) => {
                // Undo the permutation, then interpolate.
                reverse_bit_order(&mut evaluations);
                self.poly_domain.ifft_scalars(evaluations)
            }
        }
    }

    /// KZG commitment to the polynomial.
    pub fn commit(&self, input: ProverInput) -> G1Point {
        let coefficients = self.into_coefficients(input);
        self.commit_key.commit_g1(&coefficients).into()
    }

    /// Evaluates the polynomial over the extended domain and groups the
    /// evaluations into bit-reversed-order cosets, without computing
    /// proofs.
    pub fn extend(&self, input: ProverInput) -> Vec<Vec<Scalar>> {
        let coefficients = self.into_coefficients(input);
        self.coset_evaluations(coefficients)
    }

    /// Computes every opening proof along with the coset evaluations they
    /// attest to. Proofs and evaluation sets share the same (bit-reversed
    /// coset index) order.
    pub fn open(&self, input: ProverInput) -> (Vec<G1Point>, Vec<Vec<Scalar>>) {
        let coefficients = self.into_coefficients(input);
        self.open_poly_coeff(coefficients)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn open_poly_coeff(&self, polynomial: PolyCoeff) -> (Vec<G1Point>, Vec<Vec<Scalar>>) {
        // The commitments to the h polynomials, FFT'd over the proof
        // domain, are exactly the per-coset proofs (in natural coset
        // order).
        let h_commitments =
            compute_h_poly_commitments(&self.batch_toeplitz, polynomial.clone(), self.coset_size);

        let mut proofs = {
            #[cfg(feature = "tracing")]
            let _span = tracing::info_span!("proof fft over h commitments").entered();
            self.proof_domain.fft_g1(h_commitments)
        };

        // Line the proofs up with the bit-reversed coset evaluations.
        reverse_bit_order(&mut proofs);

        (
            g1_batch_normalize(&proofs),
            self.coset_evaluations(polynomial),
        )
    }

    /// One extended-domain FFT, then a bit-reversal permutation: chunks of
    /// the result are the per-coset evaluation sets.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn coset_evaluations(&self, polynomial: PolyCoeff) -> Vec<Vec<Scalar>> {
        let mut evaluations = self.evaluation_domain.fft_scalars(polynomial);
        reverse_bit_order(&mut evaluations);
        evaluations
            .chunks_exact(self.coset_size)
            .map(<[Scalar]>::to_vec)
            .collect()
    }

    #[cfg(test)]
    pub(crate) const fn batch_toeplitz(&self) -> &BatchToeplitz {
        &self.batch_toeplitz
    }
}
