use bls12_381::{
    batch_inversion::batch_inverse,
    ff::{Field, PrimeField},
    Scalar,
};
use polynomial::{
    domain::Domain,
    poly_coeff::{vanishing_poly, PolyCoeff},
    CosetFFT,
};

use crate::errors::ErasureCodeError;

/// Reed-Solomon code over a roots-of-unity evaluation domain, with
/// erasure recovery specialised to *block-synchronised* erasures: the
/// codeword is viewed as `num_blocks` consecutive blocks of `block_size`
/// evaluations, and an erasure at position `p` means position `p` is
/// missing from every block.
///
/// That is exactly the erasure shape cell-based sampling produces — a
/// missing cell knocks out one position in each block of the
/// domain-ordered codeword — and it keeps the vanishing polynomial
/// construction cheap: a degree-`e` polynomial over the small block domain
/// is expanded to the full domain instead of multiplying out thousands of
/// linear factors.
#[derive(Debug)]
pub struct ReedSolomon {
    /// Number of coefficients in the message polynomial.
    poly_len: usize,
    /// Codeword length divided by `poly_len`.
    expansion_factor: usize,
    /// Domain of size `poly_len * expansion_factor`; evaluating over it
    /// encodes, interpolating over it decodes.
    evaluation_domain: Domain,
    /// Number of positions per block.
    block_size: usize,
    /// Number of blocks in a codeword.
    num_blocks: usize,
    /// Small domain of size `block_size`, used to build the vanishing
    /// polynomial of the missing positions.
    block_domain: Domain,
    /// Coset shift for the division step of recovery. The vanishing
    /// polynomial has all of its roots inside the evaluation domain, so
    /// dividing by it is only well-defined on a coset.
    coset: CosetFFT,
}

impl ReedSolomon {
    /// All three parameters must be powers of two so the FFT domains line
    /// up.
    pub fn new(poly_len: usize, expansion_factor: usize, block_size: usize) -> Self {
        assert!(
            poly_len.is_power_of_two()
                && expansion_factor.is_power_of_two()
                && block_size.is_power_of_two()
        );

        let codeword_len = poly_len * expansion_factor;
        assert!(block_size <= codeword_len);

        Self {
            poly_len,
            expansion_factor,
            evaluation_domain: Domain::new(codeword_len),
            block_size,
            num_blocks: codeword_len / block_size,
            block_domain: Domain::new(block_size),
            coset: CosetFFT::new(Scalar::MULTIPLICATIVE_GENERATOR),
        }
    }

    /// Number of evaluations in a codeword.
    pub const fn codeword_length(&self) -> usize {
        self.poly_len * self.expansion_factor
    }

    /// Largest number of missing block positions that recovery can
    /// correct: the codeword must retain at least `poly_len` evaluations.
    pub const fn max_correctable_erasures(&self) -> usize {
        (self.codeword_length() - self.poly_len) / self.num_blocks
    }

    /// Encodes a message polynomial (coefficient form) into a codeword by
    /// evaluating it over the full domain.
    pub fn encode(&self, message: PolyCoeff) -> Result<Vec<Scalar>, ErasureCodeError> {
        if message.len() > self.poly_len {
            return Err(ErasureCodeError::PolynomialTooLarge {
                num_coefficients: message.len(),
                max_num_coefficients: self.poly_len,
            });
        }
        Ok(self.evaluation_domain.fft_scalars(message))
    }

    /// Recovers the message polynomial from a codeword with
    /// block-synchronised erasures.
    ///
    /// `codeword` must contain the full `poly_len * expansion_factor`
    /// evaluations in domain order, with every erased position set to
    /// zero. `missing_positions` lists the in-block positions that are
    /// erased (in every block); order does not matter, entries must be
    /// unique and in range.
    ///
    /// This is the classic vanishing-polynomial recovery: with `Z`
    /// vanishing on all erased points, `(E * Z)` agrees with `(D * Z)`
    /// everywhere on the domain, so interpolating `E * Z` and dividing by
    /// `Z` on a coset (where `Z` has no roots) isolates the message `D`.
    pub fn recover_polynomial_coefficient(
        &self,
        codeword: Vec<Scalar>,
        missing_positions: &[usize],
    ) -> Result<PolyCoeff, ErasureCodeError> {
        assert_eq!(codeword.len(), self.codeword_length());

        let z_poly = self.vanishing_poly_of_missing_positions(missing_positions)?;

        // (E * Z) over the evaluation domain. Erased slots contribute
        // nothing regardless of the zero placeholder, because Z vanishes
        // there.
        let z_evals = self.evaluation_domain.fft_scalars(z_poly.clone());
        let ez_evals: Vec<_> = z_evals
            .iter()
            .zip(codeword)
            .map(|(z, e)| z * e)
            .collect();
        let ez_poly = self.evaluation_domain.ifft_scalars(ez_evals);

        // Divide (D * Z) by Z on a coset, where Z is nowhere zero.
        let dz_coset_evals = self.evaluation_domain.coset_fft_scalars(ez_poly, &self.coset);
        let mut z_coset_evals = self.evaluation_domain.coset_fft_scalars(z_poly, &self.coset);
        batch_inverse(&mut z_coset_evals)
            .expect("vanishing polynomial has no roots on the coset");

        let d_coset_evals: Vec<_> = dz_coset_evals
            .iter()
            .zip(z_coset_evals)
            .map(|(dz, z_inv)| dz * z_inv)
            .collect();

        let d_poly = self
            .evaluation_domain
            .coset_ifft_scalars(d_coset_evals, &self.coset);

        // A genuine codeword interpolates to a polynomial of degree below
        // `poly_len`; anything above must have vanished.
        for coefficient in d_poly.iter().skip(self.poly_len) {
            if *coefficient != Scalar::ZERO {
                return Err(ErasureCodeError::RecoveredPolynomialTooLarge {
                    num_coefficients: d_poly.len(),
                    expected_num_coefficients: self.poly_len,
                });
            }
        }

        Ok(d_poly[..self.poly_len].to_vec().into())
    }

    /// Builds `Z(x)` vanishing on `w^(p + k * block_size)` for every
    /// missing position `p` and every block `k` — without touching any
    /// root outside the erasures.
    ///
    /// The construction: build the polynomial vanishing on the missing
    /// positions of the *block domain*, then stretch it onto the full
    /// domain by spacing its coefficients `num_blocks` apart. Substituting
    /// `x^num_blocks` for `x` multiplies every root's preimage count by
    /// `num_blocks`, which lands the roots exactly on the synchronised
    /// erasure positions of every block.
    fn vanishing_poly_of_missing_positions(
        &self,
        missing_positions: &[usize],
    ) -> Result<PolyCoeff, ErasureCodeError> {
        for &position in missing_positions {
            if position >= self.block_size {
                return Err(ErasureCodeError::ErasureIndexOutOfRange {
                    index: position,
                    block_size: self.block_size,
                });
            }
        }
        if missing_positions.len() > self.max_correctable_erasures() {
            return Err(ErasureCodeError::TooManyErasures {
                num_erasures: missing_positions.len(),
                max_correctable: self.max_correctable_erasures(),
            });
        }

        let block_roots: Vec<_> = missing_positions
            .iter()
            .map(|&position| self.block_domain.roots[position])
            .collect();
        let block_vanishing = vanishing_poly(&block_roots);

        let mut stretched = vec![Scalar::ZERO; self.codeword_length()];
        for (i, coefficient) in block_vanishing.0.into_iter().enumerate() {
            // In bounds: the block vanishing polynomial has at most
            // max_correctable_erasures + 1 <= block_size coefficients, and
            // (block_size - 1) * num_blocks < codeword length.
            stretched[i * self.num_blocks] = coefficient;
        }

        Ok(stretched.into())
    }
}
