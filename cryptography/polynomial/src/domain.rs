use bls12_381::{
    ff::{Field, PrimeField},
    group::Group,
    G1Projective, Scalar,
};

use crate::{
    coset_fft::CosetFFT,
    fft::{compute_twiddles, fft_inplace, reverse_bit_order},
    poly_coeff::PolyCoeff,
};

/// An evaluation domain: the group of n-th roots of unity in the scalar
/// field, with everything precomputed that the FFTs and the barycentric
/// evaluation formula need.
///
/// The roots are kept both in natural order (`roots[i] = w^i`) and in
/// bit-reversed order. Blob data is interpreted as evaluations over the
/// bit-reversed ordering, so that is the order the commitment scheme works
/// in; the FFTs work in natural order.
#[derive(Debug, Clone)]
pub struct Domain {
    /// The roots of unity in natural order: `roots[i] = w^i`.
    pub roots: Vec<Scalar>,
    /// The roots of unity with the bit-reversal permutation applied.
    pub bit_reversed_roots: Vec<Scalar>,
    /// Generator `w` of the domain; has multiplicative order `n`.
    pub generator: Scalar,
    /// Inverse of the generator, used by the inverse FFT.
    pub generator_inv: Scalar,
    /// The domain size `n` as a field element.
    pub size_as_scalar: Scalar,
    /// `1 / n`, the scaling factor of the inverse FFT and of the
    /// barycentric formula.
    pub size_inv: Scalar,
    /// Forward FFT twiddles `[w^0, ..., w^{n/2-1}]`.
    twiddles: Vec<Scalar>,
    /// Inverse FFT twiddles `[w^0, w^{-1}, ..., w^{-(n/2-1)}]`.
    inv_twiddles: Vec<Scalar>,
}

impl Domain {
    /// Creates the domain of the given size, rounded up to the next power
    /// of two.
    ///
    /// # Panics
    /// Panics if the rounded size exceeds the two-adicity of the scalar
    /// field (2^32), or if the derived generator fails its order check.
    pub fn new(size: usize) -> Self {
        let size = size.next_power_of_two();

        let generator = Self::generator_of_order(size);
        let generator_inv = generator.invert().expect("domain generator is nonzero");

        // The generator must have order exactly `size`: its size-th power
        // is one and, order being a power of two, it suffices that the
        // half-size power is not one.
        assert_eq!(
            generator.pow_vartime([size as u64]),
            Scalar::ONE,
            "domain generator does not have order {size}"
        );
        assert!(
            size == 1 || generator.pow_vartime([(size / 2) as u64]) != Scalar::ONE,
            "domain generator has order smaller than {size}"
        );

        let mut roots = Vec::with_capacity(size);
        let mut current = Scalar::ONE;
        for _ in 0..size {
            roots.push(current);
            current *= generator;
        }

        let mut bit_reversed_roots = roots.clone();
        reverse_bit_order(&mut bit_reversed_roots);

        let size_as_scalar = Scalar::from(size as u64);
        let size_inv = size_as_scalar.invert().expect("domain size is nonzero");

        let twiddles = compute_twiddles(&generator, size);
        let inv_twiddles = compute_twiddles(&generator_inv, size);

        Self {
            roots,
            bit_reversed_roots,
            generator,
            generator_inv,
            size_as_scalar,
            size_inv,
            twiddles,
            inv_twiddles,
        }
    }

    /// Derives a generator of order `size` from the field's largest
    /// power-of-two root of unity.
    fn generator_of_order(size: usize) -> Scalar {
        const TWO_ADICITY: u32 = 32;

        assert!(size.is_power_of_two());
        let log_size = size.trailing_zeros();
        assert!(
            log_size <= TWO_ADICITY,
            "domain of size 2^{log_size} exceeds the field's two-adicity"
        );

        // ROOT_OF_UNITY generates the full 2^32 subgroup; raising it to
        // 2^(32 - log_size) cuts the order down to `size`.
        Scalar::ROOT_OF_UNITY.pow_vartime([1u64 << (TWO_ADICITY - log_size)])
    }

    /// Number of points in the domain. Always a power of two.
    pub fn size(&self) -> usize {
        self.roots.len()
    }

    /// Evaluates the polynomial over the whole domain, in natural order.
    pub fn fft_scalars(&self, mut polynomial: PolyCoeff) -> Vec<Scalar> {
        polynomial.resize(self.size(), Scalar::ZERO);
        fft_inplace(&self.twiddles, &mut polynomial);
        polynomial.0
    }

    /// Interpolates evaluations over the domain back to monomial form.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn ifft_scalars(&self, mut evaluations: Vec<Scalar>) -> PolyCoeff {
        evaluations.resize(self.size(), Scalar::ZERO);
        fft_inplace(&self.inv_twiddles, &mut evaluations);

        for evaluation in &mut evaluations {
            *evaluation *= self.size_inv;
        }

        evaluations.into()
    }

    /// Evaluates the polynomial over the coset `g * H` of the domain `H`.
    pub fn coset_fft_scalars(&self, mut polynomial: PolyCoeff, coset: &CosetFFT) -> Vec<Scalar> {
        polynomial.resize(self.size(), Scalar::ZERO);

        // Substituting x -> g*x before a plain FFT evaluates over the coset.
        let mut scale = Scalar::ONE;
        for coefficient in &mut polynomial.0 {
            *coefficient *= scale;
            scale *= coset.generator;
        }

        fft_inplace(&self.twiddles, &mut polynomial);
        polynomial.0
    }

    /// Interpolates evaluations over the coset `g * H` back to monomial
    /// form.
    pub fn coset_ifft_scalars(&self, evaluations: Vec<Scalar>, coset: &CosetFFT) -> PolyCoeff {
        let mut coefficients = self.ifft_scalars(evaluations);

        let mut scale = Scalar::ONE;
        for coefficient in &mut coefficients.0 {
            *coefficient *= scale;
            scale *= coset.generator_inv;
        }

        coefficients
    }

    /// FFT over G1 group elements.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn fft_g1(&self, mut points: Vec<G1Projective>) -> Vec<G1Projective> {
        points.resize(self.size(), G1Projective::identity());
        fft_inplace(&self.twiddles, &mut points);
        points
    }

    /// Inverse FFT over G1 group elements.
    pub fn ifft_g1(&self, points: Vec<G1Projective>) -> Vec<G1Projective> {
        self.ifft_g1_take_n(points, None)
    }

    /// Inverse FFT over G1, returning only the first `n` outputs when `n`
    /// is supplied.
    ///
    /// The truncation happens before the `1/n` scaling, so the scalar
    /// multiplications for the discarded tail are never performed. Used by
    /// the circulant matrix product, which only needs the first half.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn ifft_g1_take_n(
        &self,
        mut points: Vec<G1Projective>,
        n: Option<usize>,
    ) -> Vec<G1Projective> {
        points.resize(self.size(), G1Projective::identity());
        fft_inplace(&self.inv_twiddles, &mut points);

        let keep = n.unwrap_or(points.len());
        assert!(keep <= points.len());
        points.truncate(keep);

        for point in &mut points {
            *point *= self.size_inv;
        }

        points
    }
}
