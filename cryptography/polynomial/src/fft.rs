use std::ops::{Add, Mul, Sub};

use bls12_381::{ff::Field, group::Group, G1Projective, Scalar};
use maybe_rayon::prelude::*;

/// Element types a radix-2 FFT can be run over: the scalar field itself
/// and the G1 group (where "multiplication by a scalar" is scalar
/// multiplication of the point).
pub(crate) trait FftElement:
    Sized + Copy + Send + Add<Output = Self> + Sub<Output = Self> + Mul<Scalar, Output = Self>
{
    fn zero() -> Self;
    fn is_zero(&self) -> bool;
}

impl FftElement for Scalar {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.is_zero_vartime()
    }
}

impl FftElement for G1Projective {
    fn zero() -> Self {
        Self::identity()
    }

    fn is_zero(&self) -> bool {
        self.is_identity().into()
    }
}

/// Iterative radix-2 decimation-in-time FFT.
///
/// `twiddles` must hold `[w^0, w^1, ..., w^{n/2 - 1}]` for the domain
/// generator `w`, in natural order; `values.len()` must equal `n`, a power
/// of two. Evaluations come out in natural order.
pub(crate) fn fft_inplace<T: FftElement>(twiddles: &[Scalar], values: &mut [T]) {
    let n = values.len();
    debug_assert!(n.is_power_of_two());
    debug_assert_eq!(twiddles.len(), n / 2);

    reverse_bit_order(values);

    let log_n = n.trailing_zeros();
    for layer in 0..log_n {
        let half_block = 1 << layer;
        // Twiddle exponents advance by `n / block` within a block.
        let twiddle_stride = n >> (layer + 1);

        values
            .maybe_par_chunks_mut(2 * half_block)
            .for_each(|block| {
                let (lo, hi) = block.split_at_mut(half_block);
                for (j, (a, b)) in lo.iter_mut().zip(hi).enumerate() {
                    butterfly(a, b, twiddles[j * twiddle_stride]);
                }
            });
    }
}

/// Butterfly step: `(a, b) <- (a + w*b, a - w*b)`.
#[inline]
fn butterfly<T: FftElement>(a: &mut T, b: &mut T, twiddle: Scalar) {
    // The scalar multiplication dominates for group elements; skip it for
    // the unit twiddle (every block of the first layer) and for identity
    // operands, which zero-padded G1 FFTs are full of.
    let t = if twiddle == Scalar::ONE || b.is_zero() {
        *b
    } else {
        *b * twiddle
    };
    let lo = *a;
    *a = lo + t;
    *b = lo - t;
}

/// Reverses the least significant `bits` bits of `n`.
pub const fn reverse_bits(n: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    n.reverse_bits() >> (usize::BITS - bits)
}

/// Applies the bit-reversal permutation to `values` in place: the element
/// at index `i` moves to the index whose binary representation is `i`
/// read backwards (in `log2(n)` bits).
///
/// The permutation is an involution, so applying it twice restores the
/// original order.
///
/// # Panics
/// Panics if the length is not a power of two. Empty slices are left
/// untouched.
pub fn reverse_bit_order<T>(values: &mut [T]) {
    if values.is_empty() {
        return;
    }

    let n = values.len();
    assert!(n.is_power_of_two(), "length must be a power of two");
    let log_n = n.trailing_zeros();

    for i in 0..n {
        let j = reverse_bits(i, log_n);
        // Each pair is visited twice; swap on the first visit only.
        if i < j {
            values.swap(i, j);
        }
    }
}

/// The first half of the domain's roots, `[w^0, ..., w^{n/2 - 1}]`, which
/// is exactly the twiddle set the FFT consumes.
pub(crate) fn compute_twiddles(generator: &Scalar, n: usize) -> Vec<Scalar> {
    let mut twiddles = Vec::with_capacity(n / 2);
    let mut power = Scalar::ONE;
    for _ in 0..n / 2 {
        twiddles.push(power);
        power *= generator;
    }
    twiddles
}
