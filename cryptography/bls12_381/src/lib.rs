use pairing::{MillerLoopResult, MultiMillerLoop};
use traits::*;

pub mod batch_inversion;
pub mod fixed_base_msm;
pub mod lincomb;

// Re-export ff and group so that downstream crates do not need to import
// (and version) them independently.
pub use ff;
pub use group;

pub mod traits {
    pub use ff::{Field, PrimeField};
    pub use group::{prime::PrimeCurveAffine, Curve, Group};
}

/// Affine point in the BLS12-381 G1 group.
pub type G1Point = blstrs::G1Affine;

/// Projective point in the BLS12-381 G1 group.
pub type G1Projective = blstrs::G1Projective;

/// Affine point in the BLS12-381 G2 group.
pub type G2Point = blstrs::G2Affine;

/// Projective point in the BLS12-381 G2 group.
pub type G2Projective = blstrs::G2Projective;

/// G2 point with the Miller loop precomputation applied, for reuse across
/// pairings.
pub type G2Prepared = blstrs::G2Prepared;

/// Element of the BLS12-381 scalar field Fr.
pub type Scalar = blstrs::Scalar;

/// Number of bytes in the canonical serialization of a `Scalar`.
pub const SCALAR_SERIALIZED_SIZE: usize = 32;

/// Number of bytes in the compressed serialization of a `G1Point`.
pub const G1_COMPRESSED_SIZE: usize = 48;

/// Number of bytes in the compressed serialization of a `G2Point`.
pub const G2_COMPRESSED_SIZE: usize = 96;

/// Returns true when the product of the pairings `e(a_i, b_i)` over all
/// supplied pairs is the identity in the target group.
///
/// The two-pairing equality `e(a, b) == e(c, d)` is checked by passing
/// `(a, b)` and `(-c, d)` and testing the product against one.
pub fn multi_pairings(pairs: &[(&G1Point, &G2Prepared)]) -> bool {
    blstrs::Bls12::multi_miller_loop(pairs)
        .final_exponentiation()
        .is_identity()
        .into()
}

/// Converts a slice of projective points into affine form with a single
/// shared field inversion.
pub fn batch_normalize_points<T: PrimeCurveAffine>(points: &[T::Curve]) -> Vec<T>
where
    T::Curve: Curve<AffineRepr = T>,
{
    let mut affine = vec![T::identity(); points.len()];
    T::Curve::batch_normalize(points, &mut affine);
    affine
}

/// Batch-normalizes G1 projective points.
pub fn g1_batch_normalize(points: &[G1Projective]) -> Vec<G1Point> {
    batch_normalize_points(points)
}

/// Batch-normalizes G2 projective points.
pub fn g2_batch_normalize(points: &[G2Projective]) -> Vec<G2Point> {
    batch_normalize_points(points)
}

/// Returns `[1, r, r^2, ..., r^{n-1}]`.
pub fn compute_powers(base: Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;
    for _ in 0..n {
        powers.push(current);
        current *= base;
    }
    powers
}

/// Interprets 32 big-endian bytes as an integer and reduces it modulo the
/// scalar field order.
///
/// Unlike `Scalar::from_bytes_be`, values at or above the modulus are
/// accepted and wrapped. This is the right primitive for turning hash
/// output into a field element; canonical deserialization of untrusted
/// input must keep using the strict path.
pub fn reduce_bytes_to_scalar(bytes: [u8; 32]) -> Scalar {
    let mut reduced = blst::blst_fr::default();

    unsafe {
        // Load the bytes into a 256-bit blst scalar, then convert to Fr,
        // which performs the modular reduction.
        let mut wide = blst::blst_scalar::default();
        blst::blst_scalar_from_bendian(&mut wide, bytes.as_ptr());
        blst::blst_fr_from_scalar(&mut reduced, &wide);
    }

    Scalar::from(reduced)
}
