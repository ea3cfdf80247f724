use blst::blst_p1_affine;
use blstrs::Fp;
use ff::PrimeField;

use crate::{lincomb::g1_lincomb, G1Point, G1Projective, Scalar};

/// Precomputation policy for fixed-base multi-scalar multiplications.
///
/// Table memory grows as `2^bits` per point, so the window width is an
/// explicit configuration choice rather than something inferred: 8 bits
/// costs on the order of 100 MiB across a full FK20 column cache and is
/// the usual choice for provers, while `Disabled` keeps only the bare
/// generator points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FixedBasePrecomp {
    /// No tables; every MSM falls back to [`g1_lincomb`].
    Disabled,
    /// Windowed tables with the given window width in bits.
    WindowBits(usize),
}

/// The raw precompute parameter was outside `[0, 15]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWindowBits {
    pub bits: u64,
}

impl FixedBasePrecomp {
    /// Largest accepted window width.
    pub const MAX_WINDOW_BITS: u64 = 15;

    /// Maps the raw wire-level precompute parameter to a policy:
    /// `0` disables precomputation, `1..=15` selects a window width and
    /// anything larger is rejected.
    pub const fn from_bits(bits: u64) -> Result<Self, InvalidWindowBits> {
        match bits {
            0 => Ok(Self::Disabled),
            1..=Self::MAX_WINDOW_BITS => Ok(Self::WindowBits(bits as usize)),
            _ => Err(InvalidWindowBits { bits }),
        }
    }
}

/// Multi-scalar multiplication against a set of points fixed at
/// construction time, optionally backed by precomputed window tables.
#[derive(Debug)]
pub enum FixedBaseMsm {
    Precomp(FixedBaseTable),
    NoPrecomp(Vec<G1Point>),
}

impl FixedBaseMsm {
    pub fn new(generators: Vec<G1Point>, precomp: FixedBasePrecomp) -> Self {
        match precomp {
            FixedBasePrecomp::WindowBits(wbits) => {
                Self::Precomp(FixedBaseTable::new(&generators, wbits))
            }
            FixedBasePrecomp::Disabled => Self::NoPrecomp(generators),
        }
    }

    /// Computes `sum scalars[i] * generators[i]`.
    ///
    /// Panics if `scalars` does not have one entry per generator.
    pub fn msm(&self, scalars: &[Scalar]) -> G1Projective {
        match self {
            Self::Precomp(table) => table.msm(scalars),
            Self::NoPrecomp(generators) => g1_lincomb(generators, scalars)
                .expect("one scalar is supplied per fixed generator"),
        }
    }
}

/// Precomputed window table over a fixed set of G1 points, built on blst's
/// `p1s_mult_wbits` routines.
#[derive(Debug)]
pub struct FixedBaseTable {
    /// Multiples of every generator for a `wbits`-wide window.
    table: Vec<blst_p1_affine>,
    /// Window width the table was built for.
    wbits: usize,
    /// Number of fixed generator points.
    num_points: usize,
    /// Scratch size blst needs for an MSM over `num_points` points.
    /// Reported in bytes; we allocate limbs of that count, which
    /// overshoots and is fine as scratch.
    scratch_size: usize,
}

impl FixedBaseTable {
    pub fn new(generators: &[G1Point], wbits: usize) -> Self {
        let num_points = generators.len();

        // blst reports the table size in bytes.
        let table_len = unsafe {
            blst::blst_p1s_mult_wbits_precompute_sizeof(wbits, num_points)
                / std::mem::size_of::<blst_p1_affine>()
        };

        // The blst API takes a pointer to a pointer of points.
        let generator_refs: Vec<&G1Point> = generators.iter().collect();
        let points_arg = generator_refs.as_ptr().cast::<*const blst_p1_affine>();

        let mut table = vec![blst_p1_affine::default(); table_len];
        unsafe {
            blst::blst_p1s_mult_wbits_precompute(table.as_mut_ptr(), wbits, points_arg, num_points);
        }

        Self {
            table,
            wbits,
            num_points,
            scratch_size: unsafe { blst::blst_p1s_mult_wbits_scratch_sizeof(num_points) },
        }
    }

    pub fn msm(&self, scalars: &[Scalar]) -> G1Projective {
        const SCALAR_BITS: usize = Scalar::NUM_BITS as usize;

        assert_eq!(
            scalars.len(),
            self.num_points,
            "one scalar is supplied per fixed generator"
        );

        let raw_scalars: Vec<blst::blst_scalar> =
            scalars.iter().map(|s| (*s).into()).collect();
        let scalar_ptrs: Vec<*const u8> = raw_scalars.iter().map(|s| s.b.as_ptr()).collect();

        let mut result = blst::blst_p1::default();
        let mut scratch = Vec::<blst::limb_t>::with_capacity(self.scratch_size);

        unsafe {
            blst::blst_p1s_mult_wbits(
                &mut result,
                self.table.as_ptr(),
                self.wbits,
                self.num_points,
                scalar_ptrs.as_ptr(),
                SCALAR_BITS,
                scratch.as_mut_ptr(),
            );
        }

        G1Projective::from_raw_unchecked(
            Fp::from_raw_unchecked(result.x.l),
            Fp::from_raw_unchecked(result.y.l),
            Fp::from_raw_unchecked(result.z.l),
        )
    }
}
