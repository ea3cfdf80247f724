#[cfg(all(feature = "singlethreaded", feature = "multithreaded"))]
compile_error!("`singlethreaded` and `multithreaded` cannot be enabled simultaneously");

pub mod constants;

mod errors;
mod fiat_shamir;
mod prover;
mod recovery;
mod serialization;
mod single_open;
mod trusted_setup;
mod verifier;

pub use bls12_381::fixed_base_msm::{FixedBasePrecomp, InvalidWindowBits};
pub use errors::{Error, RecoveryError, SerializationError, SetupError, VerifierError};
pub use trusted_setup::TrustedSetup;

use constants::{BYTES_PER_BLOB, BYTES_PER_CELL, BYTES_PER_COMMITMENT, BYTES_PER_FIELD_ELEMENT};
use prover::ProverContext;
use verifier::VerifierContext;

/// Reference to an opaque blob. The library only ever borrows blobs; it
/// never constructs one, which is why there is no owned blob type.
pub type BlobRef<'a> = &'a [u8; BYTES_PER_BLOB];

/// Reference to an untrusted 48-byte input: a purported commitment or
/// proof that has not been decompressed or subgroup-checked yet.
pub type Bytes48Ref<'a> = &'a [u8; BYTES_PER_COMMITMENT];

/// One cell of an extended blob: 64 field elements of coset evaluations.
/// Heap-allocated, since outputs carry 128 of them.
pub type Cell = Box<[u8; BYTES_PER_CELL]>;

/// Reference to a cell.
pub type CellRef<'a> = &'a [u8; BYTES_PER_CELL];

/// A 48-byte commitment to a blob polynomial.
pub type KZGCommitment = [u8; BYTES_PER_COMMITMENT];

/// A 48-byte opening proof: for EIP-4844 a single-point opening, for
/// EIP-7594 the opening of one cell's coset.
pub type KZGProof = [u8; BYTES_PER_COMMITMENT];

/// The canonical 32-byte serialization of a field element.
pub type SerializedScalar = [u8; BYTES_PER_FIELD_ELEMENT];

/// Identifies which of the 128 cells of an extended blob is meant. Both
/// sides derive the underlying evaluation coset from the index, so the
/// index is all that goes over the wire.
pub type CellIndex = kzg_multi_open::CosetIndex;

/// All state needed to commit to blobs and create and verify proofs about
/// them: the EIP-4844 single-opening operations and the EIP-7594 cell
/// operations.
///
/// Construction does all the precomputation (domains, FK20 column FFTs
/// and, when enabled, fixed-base MSM tables); the finished context is
/// immutable, so any number of threads can use it concurrently through a
/// shared reference.
#[derive(Debug)]
pub struct KzgContext {
    prover_ctx: ProverContext,
    verifier_ctx: VerifierContext,
}

impl KzgContext {
    /// Builds a context from a loaded trusted setup.
    ///
    /// `precomp` selects how much memory to spend on fixed-base MSM
    /// tables for cell proof generation; [`FixedBasePrecomp::Disabled`]
    /// spends none, `WindowBits(8)` is the usual prover choice at
    /// roughly 100 MiB.
    pub fn new(trusted_setup: &TrustedSetup, precomp: FixedBasePrecomp) -> Self {
        Self {
            prover_ctx: ProverContext::new(trusted_setup, precomp),
            verifier_ctx: VerifierContext::new(trusted_setup),
        }
    }
}
