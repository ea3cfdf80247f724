//! Fiat-Shamir challenge derivation for the blob proof paths.
//!
//! Every challenge hashes a 16-byte ASCII domain separator, the protocol
//! degree and all data being bound, then reduces the SHA-256 digest into
//! Fr. The reduction is biased relative to uniform, but the challenges
//! only need ~128 bits of entropy for soundness, so the bias is
//! irrelevant; see the randomizers discussion in
//! <https://cr.yp.to/badbatch/badbatch-20120919.pdf>.

use bls12_381::{compute_powers, reduce_bytes_to_scalar, Scalar};
use sha2::{Digest, Sha256};
use std::mem::size_of;

use crate::{
    constants::{
        BYTES_PER_BLOB, BYTES_PER_COMMITMENT, BYTES_PER_FIELD_ELEMENT, BYTES_PER_PROOF,
        FIELD_ELEMENTS_PER_BLOB,
    },
    BlobRef, KZGCommitment, KZGProof,
};

/// Domain separator of the per-blob evaluation challenge.
const BLOB_CHALLENGE_DOMAIN: &[u8; 16] = b"FSBLOBVERIFY_V1_";

/// Domain separator of the blob batch-verification challenge.
const BATCH_CHALLENGE_DOMAIN: &[u8; 16] = b"RCKZGBATCH___V1_";

/// Derives the evaluation point binding a blob to its commitment.
///
/// Hash layout: domain separator, the blob length as a 16-byte big-endian
/// integer (so the high eight bytes are zero), the blob, the commitment.
pub(crate) fn compute_blob_challenge(blob: BlobRef, commitment: &KZGCommitment) -> Scalar {
    let hash_input_size =
        BLOB_CHALLENGE_DOMAIN.len() + 2 * size_of::<u64>() + BYTES_PER_BLOB + BYTES_PER_COMMITMENT;

    let mut hash_input: Vec<u8> = Vec::with_capacity(hash_input_size);
    hash_input.extend(BLOB_CHALLENGE_DOMAIN);
    hash_input.extend([0u8; size_of::<u64>()]);
    hash_input.extend((FIELD_ELEMENTS_PER_BLOB as u64).to_be_bytes());
    hash_input.extend(blob);
    hash_input.extend(commitment);

    assert_eq!(hash_input.len(), hash_input_size);

    let digest: [u8; 32] = Sha256::digest(hash_input).into();
    reduce_bytes_to_scalar(digest)
}

/// Derives the batch challenge `r` over all openings being verified
/// together and returns its powers `[1, r, ..., r^{n-1}]`, one weight per
/// opening.
///
/// Hash layout: domain separator, the blob length and the batch size as
/// big-endian u64s, then per opening `commitment || z || y || proof`.
pub(crate) fn compute_batch_challenge_powers(
    commitments: &[KZGCommitment],
    zs: &[Scalar],
    ys: &[Scalar],
    proofs: &[KZGProof],
) -> Vec<Scalar> {
    let n = commitments.len();
    assert!(n == zs.len() && n == ys.len() && n == proofs.len());

    let hash_input_size = BATCH_CHALLENGE_DOMAIN.len()
        + 2 * size_of::<u64>()
        + n * (BYTES_PER_COMMITMENT + 2 * BYTES_PER_FIELD_ELEMENT + BYTES_PER_PROOF);

    let mut hash_input: Vec<u8> = Vec::with_capacity(hash_input_size);
    hash_input.extend(BATCH_CHALLENGE_DOMAIN);
    hash_input.extend((FIELD_ELEMENTS_PER_BLOB as u64).to_be_bytes());
    hash_input.extend((n as u64).to_be_bytes());

    for (((commitment, z), y), proof) in commitments.iter().zip(zs).zip(ys).zip(proofs) {
        hash_input.extend(commitment);
        hash_input.extend(z.to_bytes_be());
        hash_input.extend(y.to_bytes_be());
        hash_input.extend(proof);
    }

    assert_eq!(hash_input.len(), hash_input_size);

    let digest: [u8; 32] = Sha256::digest(hash_input).into();
    let r = reduce_bytes_to_scalar(digest);

    compute_powers(r, n)
}
