use blob_kzg::{BlobRef, Bytes48Ref, Error};

mod common;
use common::{as_blob_ref, ctx, random_blob};

/// Builds `count` (blob, commitment, proof) triples.
fn valid_batch(count: usize) -> (Vec<Vec<u8>>, Vec<[u8; 48]>, Vec<[u8; 48]>) {
    let mut blobs = Vec::new();
    let mut commitments = Vec::new();
    let mut proofs = Vec::new();

    for i in 0..count {
        let blob = random_blob(100 + i as u64);
        let commitment = ctx()
            .blob_to_kzg_commitment(as_blob_ref(&blob))
            .expect("valid blob");
        let proof = ctx()
            .compute_blob_kzg_proof(as_blob_ref(&blob), &commitment)
            .expect("valid inputs");

        blobs.push(blob);
        commitments.push(commitment);
        proofs.push(proof);
    }

    (blobs, commitments, proofs)
}

fn refs<'a>(
    blobs: &'a [Vec<u8>],
    commitments: &'a [[u8; 48]],
    proofs: &'a [[u8; 48]],
) -> (Vec<BlobRef<'a>>, Vec<Bytes48Ref<'a>>, Vec<Bytes48Ref<'a>>) {
    (
        blobs.iter().map(|blob| as_blob_ref(blob)).collect(),
        commitments.iter().collect(),
        proofs.iter().collect(),
    )
}

#[test]
fn empty_batch_is_vacuously_valid() {
    let valid = ctx()
        .verify_blob_kzg_proof_batch(&[], &[], &[])
        .expect("empty batch is well-formed");
    assert!(valid);
}

#[test]
fn batch_of_one_agrees_with_single_verification() {
    let (blobs, commitments, proofs) = valid_batch(1);
    let (blob_refs, commitment_refs, proof_refs) = refs(&blobs, &commitments, &proofs);

    let batch_verdict = ctx()
        .verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs, &proof_refs)
        .expect("well-formed inputs");
    let single_verdict = ctx()
        .verify_blob_kzg_proof(blob_refs[0], commitment_refs[0], proof_refs[0])
        .expect("well-formed inputs");

    assert!(batch_verdict);
    assert_eq!(batch_verdict, single_verdict);
}

#[test]
fn valid_batch_verifies() {
    let (blobs, commitments, proofs) = valid_batch(4);
    let (blob_refs, commitment_refs, proof_refs) = refs(&blobs, &commitments, &proofs);

    let valid = ctx()
        .verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs, &proof_refs)
        .expect("well-formed inputs");
    assert!(valid);
}

#[test]
fn one_bad_element_fails_the_whole_batch() {
    let (blobs, commitments, mut proofs) = valid_batch(3);

    // Replace one proof with another valid point (the generator's
    // compressed form would do, but an honest proof for another blob is a
    // subtler corruption).
    let foreign_blob = random_blob(999);
    let foreign_commitment = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&foreign_blob))
        .expect("valid blob");
    proofs[1] = ctx()
        .compute_blob_kzg_proof(as_blob_ref(&foreign_blob), &foreign_commitment)
        .expect("valid inputs");

    let (blob_refs, commitment_refs, proof_refs) = refs(&blobs, &commitments, &proofs);
    let valid = ctx()
        .verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs, &proof_refs)
        .expect("well-formed inputs");
    assert!(!valid);
}

#[test]
fn mismatched_array_lengths_are_an_error() {
    let (blobs, commitments, proofs) = valid_batch(2);
    let (blob_refs, commitment_refs, proof_refs) = refs(&blobs, &commitments, &proofs);

    let result =
        ctx().verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs[..1], &proof_refs);
    assert!(matches!(result, Err(Error::Verifier(_))));
}

#[test]
fn unparseable_input_is_an_error_not_a_false() {
    let (blobs, mut commitments, proofs) = valid_batch(2);
    commitments[1] = [0xffu8; 48];

    let (blob_refs, commitment_refs, proof_refs) = refs(&blobs, &commitments, &proofs);
    let result = ctx().verify_blob_kzg_proof_batch(&blob_refs, &commitment_refs, &proof_refs);
    assert!(matches!(result, Err(Error::Serialization(_))));
}
