use blob_kzg::Error;

mod common;
use common::{as_blob_ref, counting_blob, ctx, non_canonical_blob, random_blob, zero_blob};

#[test]
fn zero_blob_commits_to_the_identity() {
    let blob = zero_blob();
    let commitment = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&blob))
        .expect("zero blob is valid");

    // Compressed encoding of the G1 identity: infinity flag set,
    // everything else zero.
    let mut identity = [0u8; 48];
    identity[0] = 0xc0;
    assert_eq!(commitment, identity);
}

#[test]
fn commitment_is_deterministic_and_blob_dependent() {
    let blob_a = random_blob(1);
    let blob_b = random_blob(2);

    let commitment_a = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&blob_a))
        .expect("valid blob");
    let commitment_a_again = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&blob_a))
        .expect("valid blob");
    let commitment_b = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&blob_b))
        .expect("valid blob");

    assert_eq!(commitment_a, commitment_a_again);
    assert_ne!(commitment_a, commitment_b);
}

#[test]
fn non_canonical_field_element_is_rejected() {
    for position in [0, 1, 4095] {
        let blob = non_canonical_blob(position);
        let result = ctx().blob_to_kzg_commitment(as_blob_ref(&blob));
        assert!(
            matches!(result, Err(Error::Serialization(_))),
            "blob with the modulus at element {position} must be rejected"
        );
    }
}

#[test]
fn structured_blob_commits_consistently_with_cells_pipeline() {
    // The FK20 prover commits through interpolation and the monomial
    // table; the blob path commits through the Lagrange table. Both must
    // agree on the same data.
    let blob = counting_blob(11);

    let commitment = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&blob))
        .expect("valid blob");

    let (cells, proofs) = ctx()
        .compute_cells_and_kzg_proofs(as_blob_ref(&blob))
        .expect("valid blob");
    let cell_indices: Vec<u64> = (0..cells.len() as u64).collect();
    let commitments = vec![&commitment; cells.len()];
    let cell_refs: Vec<_> = cells.iter().map(|cell| &**cell).collect();
    let proof_refs: Vec<_> = proofs.iter().collect();

    let valid = ctx()
        .verify_cell_kzg_proof_batch(commitments, &cell_indices, cell_refs, proof_refs)
        .expect("inputs are well-formed");
    assert!(valid);
}
