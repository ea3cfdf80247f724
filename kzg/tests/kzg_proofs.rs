use bls12_381::{ff::Field, Scalar};
use blob_kzg::{constants::FIELD_ELEMENTS_PER_BLOB, Error};
use polynomial::domain::Domain;

mod common;
use common::{as_blob_ref, ctx, non_canonical_blob, random_blob, zero_blob};

#[test]
fn proof_round_trip_at_arbitrary_points() {
    let blob = random_blob(10);
    let blob = as_blob_ref(&blob);

    let commitment = ctx().blob_to_kzg_commitment(blob).expect("valid blob");

    for z in [Scalar::ZERO, Scalar::from(42u64), -Scalar::from(9000u64)] {
        let z_bytes = z.to_bytes_be();
        let (proof, y_bytes) = ctx()
            .compute_kzg_proof(blob, z_bytes)
            .expect("valid inputs");

        let valid = ctx()
            .verify_kzg_proof(&commitment, &z_bytes, &y_bytes, &proof)
            .expect("well-formed inputs");
        assert!(valid, "honest proof must verify");
    }
}

#[test]
fn proof_round_trip_at_domain_points() {
    let blob = random_blob(11);
    let blob_ref = as_blob_ref(&blob);

    let commitment = ctx().blob_to_kzg_commitment(blob_ref).expect("valid blob");
    let domain = Domain::new(FIELD_ELEMENTS_PER_BLOB);

    for m in [0usize, 1, 77, FIELD_ELEMENTS_PER_BLOB - 1] {
        let z = domain.bit_reversed_roots[m];
        let (proof, y_bytes) = ctx()
            .compute_kzg_proof(blob_ref, z.to_bytes_be())
            .expect("valid inputs");

        // In-domain evaluation must be the stored blob element, read
        // straight out of the blob bytes.
        assert_eq!(
            &y_bytes[..],
            &blob[m * 32..(m + 1) * 32],
            "in-domain evaluation must return blob element {m}"
        );

        let valid = ctx()
            .verify_kzg_proof(&commitment, &z.to_bytes_be(), &y_bytes, &proof)
            .expect("well-formed inputs");
        assert!(valid);
    }
}

#[test]
fn zero_blob_proof_at_zero_is_the_identity() {
    let blob = zero_blob();
    let blob = as_blob_ref(&blob);

    let (proof, y_bytes) = ctx()
        .compute_kzg_proof(blob, [0u8; 32])
        .expect("valid inputs");

    let mut identity = [0u8; 48];
    identity[0] = 0xc0;
    assert_eq!(proof, identity);
    assert_eq!(y_bytes, [0u8; 32]);
}

#[test]
fn identity_quadruple_verifies() {
    let mut identity = [0u8; 48];
    identity[0] = 0xc0;

    let valid = ctx()
        .verify_kzg_proof(&identity, &[0u8; 32], &[0u8; 32], &identity)
        .expect("well-formed inputs");
    assert!(valid);
}

#[test]
fn tampering_makes_verification_return_false_not_error() {
    let blob = random_blob(12);
    let blob = as_blob_ref(&blob);

    let commitment = ctx().blob_to_kzg_commitment(blob).expect("valid blob");
    let z_bytes = Scalar::from(5u64).to_bytes_be();
    let (proof, y_bytes) = ctx().compute_kzg_proof(blob, z_bytes).expect("valid inputs");

    // Wrong claimed evaluation.
    let wrong_y = (Scalar::from_bytes_be(&y_bytes).unwrap() + Scalar::ONE).to_bytes_be();
    assert!(!ctx()
        .verify_kzg_proof(&commitment, &z_bytes, &wrong_y, &proof)
        .expect("well-formed inputs"));

    // Proof for a different blob.
    let other_blob = random_blob(13);
    let (other_proof, _) = ctx()
        .compute_kzg_proof(as_blob_ref(&other_blob), z_bytes)
        .expect("valid inputs");
    assert!(!ctx()
        .verify_kzg_proof(&commitment, &z_bytes, &y_bytes, &other_proof)
        .expect("well-formed inputs"));
}

#[test]
fn malformed_inputs_error_rather_than_return_false() {
    let blob = random_blob(14);
    let blob = as_blob_ref(&blob);
    let commitment = ctx().blob_to_kzg_commitment(blob).expect("valid blob");

    // Non-canonical z.
    let modulus_bytes = {
        let mut bytes = non_canonical_blob(0);
        bytes.truncate(32);
        <[u8; 32]>::try_from(bytes).unwrap()
    };
    assert!(matches!(
        ctx().compute_kzg_proof(blob, modulus_bytes),
        Err(Error::Serialization(_))
    ));

    // Garbage commitment bytes.
    let garbage = [0xffu8; 48];
    let z_bytes = [0u8; 32];
    assert!(matches!(
        ctx().verify_kzg_proof(&garbage, &z_bytes, &z_bytes, &garbage),
        Err(Error::Serialization(_))
    ));
}

#[test]
fn blob_proof_round_trip() {
    let blob = random_blob(15);
    let blob = as_blob_ref(&blob);

    let commitment = ctx().blob_to_kzg_commitment(blob).expect("valid blob");
    let proof = ctx()
        .compute_blob_kzg_proof(blob, &commitment)
        .expect("valid inputs");

    let valid = ctx()
        .verify_blob_kzg_proof(blob, &commitment, &proof)
        .expect("well-formed inputs");
    assert!(valid);

    // A proof bound to a different commitment must not verify.
    let other_blob = random_blob(16);
    let other_commitment = ctx()
        .blob_to_kzg_commitment(as_blob_ref(&other_blob))
        .expect("valid blob");
    let valid = ctx()
        .verify_blob_kzg_proof(blob, &other_commitment, &proof)
        .expect("well-formed inputs");
    assert!(!valid);
}
