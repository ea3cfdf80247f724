#![allow(dead_code)]

use std::sync::OnceLock;

use bls12_381::{
    ff::Field, g1_batch_normalize, g2_batch_normalize, group::Group, G1Point, G1Projective,
    G2Point, G2Projective, Scalar,
};
use blob_kzg::{
    constants::{BYTES_PER_BLOB, FIELD_ELEMENTS_PER_BLOB, NUM_G2_POINTS},
    BlobRef, FixedBasePrecomp, KzgContext, TrustedSetup,
};
use polynomial::domain::Domain;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The "secret" of the test setup. Having it in the source is the point:
/// tests need to be reproducible, not secure.
const TEST_SECRET: u64 = 1337;

/// The raw point tables of the test setup, with the Lagrange table in
/// natural order (the order a setup file stores it in).
pub fn insecure_setup_points() -> (Vec<G1Point>, Vec<G1Point>, Vec<G2Point>) {
    let tau = Scalar::from(TEST_SECRET);

    let mut g1_monomial = Vec::with_capacity(FIELD_ELEMENTS_PER_BLOB);
    let mut tau_power = Scalar::ONE;
    for _ in 0..FIELD_ELEMENTS_PER_BLOB {
        g1_monomial.push(G1Projective::generator() * tau_power);
        tau_power *= tau;
    }

    // The Lagrange table is the G1 inverse FFT of the monomial table:
    // p(tau) = sum_i p(w_i) L_i(tau) = sum_j c_j tau^j for every p.
    let domain = Domain::new(FIELD_ELEMENTS_PER_BLOB);
    let g1_lagrange = domain.ifft_g1(g1_monomial.clone());

    let mut g2_monomial = Vec::with_capacity(NUM_G2_POINTS);
    let mut tau_power = Scalar::ONE;
    for _ in 0..NUM_G2_POINTS {
        g2_monomial.push(G2Projective::generator() * tau_power);
        tau_power *= tau;
    }

    (
        g1_batch_normalize(&g1_monomial),
        g1_batch_normalize(&g1_lagrange),
        g2_batch_normalize(&g2_monomial),
    )
}

pub fn insecure_trusted_setup() -> TrustedSetup {
    let (g1_monomial, g1_lagrange, g2_monomial) = insecure_setup_points();
    TrustedSetup::from_points(g1_monomial, g1_lagrange, g2_monomial)
        .expect("the generated test setup is consistent")
}

/// Shared context so every test in a binary pays the setup cost once.
pub fn ctx() -> &'static KzgContext {
    static CONTEXT: OnceLock<KzgContext> = OnceLock::new();
    CONTEXT.get_or_init(|| KzgContext::new(&insecure_trusted_setup(), FixedBasePrecomp::Disabled))
}

/// A blob of canonical field elements derived from the seed.
pub fn random_blob(seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..FIELD_ELEMENTS_PER_BLOB)
        .flat_map(|_| Scalar::random(&mut rng).to_bytes_be())
        .collect()
}

/// A blob whose field elements are the small scalars `offset, offset+1, ...`.
pub fn counting_blob(offset: u64) -> Vec<u8> {
    (0..FIELD_ELEMENTS_PER_BLOB as u64)
        .flat_map(|i| Scalar::from(offset + i).to_bytes_be())
        .collect()
}

pub fn zero_blob() -> Vec<u8> {
    vec![0u8; BYTES_PER_BLOB]
}

/// A blob with one non-canonical field element (the modulus) at the given
/// position.
pub fn non_canonical_blob(position: usize) -> Vec<u8> {
    const MODULUS_BE: [u8; 32] = [
        0x73, 0xED, 0xA7, 0x53, 0x29, 0x9D, 0x7D, 0x48, 0x33, 0x39, 0xD8, 0x08, 0x09, 0xA1, 0xD8,
        0x05, 0x53, 0xBD, 0xA4, 0x02, 0xFF, 0xFE, 0x5B, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
        0x00, 0x01,
    ];

    let mut blob = zero_blob();
    blob[position * 32..(position + 1) * 32].copy_from_slice(&MODULUS_BE);
    blob
}

pub fn as_blob_ref(blob: &[u8]) -> BlobRef<'_> {
    blob.try_into().expect("blob has BYTES_PER_BLOB bytes")
}

/// Picks `count` distinct indices out of `0..max` using the seed.
pub fn distinct_indices(seed: u64, count: usize, max: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<u64> = (0..max).collect();
    // Fisher-Yates, then truncate.
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}
