pub mod commit_key;
mod fk20;
pub mod verification_key;

pub use fk20::{
    recover_evaluations_in_domain_order, CommitmentIndex, CosetIndex, MultiOpenProver,
    MultiOpenVerifier, ProverInput,
};

/// Builds a commitment/verification key pair from a hard-coded secret.
///
/// Test use only: the "trusted setup" secret is right here in the source.
#[cfg(test)]
pub(crate) fn insecure_keys_for_testing(
    num_coefficients: usize,
    coset_size: usize,
) -> (commit_key::CommitKey, verification_key::VerificationKey) {
    use bls12_381::{
        g1_batch_normalize, g2_batch_normalize, group::Group, traits::Field, G1Projective,
        G2Projective, Scalar,
    };

    let tau = -Scalar::from(1111u64);

    let g1_generator = G1Projective::generator();
    let mut tau_power = Scalar::ONE;
    let mut g1_points = Vec::with_capacity(num_coefficients);
    for _ in 0..num_coefficients {
        g1_points.push(g1_generator * tau_power);
        tau_power *= tau;
    }
    let g1_points = g1_batch_normalize(&g1_points);

    let g2_generator = G2Projective::generator();
    let mut tau_power = Scalar::ONE;
    let mut g2_points = Vec::with_capacity(coset_size + 1);
    // One more G2 element than the coset size: the verifier commits to the
    // degree-`coset_size` vanishing polynomial in G2.
    for _ in 0..=coset_size {
        g2_points.push(g2_generator * tau_power);
        tau_power *= tau;
    }
    let g2_points = g2_batch_normalize(&g2_points);

    let commit_key = commit_key::CommitKey::new(g1_points.clone());
    let verification_key = verification_key::VerificationKey::new(
        g1_points[..=coset_size].to_vec(),
        g2_points,
        coset_size,
        num_coefficients,
    );

    (commit_key, verification_key)
}
