use bls12_381::{
    batch_inversion::batch_inverse, compute_powers, ff::Field, g1_batch_normalize,
    lincomb::g1_lincomb, multi_pairings, reduce_bytes_to_scalar, G1Point, G2Prepared, Scalar,
    G1_COMPRESSED_SIZE, SCALAR_SERIALIZED_SIZE,
};
use polynomial::{domain::Domain, poly_coeff::PolyCoeff, reverse_bit_order};
use sha2::{Digest, Sha256};
use std::mem::size_of;

use crate::{fk20::cosets::coset_gens, verification_key::VerificationKey};

/// Index into a deduplicated commitment list.
pub type CommitmentIndex = u64;

/// Index of a coset (in bit-reversed coset order, the order proofs and
/// cells are produced in). The cell index of the public API.
pub type CosetIndex = u64;

/// Verifier for batches of multi-point opening proofs.
///
/// The proofs do not have to come from the FK20 prover — any valid
/// opening over the same cosets verifies — but in this workspace they
/// always do.
#[derive(Debug)]
pub struct MultiOpenVerifier {
    pub verification_key: VerificationKey,
    /// Domain of one coset (size = points per proof).
    coset_domain: Domain,
    /// `[tau^n]G2` with `n` the coset size, prepared once.
    tau_pow_n_g2: G2Prepared,
    /// `[-1]G2`, prepared once.
    neg_g2_gen: G2Prepared,
    /// `shift^n` per coset.
    coset_shifts_pow_n: Vec<Scalar>,
    /// `[shift^0, shift^-1, ..., shift^-(n-1)]` per coset, for rescaling
    /// interpolation polynomials from the coset to the base domain.
    inv_coset_shift_powers: Vec<Vec<Scalar>>,
}

impl MultiOpenVerifier {
    pub fn new(
        verification_key: VerificationKey,
        num_points_to_open: usize,
        num_cosets: usize,
    ) -> Self {
        let coset_shifts = coset_gens(num_points_to_open, num_cosets, true);

        let coset_size = num_points_to_open / num_cosets;
        assert_eq!(
            coset_size, verification_key.coset_size,
            "verification key was built for a different coset size"
        );

        let coset_domain = Domain::new(coset_size);

        let tau_pow_n_g2 = G2Prepared::from(verification_key.g2s[coset_size]);
        let neg_g2_gen = G2Prepared::from(-verification_key.g2_gen());

        let coset_shifts_pow_n = coset_shifts
            .iter()
            .map(|shift| shift.pow_vartime([coset_size as u64]))
            .collect();

        let inv_coset_shift_powers = coset_shifts
            .iter()
            .map(|&shift| {
                let mut powers = compute_powers(shift, coset_size);
                batch_inverse(&mut powers)
                    .expect("coset shifts are roots of unity, so none of their powers is zero");
                powers
            })
            .collect();

        Self {
            verification_key,
            coset_domain,
            tau_pow_n_g2,
            neg_g2_gen,
            coset_shifts_pow_n,
            inv_coset_shift_powers,
        }
    }

    /// Verifies a batch of openings with one pairing check.
    ///
    /// `commitments` has been deduplicated by the caller;
    /// `commitment_indices[k]` points each opening at its commitment.
    /// `coset_indices`, `coset_evals` and `proofs` describe opening `k`
    /// of the batch; all four per-opening slices must have equal length
    /// (the caller has validated this — violations panic here).
    ///
    /// Returns false exactly when the batch is cryptographically invalid.
    pub fn verify_multi_opening(
        &self,
        commitments: &[G1Point],
        commitment_indices: &[CommitmentIndex],
        coset_indices: &[CosetIndex],
        coset_evals: &[Vec<Scalar>],
        proofs: &[G1Point],
    ) -> bool {
        assert_eq!(commitment_indices.len(), proofs.len());
        assert_eq!(coset_indices.len(), proofs.len());
        assert_eq!(coset_evals.len(), proofs.len());

        let batch_size = proofs.len();

        // One Fiat-Shamir challenge; the per-opening weights are its
        // powers, which are linearly independent, so a batch that sums to
        // a valid equation is valid term by term (up to negligible
        // probability).
        let r = compute_fiat_shamir_challenge(
            &self.verification_key,
            commitments,
            commitment_indices,
            coset_indices,
            coset_evals,
            proofs,
        );
        let r_powers = compute_powers(r, batch_size);

        // sum_k r^k * proof_k
        let proofs_combined = g1_lincomb(proofs, &r_powers)
            .expect("one challenge power per proof");

        // sum_k r^k * C_{index(k)}, folding repeated commitments into a
        // single weight so the MSM stays as small as the deduplicated
        // commitment list.
        let mut commitment_weights = vec![Scalar::ZERO; commitments.len()];
        for (&index, r_power) in commitment_indices.iter().zip(&r_powers) {
            commitment_weights[index as usize] += r_power;
        }
        let commitments_combined = g1_lincomb(commitments, &commitment_weights)
            .expect("one weight per deduplicated commitment");

        // sum_k r^k * I_k, where I_k is the degree < n polynomial agreeing
        // with opening k's evaluations on its coset. Each I_k is an IFFT
        // over the base coset domain rescaled by inverse shift powers.
        let mut interpolation_combined = PolyCoeff::default();
        for (k, coset_eval) in coset_evals.iter().enumerate() {
            let mut evaluations = coset_eval.clone();
            reverse_bit_order(&mut evaluations);
            let mut interpolation = self.coset_domain.ifft_scalars(evaluations);

            let inv_shift_powers =
                &self.inv_coset_shift_powers[coset_indices[k] as usize];
            let r_power = r_powers[k];
            for (coefficient, inv_shift_power) in
                interpolation.iter_mut().zip(inv_shift_powers)
            {
                *coefficient *= inv_shift_power * r_power;
            }

            interpolation_combined = interpolation_combined.add(&interpolation);
        }
        let interpolations_combined =
            self.verification_key.commit_g1(&interpolation_combined);

        // sum_k r^k * shift_k^n * proof_k
        let shifted_weights: Vec<Scalar> = coset_indices
            .iter()
            .zip(r_powers)
            .map(|(&index, r_power)| r_power * self.coset_shifts_pow_n[index as usize])
            .collect();
        let proofs_shift_combined = g1_lincomb(proofs, &shifted_weights)
            .expect("one shifted weight per proof");

        // The batched opening equation:
        //   e(sum r^k proof_k, [tau^n]G2)
        //     == e(sum r^k (C_k - I_k + shift_k^n proof_k), G2)
        let pairing_rhs =
            (commitments_combined - interpolations_combined) + proofs_shift_combined;

        let affine = g1_batch_normalize(&[proofs_combined, pairing_rhs]);
        multi_pairings(&[
            (&affine[0], &self.tau_pow_n_g2),
            (&affine[1], &self.neg_g2_gen),
        ])
    }
}

/// Derives the batch challenge by hashing every input of the batch under
/// a fixed domain separator and reducing the digest into Fr.
fn compute_fiat_shamir_challenge(
    verification_key: &VerificationKey,
    commitments: &[G1Point],
    commitment_indices: &[CommitmentIndex],
    coset_indices: &[CosetIndex],
    coset_evals: &[Vec<Scalar>],
    proofs: &[G1Point],
) -> Scalar {
    const DOMAIN_SEP: &[u8; 16] = b"RCKZGCBATCH__V1_";

    let batch_size = coset_indices.len();
    let hash_input_size = DOMAIN_SEP.len()
        + 4 * size_of::<u64>() // degree, coset size, commitment count, batch size
        + commitments.len() * G1_COMPRESSED_SIZE
        + batch_size
            * (2 * size_of::<u64>()
                + verification_key.coset_size * SCALAR_SERIALIZED_SIZE
                + G1_COMPRESSED_SIZE);

    let mut hash_input: Vec<u8> = Vec::with_capacity(hash_input_size);

    hash_input.extend(DOMAIN_SEP);
    hash_input
        .extend((verification_key.num_coefficients_in_polynomial as u64).to_be_bytes());
    hash_input.extend((verification_key.coset_size as u64).to_be_bytes());
    hash_input.extend((commitments.len() as u64).to_be_bytes());
    hash_input.extend((batch_size as u64).to_be_bytes());

    for commitment in commitments {
        hash_input.extend(commitment.to_compressed());
    }

    for k in 0..batch_size {
        hash_input.extend(commitment_indices[k].to_be_bytes());
        hash_input.extend(coset_indices[k].to_be_bytes());
        for evaluation in &coset_evals[k] {
            hash_input.extend(evaluation.to_bytes_be());
        }
        hash_input.extend(proofs[k].to_compressed());
    }

    assert_eq!(hash_input.len(), hash_input_size);

    let digest: [u8; 32] = Sha256::digest(hash_input).into();

    // A 128-bit random scalar already gives the batch its soundness, so
    // the small bias from reducing a 256-bit digest is irrelevant; so is
    // the negligible chance of the challenge being zero.
    reduce_bytes_to_scalar(digest)
}
