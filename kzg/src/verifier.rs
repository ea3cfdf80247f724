use std::collections::HashMap;

use kzg_multi_open::{verification_key::VerificationKey, CommitmentIndex, MultiOpenVerifier};
use maybe_rayon::prelude::*;
use polynomial::domain::Domain;

use crate::{
    constants::{
        CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_BLOB, FIELD_ELEMENTS_PER_CELL,
        FIELD_ELEMENTS_PER_EXT_BLOB,
    },
    errors::{Error, VerifierError},
    fiat_shamir::{compute_batch_challenge_powers, compute_blob_challenge},
    serialization::{
        deserialize_blob_to_scalars, deserialize_bytes_to_scalar, deserialize_cells,
        deserialize_compressed_g1, deserialize_compressed_g1_points,
    },
    single_open::{evaluate_in_evaluation_form, OpeningKey},
    trusted_setup::TrustedSetup,
    BlobRef, Bytes48Ref, CellIndex, CellRef, KzgContext, SerializedScalar,
};

/// Verifying-side state: the single-opening key, the blob domain for
/// recomputing evaluations, and the cell batch verifier.
#[derive(Debug)]
pub(crate) struct VerifierContext {
    domain: Domain,
    opening_key: OpeningKey,
    multi_open: MultiOpenVerifier,
}

impl VerifierContext {
    pub(crate) fn new(trusted_setup: &TrustedSetup) -> Self {
        let opening_key = OpeningKey {
            gen_g1: trusted_setup.g1_monomial[0],
            gen_g2: trusted_setup.g2_monomial[0],
            tau_g2: trusted_setup.g2_monomial[1],
        };

        // The cell verifier commits to interpolation polynomials of one
        // coset, so it needs the setup prefix of coset size plus one.
        let verification_key = VerificationKey::new(
            trusted_setup.g1_monomial[..=FIELD_ELEMENTS_PER_CELL].to_vec(),
            trusted_setup.g2_monomial.clone(),
            FIELD_ELEMENTS_PER_CELL,
            FIELD_ELEMENTS_PER_BLOB,
        );

        let multi_open = MultiOpenVerifier::new(
            verification_key,
            FIELD_ELEMENTS_PER_EXT_BLOB,
            CELLS_PER_EXT_BLOB,
        );

        Self {
            domain: Domain::new(FIELD_ELEMENTS_PER_BLOB),
            opening_key,
            multi_open,
        }
    }
}

impl KzgContext {
    /// Verifies a single opening proof: that the polynomial behind
    /// `commitment` evaluates to `y` at `z`.
    ///
    /// Returns `Ok(false)` for a well-formed but invalid proof, and an
    /// error only when some input fails to parse.
    ///
    /// Matches `verify_kzg_proof` in the consensus specs.
    pub fn verify_kzg_proof(
        &self,
        commitment_bytes: Bytes48Ref,
        z_bytes: &SerializedScalar,
        y_bytes: &SerializedScalar,
        proof_bytes: Bytes48Ref,
    ) -> Result<bool, Error> {
        let commitment = deserialize_compressed_g1(commitment_bytes)?;
        let proof = deserialize_compressed_g1(proof_bytes)?;
        let z = deserialize_bytes_to_scalar(z_bytes)?;
        let y = deserialize_bytes_to_scalar(y_bytes)?;

        Ok(self
            .verifier_ctx
            .opening_key
            .verify_opening(commitment, z, y, proof))
    }

    /// Verifies a blob proof: recomputes the Fiat-Shamir point and the
    /// blob's evaluation there, then checks the opening.
    ///
    /// Matches `verify_blob_kzg_proof` in the consensus specs.
    pub fn verify_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment_bytes: Bytes48Ref,
        proof_bytes: Bytes48Ref,
    ) -> Result<bool, Error> {
        let polynomial = deserialize_blob_to_scalars(blob)?;
        let commitment = deserialize_compressed_g1(commitment_bytes)?;
        let proof = deserialize_compressed_g1(proof_bytes)?;

        let z = compute_blob_challenge(blob, commitment_bytes);
        let y = evaluate_in_evaluation_form(&self.verifier_ctx.domain, &polynomial, z);

        Ok(self
            .verifier_ctx
            .opening_key
            .verify_opening(commitment, z, y, proof))
    }

    /// Verifies a batch of blob proofs with a single pairing check.
    ///
    /// An empty batch is vacuously valid. A batch of one delegates to
    /// [`Self::verify_blob_kzg_proof`] — same verdict, no randomization
    /// overhead. Any unparseable input fails the whole call; nothing is
    /// skipped.
    ///
    /// Matches `verify_blob_kzg_proof_batch` in the consensus specs.
    pub fn verify_blob_kzg_proof_batch(
        &self,
        blobs: &[BlobRef],
        commitments: &[Bytes48Ref],
        proofs: &[Bytes48Ref],
    ) -> Result<bool, Error> {
        if blobs.len() != commitments.len() || blobs.len() != proofs.len() {
            return Err(VerifierError::BlobBatchInputsMustHaveSameLength {
                blobs_len: blobs.len(),
                commitments_len: commitments.len(),
                proofs_len: proofs.len(),
            }
            .into());
        }

        match blobs {
            [] => return Ok(true),
            &[blob] => return self.verify_blob_kzg_proof(blob, commitments[0], proofs[0]),
            _ => {}
        }

        let polynomials = blobs
            .iter()
            .map(|blob| deserialize_blob_to_scalars(*blob))
            .collect::<Result<Vec<_>, _>>()?;
        let commitment_points = commitments
            .iter()
            .map(|commitment| deserialize_compressed_g1(*commitment))
            .collect::<Result<Vec<_>, _>>()?;
        let proof_points = proofs
            .iter()
            .map(|proof| deserialize_compressed_g1(*proof))
            .collect::<Result<Vec<_>, _>>()?;

        // Per-blob challenge points and evaluations.
        let (zs, ys): (Vec<_>, Vec<_>) = (0..blobs.len())
            .maybe_into_par_iter()
            .map(|i| {
                let z = compute_blob_challenge(blobs[i], commitments[i]);
                let y = evaluate_in_evaluation_form(&self.verifier_ctx.domain, &polynomials[i], z);
                (z, y)
            })
            .unzip();

        // The batch challenge binds every opening, in order.
        let owned_commitments: Vec<_> = commitments.iter().map(|c| **c).collect();
        let owned_proofs: Vec<_> = proofs.iter().map(|p| **p).collect();
        let r_powers =
            compute_batch_challenge_powers(&owned_commitments, &zs, &ys, &owned_proofs);

        Ok(self.verifier_ctx.opening_key.verify_openings_batch(
            &commitment_points,
            &zs,
            &ys,
            &proof_points,
            &r_powers,
        ))
    }

    /// Verifies a batch of (commitment, cell index, cell, proof) openings
    /// with a single pairing check.
    ///
    /// Commitments may repeat freely (the common case: many cells of one
    /// blob); they are deduplicated before the MSM so repeats cost a
    /// field addition, not a scalar multiplication.
    ///
    /// Matches `verify_cell_kzg_proof_batch` in the consensus specs.
    pub fn verify_cell_kzg_proof_batch(
        &self,
        commitments: Vec<Bytes48Ref>,
        cell_indices: &[CellIndex],
        cells: Vec<CellRef>,
        proofs: Vec<Bytes48Ref>,
    ) -> Result<bool, Error> {
        let (unique_commitments, commitment_indices) = deduplicate_with_indices(commitments);

        validate_cell_batch(
            unique_commitments.len(),
            &commitment_indices,
            cell_indices,
            &cells,
            &proofs,
        )?;

        if cells.is_empty() {
            return Ok(true);
        }

        let commitment_points = deserialize_compressed_g1_points(&unique_commitments)?;
        let proof_points = deserialize_compressed_g1_points(&proofs)?;
        let coset_evaluations = deserialize_cells(&cells)?;

        Ok(self.verifier_ctx.multi_open.verify_multi_opening(
            &commitment_points,
            &commitment_indices,
            cell_indices,
            &coset_evaluations,
            &proof_points,
        ))
    }
}

/// Collapses duplicates out of `items`, returning the unique items in
/// first-appearance order together with each original item's index into
/// the deduplicated list.
fn deduplicate_with_indices<T: Eq + std::hash::Hash + Copy>(
    items: Vec<T>,
) -> (Vec<T>, Vec<CommitmentIndex>) {
    let mut unique = Vec::new();
    let mut first_seen_at = HashMap::new();

    let indices = items
        .into_iter()
        .map(|item| {
            *first_seen_at.entry(item).or_insert_with(|| {
                unique.push(item);
                (unique.len() - 1) as CommitmentIndex
            })
        })
        .collect();

    (unique, indices)
}

fn validate_cell_batch(
    num_unique_commitments: usize,
    commitment_indices: &[CommitmentIndex],
    cell_indices: &[CellIndex],
    cells: &[CellRef],
    proofs: &[Bytes48Ref],
) -> Result<(), VerifierError> {
    let batch_size = commitment_indices.len();
    if batch_size != cell_indices.len() || batch_size != cells.len() || batch_size != proofs.len() {
        return Err(VerifierError::CellBatchInputsMustHaveSameLength {
            commitments_len: batch_size,
            cell_indices_len: cell_indices.len(),
            cells_len: cells.len(),
            proofs_len: proofs.len(),
        });
    }

    debug_assert!(
        commitment_indices
            .iter()
            .all(|&index| (index as usize) < num_unique_commitments),
        "deduplication produces in-range indices"
    );

    for &cell_index in cell_indices {
        if cell_index >= CELLS_PER_EXT_BLOB as u64 {
            return Err(VerifierError::CellIndexOutOfRange {
                cell_index,
                max_number_of_cells: CELLS_PER_EXT_BLOB as u64,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::deduplicate_with_indices;

    #[test]
    fn deduplication_keeps_first_appearance_order() {
        let items = vec![7, 1, 7, 2, 3, 4, 7];
        let (unique, indices) = deduplicate_with_indices(items);

        assert_eq!(unique, vec![7, 1, 2, 3, 4]);
        assert_eq!(indices, vec![0, 1, 0, 2, 3, 4, 0]);
    }

    #[test]
    fn deduplication_of_empty_input() {
        let (unique, indices) = deduplicate_with_indices(Vec::<u8>::new());
        assert!(unique.is_empty());
        assert!(indices.is_empty());
    }
}
