use bls12_381::{fixed_base_msm::FixedBasePrecomp, lincomb::g1_lincomb, G1Point};
use erasure_codes::ReedSolomon;
use kzg_multi_open::{commit_key::CommitKey, MultiOpenProver, ProverInput};
use polynomial::domain::Domain;

use crate::{
    constants::{
        CELLS_PER_EXT_BLOB, EXPANSION_FACTOR, FIELD_ELEMENTS_PER_BLOB, FIELD_ELEMENTS_PER_CELL,
        FIELD_ELEMENTS_PER_EXT_BLOB,
    },
    errors::Error,
    fiat_shamir::compute_blob_challenge,
    recovery::recover_polynomial_coeff,
    serialization::{
        deserialize_blob_to_scalars, deserialize_bytes_to_scalar, deserialize_compressed_g1,
        serialize_cells, serialize_cells_and_proofs, serialize_g1_compressed,
    },
    single_open::evaluation_and_quotient,
    trusted_setup::TrustedSetup,
    BlobRef, Bytes48Ref, Cell, CellIndex, CellRef, KZGCommitment, KZGProof, KzgContext,
    SerializedScalar,
};

/// Proving-side state: the commitment table for blob polynomials, the
/// FK20 prover for cell proofs and the erasure decoder for recovery.
#[derive(Debug)]
pub(crate) struct ProverContext {
    /// Blob evaluation domain, used for single-point quotients.
    domain: Domain,
    /// The bit-reversal-permuted Lagrange table: entry `i` pairs with
    /// blob field element `i`.
    g1_lagrange_brp: Vec<G1Point>,
    /// FK20 multi-point prover over the monomial table.
    multi_open: MultiOpenProver,
    /// Reed-Solomon decoder for cell recovery. Block size is the cell
    /// count: in domain order a missing cell is the same position missing
    /// from every block.
    rs: ReedSolomon,
}

impl ProverContext {
    pub(crate) fn new(trusted_setup: &TrustedSetup, precomp: FixedBasePrecomp) -> Self {
        let multi_open = MultiOpenProver::new(
            CommitKey::new(trusted_setup.g1_monomial.clone()),
            FIELD_ELEMENTS_PER_BLOB,
            // Each proof attests to one cell's worth of points...
            FIELD_ELEMENTS_PER_CELL,
            // ...out of the full extended evaluation set.
            FIELD_ELEMENTS_PER_EXT_BLOB,
            precomp,
        );

        let rs = ReedSolomon::new(
            FIELD_ELEMENTS_PER_BLOB,
            EXPANSION_FACTOR,
            CELLS_PER_EXT_BLOB,
        );

        Self {
            domain: Domain::new(FIELD_ELEMENTS_PER_BLOB),
            g1_lagrange_brp: trusted_setup.g1_lagrange_brp.clone(),
            multi_open,
            rs,
        }
    }
}

impl KzgContext {
    /// Commits to the polynomial represented by the blob.
    ///
    /// Matches `blob_to_kzg_commitment` in the consensus specs.
    pub fn blob_to_kzg_commitment(&self, blob: BlobRef) -> Result<KZGCommitment, Error> {
        let scalars = deserialize_blob_to_scalars(blob)?;

        // Blob data and table share the bit-reversed ordering, so the
        // commitment is a single MSM, no reordering.
        let commitment = g1_lincomb(&self.prover_ctx.g1_lagrange_brp, &scalars)
            .expect("table and blob both hold FIELD_ELEMENTS_PER_BLOB entries")
            .into();

        Ok(serialize_g1_compressed(&commitment))
    }

    /// Computes the opening proof for the blob's polynomial at the point
    /// `z`, returning the proof and the evaluation `y = p(z)`.
    ///
    /// Matches `compute_kzg_proof` in the consensus specs.
    pub fn compute_kzg_proof(
        &self,
        blob: BlobRef,
        z_bytes: SerializedScalar,
    ) -> Result<(KZGProof, SerializedScalar), Error> {
        let polynomial = deserialize_blob_to_scalars(blob)?;
        let z = deserialize_bytes_to_scalar(&z_bytes)?;

        let (y, quotient) = evaluation_and_quotient(&self.prover_ctx.domain, &polynomial, z);

        let proof = g1_lincomb(&self.prover_ctx.g1_lagrange_brp, &quotient)
            .expect("quotient has one entry per table point")
            .into();

        Ok((serialize_g1_compressed(&proof), y.to_bytes_be()))
    }

    /// Computes the opening proof for the blob at the Fiat-Shamir point
    /// derived from the blob and its commitment.
    ///
    /// The commitment is checked to be a valid group element but not to
    /// actually commit to the blob; a mismatched commitment produces a
    /// proof that will not verify.
    ///
    /// Matches `compute_blob_kzg_proof` in the consensus specs.
    pub fn compute_blob_kzg_proof(
        &self,
        blob: BlobRef,
        commitment_bytes: Bytes48Ref,
    ) -> Result<KZGProof, Error> {
        let polynomial = deserialize_blob_to_scalars(blob)?;

        // Subgroup check only; the point itself is not otherwise used.
        deserialize_compressed_g1(commitment_bytes)?;

        let z = compute_blob_challenge(blob, commitment_bytes);
        let (_, quotient) = evaluation_and_quotient(&self.prover_ctx.domain, &polynomial, z);

        let proof = g1_lincomb(&self.prover_ctx.g1_lagrange_brp, &quotient)
            .expect("quotient has one entry per table point")
            .into();

        Ok(serialize_g1_compressed(&proof))
    }

    /// Extends the blob onto the doubled domain and splits it into its
    /// 128 cells, without computing proofs.
    pub fn compute_cells(&self, blob: BlobRef) -> Result<[Cell; CELLS_PER_EXT_BLOB], Error> {
        let scalars = deserialize_blob_to_scalars(blob)?;

        let coset_evaluations = self
            .prover_ctx
            .multi_open
            .extend(ProverInput::BitReversedEvaluations(scalars));

        Ok(serialize_cells(&coset_evaluations))
    }

    /// Computes all 128 cells and their opening proofs for the blob.
    ///
    /// Matches `compute_cells_and_kzg_proofs` in the consensus specs.
    pub fn compute_cells_and_kzg_proofs(
        &self,
        blob: BlobRef,
    ) -> Result<([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]), Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("compute_cells_and_kzg_proofs").entered();

        let scalars = deserialize_blob_to_scalars(blob)?;

        let (proofs, coset_evaluations) = self
            .prover_ctx
            .multi_open
            .open(ProverInput::BitReversedEvaluations(scalars));

        Ok(serialize_cells_and_proofs(&coset_evaluations, &proofs))
    }

    /// Reconstructs all 128 cells and proofs from any subset of at least
    /// half of the cells.
    ///
    /// Matches `recover_cells_and_kzg_proofs` in the consensus specs.
    pub fn recover_cells_and_kzg_proofs(
        &self,
        cell_indices: Vec<CellIndex>,
        cells: Vec<CellRef>,
    ) -> Result<([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]), Error> {
        let polynomial = recover_polynomial_coeff(&self.prover_ctx.rs, cell_indices, cells)?;

        let (proofs, coset_evaluations) = self
            .prover_ctx
            .multi_open
            .open(ProverInput::Coefficients(polynomial));

        Ok(serialize_cells_and_proofs(&coset_evaluations, &proofs))
    }
}
