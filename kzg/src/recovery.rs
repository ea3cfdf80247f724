use std::collections::HashSet;

use erasure_codes::ReedSolomon;
use kzg_multi_open::recover_evaluations_in_domain_order;
use polynomial::poly_coeff::PolyCoeff;

use crate::{
    constants::{CELLS_PER_EXT_BLOB, EXPANSION_FACTOR, FIELD_ELEMENTS_PER_EXT_BLOB},
    errors::{Error, RecoveryError},
    serialization::deserialize_cells,
    CellIndex, CellRef,
};

/// Recovers the blob polynomial (monomial form) from a partial set of
/// cells. The caller re-runs the proving pipeline on the result to get
/// all cells and proofs back.
pub(crate) fn recover_polynomial_coeff(
    rs: &ReedSolomon,
    cell_indices: Vec<CellIndex>,
    cells: Vec<CellRef>,
) -> Result<PolyCoeff, Error> {
    validate_recovery_inputs(&cell_indices, &cells)?;

    let coset_evaluations = deserialize_cells(&cells)?;
    let cell_indices: Vec<usize> = cell_indices.into_iter().map(|index| index as usize).collect();

    // Cells are addressed in bit-reversed coset order; the decoder wants
    // the evaluations laid out as one vector in domain order, with zero
    // placeholders where cells are missing.
    let (present_positions, codeword_with_gaps) = recover_evaluations_in_domain_order(
        FIELD_ELEMENTS_PER_EXT_BLOB,
        cell_indices,
        coset_evaluations,
    )
    .expect("validation guarantees non-empty, equal-size, in-range cells");

    // In domain order a cell occupies one position of every
    // `CELLS_PER_EXT_BLOB`-sized block, so the missing cells are exactly
    // the missing in-block positions.
    let present: HashSet<usize> = present_positions.into_iter().collect();
    let missing_positions: Vec<usize> = (0..CELLS_PER_EXT_BLOB)
        .filter(|position| !present.contains(position))
        .collect();

    let polynomial = rs.recover_polynomial_coefficient(codeword_with_gaps, &missing_positions)?;

    Ok(polynomial)
}

fn validate_recovery_inputs(
    cell_indices: &[CellIndex],
    cells: &[CellRef],
) -> Result<(), RecoveryError> {
    if cell_indices.len() != cells.len() {
        return Err(RecoveryError::NumCellIndicesNotEqualToNumCells {
            num_cell_indices: cell_indices.len(),
            num_cells: cells.len(),
        });
    }

    for &cell_index in cell_indices {
        if cell_index >= CELLS_PER_EXT_BLOB as u64 {
            return Err(RecoveryError::CellIndexOutOfRange {
                cell_index,
                max_number_of_cells: CELLS_PER_EXT_BLOB as u64,
            });
        }
    }

    let unique_indices: HashSet<_> = cell_indices.iter().collect();
    if unique_indices.len() != cell_indices.len() {
        return Err(RecoveryError::CellIndicesNotUnique);
    }

    if cell_indices.len() < CELLS_PER_EXT_BLOB / EXPANSION_FACTOR {
        return Err(RecoveryError::NotEnoughCellsToReconstruct {
            num_cells_received: cell_indices.len(),
            min_cells_needed: CELLS_PER_EXT_BLOB / EXPANSION_FACTOR,
        });
    }

    // Unreachable given uniqueness and the range check; kept to mirror
    // the spec's checklist.
    if cell_indices.len() > CELLS_PER_EXT_BLOB {
        return Err(RecoveryError::TooManyCellsReceived {
            num_cells_received: cell_indices.len(),
            max_cells: CELLS_PER_EXT_BLOB,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_cells(n: usize) -> Vec<[u8; crate::constants::BYTES_PER_CELL]> {
        vec![[0u8; crate::constants::BYTES_PER_CELL]; n]
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let cells = dummy_cells(2);
        let cell_refs: Vec<CellRef> = cells.iter().collect();
        let result = validate_recovery_inputs(&[0], &cell_refs);
        assert!(matches!(
            result,
            Err(RecoveryError::NumCellIndicesNotEqualToNumCells { .. })
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let cells = dummy_cells(64);
        let cell_refs: Vec<CellRef> = cells.iter().collect();
        let mut indices: Vec<CellIndex> = (0..64).collect();
        indices[63] = 128;
        assert!(matches!(
            validate_recovery_inputs(&indices, &cell_refs),
            Err(RecoveryError::CellIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn duplicate_indices_are_rejected() {
        let cells = dummy_cells(64);
        let cell_refs: Vec<CellRef> = cells.iter().collect();
        let mut indices: Vec<CellIndex> = (0..64).collect();
        indices[1] = 0;
        assert!(matches!(
            validate_recovery_inputs(&indices, &cell_refs),
            Err(RecoveryError::CellIndicesNotUnique)
        ));
    }

    #[test]
    fn less_than_half_the_cells_is_rejected() {
        let cells = dummy_cells(63);
        let cell_refs: Vec<CellRef> = cells.iter().collect();
        let indices: Vec<CellIndex> = (0..63).collect();
        assert!(matches!(
            validate_recovery_inputs(&indices, &cell_refs),
            Err(RecoveryError::NotEnoughCellsToReconstruct { .. })
        ));
    }

    #[test]
    fn exactly_half_the_cells_passes_validation() {
        let cells = dummy_cells(64);
        let cell_refs: Vec<CellRef> = cells.iter().collect();
        let indices: Vec<CellIndex> = (0..64).collect();
        assert!(validate_recovery_inputs(&indices, &cell_refs).is_ok());
    }
}
