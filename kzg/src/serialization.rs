use bls12_381::{G1Point, Scalar};

use crate::{
    constants::{
        BYTES_PER_BLOB, BYTES_PER_CELL, BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT,
        CELLS_PER_EXT_BLOB, FIELD_ELEMENTS_PER_CELL,
    },
    errors::SerializationError,
    Cell, KZGProof,
};

/// Splits a byte string into 32-byte chunks and parses each as a
/// canonical field element. Fails on the first non-canonical chunk.
fn deserialize_bytes_to_scalars(bytes: &[u8]) -> Result<Vec<Scalar>, SerializationError> {
    if bytes.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(SerializationError::ScalarHasInvalidLength {
            length: bytes.len(),
        });
    }

    bytes
        .chunks_exact(BYTES_PER_FIELD_ELEMENT)
        .map(deserialize_bytes_to_scalar)
        .collect()
}

/// Parses a blob into its `FIELD_ELEMENTS_PER_BLOB` field elements, in
/// blob (bit-reversed evaluation) order.
pub(crate) fn deserialize_blob_to_scalars(
    blob_bytes: &[u8],
) -> Result<Vec<Scalar>, SerializationError> {
    if blob_bytes.len() != BYTES_PER_BLOB {
        return Err(SerializationError::BlobHasInvalidLength {
            length: blob_bytes.len(),
        });
    }
    deserialize_bytes_to_scalars(blob_bytes)
}

/// Parses exactly 32 big-endian bytes as a canonical field element.
pub(crate) fn deserialize_bytes_to_scalar(
    scalar_bytes: &[u8],
) -> Result<Scalar, SerializationError> {
    let bytes: &[u8; BYTES_PER_FIELD_ELEMENT] = scalar_bytes
        .try_into()
        .map_err(|_| SerializationError::ScalarHasInvalidLength {
            length: scalar_bytes.len(),
        })?;

    Option::<Scalar>::from(Scalar::from_bytes_be(bytes)).ok_or_else(|| {
        SerializationError::CouldNotDeserializeScalar {
            bytes: scalar_bytes.to_vec(),
        }
    })
}

/// Decompresses 48 bytes into a G1 point, with curve and subgroup checks.
pub(crate) fn deserialize_compressed_g1(
    point_bytes: &[u8],
) -> Result<G1Point, SerializationError> {
    let bytes: &[u8; BYTES_PER_G1_POINT] = point_bytes
        .try_into()
        .map_err(|_| SerializationError::G1PointHasInvalidLength {
            length: point_bytes.len(),
        })?;

    Option::<G1Point>::from(G1Point::from_compressed(bytes)).ok_or_else(|| {
        SerializationError::CouldNotDeserializeG1Point {
            bytes: point_bytes.to_vec(),
        }
    })
}

/// Decompresses a list of purported G1 points, failing on the first bad
/// one.
pub(crate) fn deserialize_compressed_g1_points(
    points: &[&[u8; BYTES_PER_G1_POINT]],
) -> Result<Vec<G1Point>, SerializationError> {
    points
        .iter()
        .map(|point| deserialize_compressed_g1(*point))
        .collect()
}

pub(crate) fn serialize_g1_compressed(point: &G1Point) -> [u8; BYTES_PER_G1_POINT] {
    point.to_compressed()
}

/// Parses each cell into its `FIELD_ELEMENTS_PER_CELL` field elements.
pub(crate) fn deserialize_cells(
    cells: &[&[u8; BYTES_PER_CELL]],
) -> Result<Vec<Vec<Scalar>>, SerializationError> {
    cells
        .iter()
        .map(|cell| deserialize_bytes_to_scalars(*cell))
        .collect()
}

/// Serializes one coset's evaluations into a cell.
pub(crate) fn serialize_scalars_to_cell(scalars: &[Scalar]) -> Cell {
    assert_eq!(
        scalars.len(),
        FIELD_ELEMENTS_PER_CELL,
        "a cell holds exactly {FIELD_ELEMENTS_PER_CELL} field elements"
    );

    let bytes: Vec<u8> = scalars.iter().flat_map(Scalar::to_bytes_be).collect();
    bytes
        .into_boxed_slice()
        .try_into()
        .expect("cell is exactly BYTES_PER_CELL long")
}

/// Serializes all coset evaluation sets into the cell array.
pub(crate) fn serialize_cells(
    coset_evaluations: &[Vec<Scalar>],
) -> [Cell; CELLS_PER_EXT_BLOB] {
    assert_eq!(coset_evaluations.len(), CELLS_PER_EXT_BLOB);
    std::array::from_fn(|i| serialize_scalars_to_cell(&coset_evaluations[i]))
}

/// Serializes coset evaluations and proofs into the public output arrays.
pub(crate) fn serialize_cells_and_proofs(
    coset_evaluations: &[Vec<Scalar>],
    proofs: &[G1Point],
) -> ([Cell; CELLS_PER_EXT_BLOB], [KZGProof; CELLS_PER_EXT_BLOB]) {
    assert_eq!(proofs.len(), CELLS_PER_EXT_BLOB);
    (
        serialize_cells(coset_evaluations),
        std::array::from_fn(|i| proofs[i].to_compressed()),
    )
}
