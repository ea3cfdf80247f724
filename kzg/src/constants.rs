// "Field element" always refers to the scalar field of BLS12-381.

/// Bytes in the canonical serialization of a field element.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

/// Field elements in a blob, as fixed by EIP-4844.
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;

/// Bytes in a blob.
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// Bytes in a compressed G1 point.
pub const BYTES_PER_G1_POINT: usize = 48;

/// Bytes in a compressed G2 point.
pub const BYTES_PER_G2_POINT: usize = 96;

/// Bytes in a commitment; commitments are compressed G1 points.
pub const BYTES_PER_COMMITMENT: usize = BYTES_PER_G1_POINT;

/// Bytes in an opening proof; proofs are compressed G1 points.
pub const BYTES_PER_PROOF: usize = BYTES_PER_G1_POINT;

/// G1 points in the trusted setup; one per blob field element.
pub const NUM_G1_POINTS: usize = FIELD_ELEMENTS_PER_BLOB;

/// G2 points in the trusted setup; one more than the cell width, so the
/// cell verifier can reach `[tau^64]G2`.
pub const NUM_G2_POINTS: usize = FIELD_ELEMENTS_PER_CELL + 1;

/// Factor by which a blob is Reed-Solomon extended, as fixed by EIP-7594.
pub const EXPANSION_FACTOR: usize = 2;

/// Field elements in an extended blob.
pub const FIELD_ELEMENTS_PER_EXT_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * EXPANSION_FACTOR;

/// Field elements in a single cell.
pub const FIELD_ELEMENTS_PER_CELL: usize = 64;

/// Bytes in a single cell.
pub const BYTES_PER_CELL: usize = FIELD_ELEMENTS_PER_CELL * BYTES_PER_FIELD_ELEMENT;

/// Cells an extended blob splits into.
pub const CELLS_PER_EXT_BLOB: usize = FIELD_ELEMENTS_PER_EXT_BLOB / FIELD_ELEMENTS_PER_CELL;
