use erasure_codes::errors::ErasureCodeError;

use crate::CellIndex;

/// Top-level error of every fallible operation in this crate.
///
/// Every variant means the *inputs* were unusable — wrong lengths,
/// non-canonical field elements, points off the curve or out of the
/// subgroup, bad indices. A proof that parses fine but fails its pairing
/// check is not an error: verification returns `Ok(false)` for that, so
/// "malformed" and "cryptographically invalid" stay on separate channels.
#[derive(Debug)]
pub enum Error {
    Serialization(SerializationError),
    Verifier(VerifierError),
    Recovery(RecoveryError),
}

impl From<SerializationError> for Error {
    fn from(value: SerializationError) -> Self {
        Self::Serialization(value)
    }
}

impl From<VerifierError> for Error {
    fn from(value: VerifierError) -> Self {
        Self::Verifier(value)
    }
}

impl From<RecoveryError> for Error {
    fn from(value: RecoveryError) -> Self {
        Self::Recovery(value)
    }
}

impl From<ErasureCodeError> for Error {
    fn from(value: ErasureCodeError) -> Self {
        Self::Recovery(RecoveryError::ErasureCode(value))
    }
}

/// Deserialization failures of untrusted byte input.
#[derive(Debug)]
pub enum SerializationError {
    /// The 32 bytes were not the canonical encoding of a field element
    /// (the value was at or above the modulus).
    CouldNotDeserializeScalar { bytes: Vec<u8> },
    /// The 48 bytes did not decompress to a point on the curve in the
    /// correct subgroup.
    CouldNotDeserializeG1Point { bytes: Vec<u8> },
    /// A scalar input had a length other than 32 bytes.
    ScalarHasInvalidLength { length: usize },
    /// A blob had a length other than `BYTES_PER_BLOB`.
    BlobHasInvalidLength { length: usize },
    /// A G1 point input had a length other than 48 bytes.
    G1PointHasInvalidLength { length: usize },
}

/// Input-validation failures of the verification entry points.
#[derive(Debug)]
pub enum VerifierError {
    /// The blob batch arrays did not have one entry per blob each.
    BlobBatchInputsMustHaveSameLength {
        blobs_len: usize,
        commitments_len: usize,
        proofs_len: usize,
    },
    /// The cell batch arrays did not have one entry per opening each.
    CellBatchInputsMustHaveSameLength {
        commitments_len: usize,
        cell_indices_len: usize,
        cells_len: usize,
        proofs_len: usize,
    },
    /// A cell index pointed past the extended blob.
    CellIndexOutOfRange {
        cell_index: CellIndex,
        max_number_of_cells: u64,
    },
}

/// Input-validation failures of cell recovery.
#[derive(Debug)]
pub enum RecoveryError {
    /// Different numbers of cell indices and cells were supplied.
    NumCellIndicesNotEqualToNumCells {
        num_cell_indices: usize,
        num_cells: usize,
    },
    /// A cell index pointed past the extended blob.
    CellIndexOutOfRange {
        cell_index: CellIndex,
        max_number_of_cells: u64,
    },
    /// The same cell was supplied more than once.
    CellIndicesNotUnique,
    /// Fewer than half of the cells were supplied; the code cannot
    /// reconstruct from that.
    NotEnoughCellsToReconstruct {
        num_cells_received: usize,
        min_cells_needed: usize,
    },
    /// More cells than the extended blob contains were supplied.
    TooManyCellsReceived {
        num_cells_received: usize,
        max_cells: usize,
    },
    /// The underlying erasure decoder rejected the evaluations.
    ErasureCode(ErasureCodeError),
}

impl From<ErasureCodeError> for RecoveryError {
    fn from(value: ErasureCodeError) -> Self {
        Self::ErasureCode(value)
    }
}

/// Failures of trusted-setup loading and validation.
#[derive(Debug)]
pub enum SetupError {
    /// A G1 table did not hold exactly `NUM_G1_POINTS` points.
    WrongNumberOfG1Points { expected: usize, got: usize },
    /// The G2 table did not hold exactly `NUM_G2_POINTS` points.
    WrongNumberOfG2Points { expected: usize, got: usize },
    /// A G1 byte table was not a whole number of 48-byte points.
    G1BytesNotAMultipleOfPointSize { length: usize },
    /// A G2 byte table was not a whole number of 96-byte points.
    G2BytesNotAMultipleOfPointSize { length: usize },
    /// 48 bytes that did not decompress to a subgroup point.
    InvalidG1Point { bytes: Box<[u8; 48]> },
    /// 96 bytes that did not decompress to a subgroup point.
    InvalidG2Point { bytes: Box<[u8; 96]> },
    /// The supposed Lagrange table satisfied the monomial-basis pairing
    /// relation, i.e. the two G1 tables were swapped.
    LagrangeTableInMonomialForm,
    /// The text-format setup file could not be parsed.
    ParseError { reason: String },
}
