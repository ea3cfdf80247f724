/// Failures of Reed-Solomon encoding or erasure recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErasureCodeError {
    /// The polynomial handed to `encode` has more coefficients than the
    /// code was configured for.
    PolynomialTooLarge {
        num_coefficients: usize,
        max_num_coefficients: usize,
    },
    /// An erasure position was not a valid index into a block.
    ErasureIndexOutOfRange {
        index: usize,
        block_size: usize,
    },
    /// More block positions are missing than the code can correct.
    TooManyErasures {
        num_erasures: usize,
        max_correctable: usize,
    },
    /// Recovery produced a polynomial of higher degree than the original
    /// message space, which means the supplied evaluations were not a
    /// codeword.
    RecoveredPolynomialTooLarge {
        num_coefficients: usize,
        expected_num_coefficients: usize,
    },
}
