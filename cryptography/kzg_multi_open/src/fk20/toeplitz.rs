use bls12_381::Scalar;

/// A Toeplitz matrix, stored as its first row and first column. Both have
/// length `n` and share their first entry.
#[derive(Debug, Clone)]
pub(crate) struct ToeplitzMatrix {
    row: Vec<Scalar>,
    col: Vec<Scalar>,
}

impl ToeplitzMatrix {
    pub(crate) fn new(row: Vec<Scalar>, col: Vec<Scalar>) -> Self {
        assert!(!row.is_empty(), "matrix dimension must be nonzero");
        assert_eq!(
            row.len(),
            col.len(),
            "row and column of a square Toeplitz matrix have the same length"
        );
        Self { row, col }
    }

    pub(crate) fn dimension(&self) -> usize {
        self.row.len()
    }

    /// First column of the `2n`-dimensional circulant matrix the Toeplitz
    /// matrix embeds into. A circulant matrix-vector product is a
    /// convolution, so it can be computed with FFTs; the first `n` entries
    /// of the product against a zero-extended vector recover the Toeplitz
    /// product.
    pub(crate) fn circulant_embedding(self) -> Vec<Scalar> {
        let mut embedding = self.col;
        // The slot joining column and reversed row is never read back out
        // of the product's first half; the row's first entry keeps the
        // matrix formally circulant.
        embedding.push(self.row[0]);
        embedding.extend(self.row[1..].iter().rev());
        embedding
    }

    /// Reference Toeplitz product against a G1 vector, one inner product
    /// per output row. Only used to cross-check the FFT path.
    #[cfg(test)]
    pub(crate) fn vector_mul_g1(
        &self,
        vector: &[bls12_381::G1Projective],
    ) -> Vec<bls12_381::G1Projective> {
        use bls12_381::{group::Group, G1Projective};

        let n = self.dimension();
        assert_eq!(vector.len(), n);

        (0..n)
            .map(|i| {
                let mut acc = G1Projective::identity();
                for j in 0..n {
                    // Entry (i, j) is row[j - i] above the diagonal and
                    // col[i - j] below it.
                    let entry = if i <= j {
                        self.row[j - i]
                    } else {
                        self.col[i - j]
                    };
                    acc += vector[j] * entry;
                }
                acc
            })
            .collect()
    }
}
