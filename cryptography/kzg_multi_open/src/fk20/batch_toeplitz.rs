use bls12_381::{
    fixed_base_msm::{FixedBaseMsm, FixedBasePrecomp},
    g1_batch_normalize, G1Point, G1Projective,
};
use maybe_rayon::prelude::*;
use polynomial::domain::Domain;

use crate::fk20::toeplitz::ToeplitzMatrix;

/// Computes `sum_i A_i * x_i` for a batch of Toeplitz matrices `A_i`
/// against a batch of G1 vectors `x_i` that is fixed at construction time.
///
/// The fixed vectors are lifted into the circulant FFT domain once, here,
/// and stored column-wise as fixed-base MSM inputs (with optional window
/// tables). Per call only the scalar-side FFTs, one MSM per column and a
/// single G1 inverse FFT remain; summing before that IFFT is what makes
/// the batch cheaper than `n` independent circulant products.
#[derive(Debug)]
pub(crate) struct BatchToeplitz {
    /// Number of matrix-vector products folded into one call.
    batch_size: usize,
    /// Length of each fixed vector, and of each product.
    vector_len: usize,
    /// Domain of size `2 * vector_len` that circulant products live in.
    circulant_domain: Domain,
    /// Entry `j` holds the `j`-th FFT coordinate of every fixed vector;
    /// the matching scalars per call are the `j`-th FFT coordinates of
    /// every matrix embedding.
    column_msms: Vec<FixedBaseMsm>,
}

impl BatchToeplitz {
    pub(crate) fn new(fixed_vectors: Vec<Vec<G1Point>>, precomp: FixedBasePrecomp) -> Self {
        let batch_size = fixed_vectors.len();
        let vector_len = fixed_vectors[0].len();
        assert!(
            fixed_vectors.iter().all(|v| v.len() == vector_len),
            "all fixed vectors must have the same length"
        );
        assert!(
            vector_len.is_power_of_two(),
            "vector length must be a power of two"
        );

        let circulant_domain = Domain::new(vector_len * 2);

        // FFT of every fixed vector, zero-extended onto the circulant
        // domain.
        let vector_ffts: Vec<Vec<G1Point>> = fixed_vectors
            .maybe_into_par_iter()
            .map(|vector| {
                let projective: Vec<G1Projective> =
                    vector.iter().map(G1Projective::from).collect();
                g1_batch_normalize(&circulant_domain.fft_g1(projective))
            })
            .collect();

        let column_msms = transpose(vector_ffts)
            .maybe_into_par_iter()
            .map(|column| FixedBaseMsm::new(column, precomp))
            .collect();

        Self {
            batch_size,
            vector_len,
            circulant_domain,
            column_msms,
        }
    }

    /// Computes `sum_i matrices[i] * x_i` against the fixed vectors.
    pub(crate) fn sum_matrix_vector_mul(&self, matrices: Vec<ToeplitzMatrix>) -> Vec<G1Projective> {
        assert_eq!(
            matrices.len(),
            self.batch_size,
            "one matrix per fixed vector"
        );
        for matrix in &matrices {
            assert_eq!(matrix.dimension(), self.vector_len);
        }

        // Scalar-side FFTs of the circulant embeddings, then regroup by
        // FFT coordinate so each coordinate becomes one inner product
        // against the cached point column.
        let embedding_ffts: Vec<Vec<_>> = matrices
            .into_iter()
            .map(|matrix| {
                self.circulant_domain
                    .fft_scalars(matrix.circulant_embedding().into())
            })
            .collect();
        let per_column_scalars = transpose(embedding_ffts);

        let products: Vec<G1Projective> = self
            .column_msms
            .maybe_par_iter()
            .zip(per_column_scalars)
            .map(|(msm, scalars)| msm.msm(&scalars))
            .collect();

        // Only the first half of the circulant product is the Toeplitz
        // product; the IFFT skips the scalar multiplications for the rest.
        self.circulant_domain
            .ifft_g1_take_n(products, Some(self.vector_len))
    }
}

/// Transposes a rectangular `Vec<Vec<T>>`.
pub(crate) fn transpose<T>(rows: Vec<Vec<T>>) -> Vec<Vec<T>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let num_columns = first.len();

    let mut columns: Vec<Vec<T>> = (0..num_columns)
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    for row in rows {
        assert_eq!(row.len(), num_columns, "rows must have equal length");
        for (column, value) in columns.iter_mut().zip(row) {
            column.push(value);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use bls12_381::{group::Group, G1Projective, Scalar};

    use super::*;

    #[test]
    fn transpose_rectangular() {
        let matrix = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(transpose(matrix), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert!(transpose(Vec::<Vec<u8>>::new()).is_empty());
    }

    #[test]
    fn batched_product_equals_sum_of_individual_products() {
        let num_matrices = 10u64;
        let dimension = 4u64;

        let mut matrices = Vec::new();
        let mut vectors_projective = Vec::new();
        let mut vectors_affine = Vec::new();

        for i in 0..num_matrices {
            let row: Vec<_> = (0..dimension).map(|j| Scalar::from(i + 5 * j + 1)).collect();
            let mut col: Vec<_> = (0..dimension).map(|j| Scalar::from(i + j + 1)).collect();
            col[0] = row[0];
            matrices.push(ToeplitzMatrix::new(row, col));

            let vector: Vec<_> = (0..dimension)
                .map(|j| G1Projective::generator() * Scalar::from(i + j + 1))
                .collect();
            vectors_affine.push(g1_batch_normalize(&vector));
            vectors_projective.push(vector);
        }

        let batch = BatchToeplitz::new(vectors_affine, FixedBasePrecomp::WindowBits(4));
        let got = batch.sum_matrix_vector_mul(matrices.clone());

        let mut expected = vec![G1Projective::identity(); dimension as usize];
        for (matrix, vector) in matrices.into_iter().zip(vectors_projective) {
            for (acc, term) in expected.iter_mut().zip(matrix.vector_mul_g1(&vector)) {
                *acc += term;
            }
        }

        assert_eq!(got, expected);
    }

    #[test]
    fn precomputation_policy_does_not_change_the_result() {
        let dimension = 8u64;
        let row: Vec<_> = (0..dimension).map(|j| Scalar::from(j + 2)).collect();
        let mut col: Vec<_> = (0..dimension).map(|j| Scalar::from(3 * j + 7)).collect();
        col[0] = row[0];

        let vector: Vec<_> = (0..dimension)
            .map(|j| G1Projective::generator() * Scalar::from(j + 1))
            .collect();
        let vector_affine = g1_batch_normalize(&vector);

        let without_tables = BatchToeplitz::new(vec![vector_affine.clone()], FixedBasePrecomp::Disabled)
            .sum_matrix_vector_mul(vec![ToeplitzMatrix::new(row.clone(), col.clone())]);
        let with_tables = BatchToeplitz::new(vec![vector_affine], FixedBasePrecomp::WindowBits(8))
            .sum_matrix_vector_mul(vec![ToeplitzMatrix::new(row, col)]);

        assert_eq!(without_tables, with_tables);
    }
}
