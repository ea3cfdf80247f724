use bls12_381::{ff::Field, G1Projective, Scalar};
use polynomial::poly_coeff::PolyCoeff;

use crate::fk20::{batch_toeplitz::BatchToeplitz, toeplitz::ToeplitzMatrix};

/// Commits to the FK20 `h` polynomials.
///
/// The `h` polynomials are the quotients shared by all of the opening
/// proofs; committing to each of them directly would cost one large MSM
/// per proof. Section 3.1.1 of the FK20 paper rewrites the whole batch of
/// commitments as `coset_size` Toeplitz matrix products against fixed
/// windows of the SRS, which [`BatchToeplitz`] folds into one pass.
pub(crate) fn compute_h_poly_commitments(
    batch_toeplitz: &BatchToeplitz,
    mut polynomial: PolyCoeff,
    coset_size: usize,
) -> Vec<G1Projective> {
    assert!(coset_size.is_power_of_two());
    assert!(
        polynomial.len().is_power_of_two(),
        "expected a power-of-two number of coefficients, got {}",
        polynomial.len()
    );

    // The Toeplitz rows read the coefficients highest-degree first.
    polynomial.reverse();
    let rows = take_every_nth(&polynomial, coset_size);

    // Per 3.1.1 the matrix columns are zero except for the shared corner
    // entry.
    let matrices = rows
        .into_iter()
        .map(|row| {
            let mut col = vec![Scalar::ZERO; row.len()];
            col[0] = row[0];
            ToeplitzMatrix::new(row, col)
        })
        .collect();

    batch_toeplitz.sum_matrix_vector_mul(matrices)
}

/// Splits `list` into `n` strided subsequences:
/// `take_every_nth([a, b, c, d, e, f], 2) == [[a, c, e], [b, d, f]]`.
pub(crate) fn take_every_nth<T: Copy>(list: &[T], n: usize) -> Vec<Vec<T>> {
    (0..n)
        .map(|offset| list.iter().copied().skip(offset).step_by(n).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_every_nth_strides() {
        let list = vec![5, 4, 3, 2];
        assert_eq!(take_every_nth(&list, 2), vec![vec![5, 3], vec![4, 2]]);
        assert_eq!(
            take_every_nth(&list, 4),
            vec![vec![5], vec![4], vec![3], vec![2]]
        );
    }
}
