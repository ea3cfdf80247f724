//! Straight-line FK20 without the Toeplitz machinery, kept as a test
//! oracle for the optimized prover.

use bls12_381::{g1_batch_normalize, G1Point, Scalar};
use polynomial::{domain::Domain, poly_coeff::PolyCoeff, reverse_bit_order};

use crate::commit_key::CommitKey;

/// The `h` polynomials of section 3.1.1, read directly off the
/// coefficients: `h_i = floor(f / x^(i * coset_size))`.
pub(crate) fn compute_h_polys(polynomial: &PolyCoeff, coset_size: usize) -> Vec<&[Scalar]> {
    assert!(coset_size.is_power_of_two());
    assert!(polynomial.len().is_power_of_two());

    let num_proofs = polynomial.len() / coset_size;
    (1..=num_proofs)
        .map(|index| shift_polynomial(polynomial, index * coset_size))
        .collect()
}

/// `floor(f(x) / x^degree)`: drops the `degree` lowest coefficients.
fn shift_polynomial(polynomial: &PolyCoeff, degree: usize) -> &[Scalar] {
    if degree >= polynomial.len() {
        &[]
    } else {
        &polynomial[degree..]
    }
}

/// Computes all opening proofs and coset evaluations the slow way: one
/// commitment MSM per `h` polynomial, then the proof FFT.
pub(crate) fn open_multi_point(
    commit_key: &CommitKey,
    polynomial: &PolyCoeff,
    coset_size: usize,
    num_points_to_open: usize,
) -> (Vec<G1Point>, Vec<Vec<Scalar>>) {
    assert!(num_points_to_open > coset_size);
    assert!(commit_key.g1s.len() >= polynomial.len());

    let h_commitments = compute_h_polys(polynomial, coset_size)
        .iter()
        .map(|h| commit_key.commit_g1(h))
        .collect::<Vec<_>>();

    let proof_domain = Domain::new(num_points_to_open / coset_size);
    let mut proofs = g1_batch_normalize(&proof_domain.fft_g1(h_commitments));
    reverse_bit_order(&mut proofs);

    let evaluation_domain = Domain::new(num_points_to_open);
    let mut evaluations = evaluation_domain.fft_scalars(polynomial.clone());
    reverse_bit_order(&mut evaluations);
    let coset_evaluations = evaluations
        .chunks_exact(coset_size)
        .map(<[Scalar]>::to_vec)
        .collect();

    (proofs, coset_evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_polynomial_drops_low_coefficients() {
        // floor((x^2 + x + 10) / x) = x + 1
        let polynomial = PolyCoeff(vec![
            Scalar::from(10u64),
            Scalar::from(1u64),
            Scalar::from(1u64),
        ]);
        assert_eq!(
            shift_polynomial(&polynomial, 1),
            &[Scalar::from(1u64), Scalar::from(1u64)]
        );
        assert_eq!(shift_polynomial(&polynomial, 3), &[] as &[Scalar]);
    }
}
