//! Single-point KZG openings for blob polynomials held in evaluation
//! form over the bit-reversal-permuted domain.

use bls12_381::{
    batch_inversion::batch_inverse,
    ff::Field,
    group::Curve,
    lincomb::g1_lincomb,
    multi_pairings, G1Point, G2Point, G2Prepared, Scalar,
};
use polynomial::domain::Domain;

/// The three setup points single-point verification needs.
#[derive(Debug, Clone)]
pub(crate) struct OpeningKey {
    /// `[1]G1`.
    pub gen_g1: G1Point,
    /// `[1]G2`.
    pub gen_g2: G2Point,
    /// `[tau]G2`.
    pub tau_g2: G2Point,
}

impl OpeningKey {
    /// Checks `e(C - [y]G1, G2) == e(proof, [tau]G2 - [z]G2)`, i.e. that
    /// `q(X) = (p(X) - y) / (X - z)` is a polynomial, which holds exactly
    /// when `p(z) = y`.
    pub(crate) fn verify_opening(
        &self,
        commitment: G1Point,
        z: Scalar,
        y: Scalar,
        proof: G1Point,
    ) -> bool {
        // [p(tau) - y]G1
        let commitment_minus_y: G1Point = (commitment - self.gen_g1 * y).to_affine();

        // [-1]G2 and [tau - z]G2
        let neg_gen_g2 = G2Prepared::from(-self.gen_g2);
        let tau_minus_z_g2 = G2Prepared::from((self.tau_g2 - self.gen_g2 * z).to_affine());

        multi_pairings(&[
            (&commitment_minus_y, &neg_gen_g2),
            (&proof, &tau_minus_z_g2),
        ])
    }

    /// Batched form of [`Self::verify_opening`]: folds all openings with
    /// powers of a random challenge into two MSMs and one pairing check.
    ///
    /// Checks `e(sum r^i (C_i - [y_i]G1) + sum r^i z_i proof_i, G2)
    ///          == e(sum r^i proof_i, [tau]G2)`.
    pub(crate) fn verify_openings_batch(
        &self,
        commitments: &[G1Point],
        zs: &[Scalar],
        ys: &[Scalar],
        proofs: &[G1Point],
        r_powers: &[Scalar],
    ) -> bool {
        assert!(
            commitments.len() == zs.len()
                && commitments.len() == ys.len()
                && commitments.len() == proofs.len()
                && commitments.len() == r_powers.len()
        );

        // sum r^i C_i + sum (r^i z_i) proof_i - (sum r^i y_i) G1
        let lhs_g1: G1Point = {
            let points: Vec<G1Point> = commitments
                .iter()
                .chain(proofs)
                .chain([&self.gen_g1])
                .copied()
                .collect();

            let y_combined: Scalar = r_powers.iter().zip(ys).map(|(r, y)| r * y).sum();
            let scalars: Vec<Scalar> = r_powers
                .iter()
                .copied()
                .chain(r_powers.iter().zip(zs).map(|(r, z)| r * z))
                .chain([-y_combined])
                .collect();

            g1_lincomb(&points, &scalars)
                .expect("scalars were built to match the points")
                .to_affine()
        };

        // sum r^i proof_i
        let rhs_g1: G1Point = g1_lincomb(proofs, r_powers)
            .expect("one challenge power per proof")
            .to_affine();

        multi_pairings(&[
            (&lhs_g1, &G2Prepared::from(-self.gen_g2)),
            (&rhs_g1, &G2Prepared::from(self.tau_g2)),
        ])
    }
}

/// Evaluates a polynomial given in bit-reversed evaluation form at an
/// arbitrary point.
///
/// When `z` is one of the domain points the stored evaluation is returned
/// directly — the barycentric formula would divide by zero there.
pub(crate) fn evaluate_in_evaluation_form(
    domain: &Domain,
    polynomial: &[Scalar],
    z: Scalar,
) -> Scalar {
    let roots = &domain.bit_reversed_roots;
    assert_eq!(polynomial.len(), roots.len());

    if let Some(m) = roots.iter().position(|root| *root == z) {
        return polynomial[m];
    }
    evaluate_out_of_domain(domain, polynomial, z)
}

/// The barycentric formula over the bit-reversed domain:
/// `p(z) = (z^n - 1)/n * sum_i p_i * w_i / (z - w_i)`.
fn evaluate_out_of_domain(domain: &Domain, polynomial: &[Scalar], z: Scalar) -> Scalar {
    let roots = &domain.bit_reversed_roots;
    let n = roots.len();

    // 1 / (z - w_i), all in one inversion.
    let mut denominators: Vec<Scalar> = roots.iter().map(|root| z - root).collect();
    batch_inverse(&mut denominators).expect("z is out of the domain, so no denominator is zero");

    let weighted_sum: Scalar = roots
        .iter()
        .zip(polynomial)
        .zip(&denominators)
        .map(|((root, p), denominator)| root * p * denominator)
        .sum();

    weighted_sum * (z.pow_vartime([n as u64]) - Scalar::ONE) * domain.size_inv
}

/// Computes `y = p(z)` together with the quotient
/// `q(X) = (p(X) - y) / (X - z)` in bit-reversed evaluation form, ready
/// to be committed against the Lagrange table.
pub(crate) fn evaluation_and_quotient(
    domain: &Domain,
    polynomial: &[Scalar],
    z: Scalar,
) -> (Scalar, Vec<Scalar>) {
    let position = domain
        .bit_reversed_roots
        .iter()
        .position(|root| *root == z);

    match position {
        Some(m) => quotient_within_domain(domain, polynomial, m),
        None => quotient_out_of_domain(domain, polynomial, z),
    }
}

fn quotient_out_of_domain(
    domain: &Domain,
    polynomial: &[Scalar],
    z: Scalar,
) -> (Scalar, Vec<Scalar>) {
    let roots = &domain.bit_reversed_roots;
    let n = roots.len();

    // 1 / (w_i - z); shared by the evaluation (negated) and the quotient.
    let mut inverses: Vec<Scalar> = roots.iter().map(|root| root - z).collect();
    batch_inverse(&mut inverses).expect("z is out of the domain, so no denominator is zero");

    // Barycentric evaluation, reusing the inverses:
    // p(z) = (z^n - 1)/n * sum_i p_i * w_i / (z - w_i)
    let weighted_sum: Scalar = roots
        .iter()
        .zip(polynomial)
        .zip(&inverses)
        .map(|((root, p), inverse)| -(root * p * inverse))
        .sum();
    let y = weighted_sum * (z.pow_vartime([n as u64]) - Scalar::ONE) * domain.size_inv;

    // q_i = (p_i - y) / (w_i - z)
    let quotient: Vec<Scalar> = polynomial
        .iter()
        .zip(&inverses)
        .map(|(p, inverse)| (p - y) * inverse)
        .collect();

    (y, quotient)
}

/// The in-domain case `z = w_m`. The generic formula would divide by zero
/// in slot `m`; instead that slot carries the balancing term
/// `q_m = sum_{i != m} (p_i - y) * w_i / (z * (z - w_i))`.
///
/// See "Dividing when one of the points is zero" in
/// <https://dankradfeist.de/ethereum/2021/06/18/pcs-multiproofs.html>.
fn quotient_within_domain(
    domain: &Domain,
    polynomial: &[Scalar],
    m: usize,
) -> (Scalar, Vec<Scalar>) {
    let roots = &domain.bit_reversed_roots;
    let z = roots[m];
    let y = polynomial[m];

    // First inversion batch: 1 / (w_i - z), with the untouched slot m
    // pinned to one so the batch stays invertible.
    let mut inverses: Vec<Scalar> = roots
        .iter()
        .enumerate()
        .map(|(i, root)| if i == m { Scalar::ONE } else { root - z })
        .collect();
    batch_inverse(&mut inverses).expect("slot m was pinned to one");

    let mut quotient: Vec<Scalar> = polynomial
        .iter()
        .zip(&inverses)
        .map(|(p, inverse)| (p - y) * inverse)
        .collect();

    // Second inversion batch: 1 / (z * (z - w_i)), slot m pinned again.
    let mut shifted_inverses: Vec<Scalar> = roots
        .iter()
        .enumerate()
        .map(|(i, root)| if i == m { Scalar::ONE } else { z * (z - root) })
        .collect();
    batch_inverse(&mut shifted_inverses).expect("slot m was pinned to one");

    let mut accumulator = Scalar::ZERO;
    for (i, root) in roots.iter().enumerate() {
        if i == m {
            continue;
        }
        accumulator += (polynomial[i] - y) * root * shifted_inverses[i];
    }
    quotient[m] = accumulator;

    (y, quotient)
}

#[cfg(test)]
mod tests {
    use polynomial::reverse_bit_order;

    use super::*;

    /// Direct evaluation of the interpolant through
    /// `(bit_reversed_roots[i], polynomial[i])` via monomial form.
    fn eval_via_coefficients(domain: &Domain, polynomial: &[Scalar], z: Scalar) -> Scalar {
        let mut natural_order = polynomial.to_vec();
        reverse_bit_order(&mut natural_order);
        let coefficients = domain.ifft_scalars(natural_order);
        coefficients.eval(&z)
    }

    fn test_domain_and_poly() -> (Domain, Vec<Scalar>) {
        let domain = Domain::new(64);
        let polynomial: Vec<Scalar> = (0..64u64).map(|i| Scalar::from(i * i + 1)).collect();
        (domain, polynomial)
    }

    #[test]
    fn barycentric_matches_coefficient_evaluation() {
        let (domain, polynomial) = test_domain_and_poly();

        for z in [Scalar::from(0u64), Scalar::from(7u64), -Scalar::from(123u64)] {
            assert_eq!(
                evaluate_in_evaluation_form(&domain, &polynomial, z),
                eval_via_coefficients(&domain, &polynomial, z)
            );
        }
    }

    #[test]
    fn in_domain_evaluation_returns_the_stored_value() {
        let (domain, polynomial) = test_domain_and_poly();

        for m in [0, 1, 5, 63] {
            let z = domain.bit_reversed_roots[m];
            assert_eq!(
                evaluate_in_evaluation_form(&domain, &polynomial, z),
                polynomial[m]
            );
        }
    }

    #[test]
    fn quotient_interpolates_to_a_true_quotient() {
        // Check q(X) * (X - z) == p(X) - y as polynomials, for both the
        // out-of-domain and in-domain paths.
        let (domain, polynomial) = test_domain_and_poly();

        let mut zs = vec![Scalar::from(987654u64)];
        zs.push(domain.bit_reversed_roots[3]);

        for z in zs {
            let (y, quotient_brp) = evaluation_and_quotient(&domain, &polynomial, z);

            let mut quotient = quotient_brp;
            reverse_bit_order(&mut quotient);
            let q_coeffs = domain.ifft_scalars(quotient);

            let mut p_evals = polynomial.clone();
            reverse_bit_order(&mut p_evals);
            let p_coeffs = domain.ifft_scalars(p_evals);

            // Compare at a few random-ish points off the domain.
            for x in [Scalar::from(3u64), -Scalar::from(17u64), Scalar::from(999u64)] {
                assert_eq!(
                    q_coeffs.eval(&x) * (x - z),
                    p_coeffs.eval(&x) - y,
                    "quotient mismatch at evaluation point"
                );
            }
        }
    }
}
