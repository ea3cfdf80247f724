use crate::{traits::*, G1Point, G1Projective, G2Point, G2Projective, Scalar};

/// Computes the linear combination `sum scalars[i] * points[i]` over G1.
///
/// Returns `None` when the two slices differ in length. Empty inputs
/// produce the group identity.
///
/// blst's multi-exponentiation collapses the whole result to the identity
/// if any input point is the identity, so identity points are filtered out
/// before the call; their terms contribute nothing to the sum anyway.
pub fn g1_lincomb(points: &[G1Point], scalars: &[Scalar]) -> Option<G1Projective> {
    if points.len() != scalars.len() {
        return None;
    }

    let (points, scalars): (Vec<G1Projective>, Vec<Scalar>) = points
        .iter()
        .zip(scalars)
        .filter(|(point, _)| !bool::from(point.is_identity()))
        .map(|(point, scalar)| (G1Projective::from(point), *scalar))
        .unzip();

    if points.is_empty() {
        return Some(G1Projective::identity());
    }

    Some(G1Projective::multi_exp(&points, &scalars))
}

/// Computes the linear combination `sum scalars[i] * points[i]` over G2.
///
/// Same contract as [`g1_lincomb`].
pub fn g2_lincomb(points: &[G2Point], scalars: &[Scalar]) -> Option<G2Projective> {
    if points.len() != scalars.len() {
        return None;
    }

    let (points, scalars): (Vec<G2Projective>, Vec<Scalar>) = points
        .iter()
        .zip(scalars)
        .filter(|(point, _)| !bool::from(point.is_identity()))
        .map(|(point, scalar)| (G2Projective::from(point), *scalar))
        .unzip();

    if points.is_empty() {
        return Some(G2Projective::identity());
    }

    Some(G2Projective::multi_exp(&points, &scalars))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn empty_inputs_give_identity() {
        assert_eq!(g1_lincomb(&[], &[]), Some(G1Projective::identity()));
        assert_eq!(g2_lincomb(&[], &[]), Some(G2Projective::identity()));
    }

    #[test]
    fn length_mismatch_gives_none() {
        let points = vec![G1Point::generator()];
        assert_eq!(g1_lincomb(&points, &[]), None);

        let points = vec![G2Point::generator(); 2];
        let scalars = vec![Scalar::ONE];
        assert_eq!(g2_lincomb(&points, &scalars), None);
    }

    #[test]
    fn identity_points_do_not_poison_the_sum() {
        let generator = G1Point::generator();
        let points = vec![generator, G1Point::identity(), generator];
        let scalars = vec![Scalar::ONE, Scalar::from(100u64), Scalar::from(2u64)];

        let result = g1_lincomb(&points, &scalars).expect("lengths match");
        assert_eq!(result, G1Projective::generator() * Scalar::from(3u64));
    }

    #[test]
    fn zero_scalars_contribute_nothing() {
        let generator = G2Point::generator();
        let points = vec![generator, generator];
        let scalars = vec![Scalar::ZERO, Scalar::ONE];

        let result = g2_lincomb(&points, &scalars).expect("lengths match");
        assert_eq!(result, G2Projective::generator());
    }

    #[test]
    fn g1_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<G1Point> = (0..10)
            .map(|_| G1Projective::random(&mut rng).into())
            .collect();
        let scalars: Vec<Scalar> = (0..10).map(|_| Scalar::random(&mut rng)).collect();

        let expected: G1Projective = points
            .iter()
            .zip(&scalars)
            .map(|(point, scalar)| G1Projective::from(*point) * scalar)
            .sum();

        assert_eq!(g1_lincomb(&points, &scalars), Some(expected));
    }

    #[test]
    fn g2_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(43);
        let points: Vec<G2Point> = (0..10)
            .map(|_| G2Projective::random(&mut rng).into())
            .collect();
        let scalars: Vec<Scalar> = (0..10).map(|_| Scalar::random(&mut rng)).collect();

        let expected: G2Projective = points
            .iter()
            .zip(&scalars)
            .map(|(point, scalar)| G2Projective::from(*point) * scalar)
            .sum();

        assert_eq!(g2_lincomb(&points, &scalars), Some(expected));
    }
}
