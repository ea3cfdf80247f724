use bls12_381::{ff::Field, Scalar};
use polynomial::{domain::Domain, reverse_bit_order, reverse_bits};

/// log2 of a power of two.
pub(crate) fn log2(x: usize) -> u32 {
    assert!(x.is_power_of_two(), "x must be a power of two");
    x.trailing_zeros()
}

/// Returns the `num_cosets` shift elements whose cosets partition the
/// size-`num_points` domain.
///
/// The shifts are powers of the full domain's generator. With
/// `bit_reversed` set they come out in bit-reversed order, which matches
/// chunking the bit-reversal-permuted full domain into consecutive
/// cosets — the ordering the whole pipeline works in.
pub(crate) fn coset_gens(num_points: usize, num_cosets: usize, bit_reversed: bool) -> Vec<Scalar> {
    let generator = Domain::new(num_points).generator;
    let bits = log2(num_cosets);

    (0..num_cosets)
        .map(|i| {
            let exponent = if bit_reversed {
                reverse_bits(i, bits)
            } else {
                i
            };
            generator.pow_vartime([exponent as u64])
        })
        .collect()
}

/// Reassembles bit-reversed per-coset evaluations into a single vector
/// ordered as a plain FFT over the full domain would produce it, filling
/// missing cosets with zeroes.
///
/// Input cosets are addressed by their bit-reversed coset index (the
/// cell index of the public API). In domain order a coset's points are no
/// longer contiguous: the points of input coset `c` land at positions
/// `reverse_bits(c) + k * num_cosets`. The returned index vector gives
/// each input coset's position in that interleaving, i.e.
/// `reverse_bits(c)`.
///
/// Returns `None` when the input is empty, the cosets have unequal sizes,
/// or a coset index is out of range. Duplicate indices are the caller's
/// responsibility.
pub fn recover_evaluations_in_domain_order(
    domain_size: usize,
    coset_indices: Vec<usize>,
    coset_evaluations: Vec<Vec<Scalar>>,
) -> Option<(Vec<usize>, Vec<Scalar>)> {
    assert_eq!(coset_indices.len(), coset_evaluations.len());

    if coset_indices.is_empty() {
        return None;
    }

    let coset_len = coset_evaluations[0].len();
    if coset_evaluations.iter().any(|coset| coset.len() != coset_len) {
        return None;
    }

    let num_cosets = domain_size / coset_len;
    if coset_indices.iter().any(|&index| index >= num_cosets) {
        return None;
    }

    // Lay the cosets out contiguously in bit-reversed order, then undo the
    // permutation once over the whole vector.
    let mut evaluations = vec![Scalar::ZERO; domain_size];
    for (&coset_index, coset) in coset_indices.iter().zip(coset_evaluations) {
        let start = coset_index * coset_len;
        evaluations[start..start + coset_len].copy_from_slice(&coset);
    }
    reverse_bit_order(&mut evaluations);

    let coset_index_bits = log2(num_cosets);
    let domain_order_indices = coset_indices
        .into_iter()
        .map(|index| reverse_bits(index, coset_index_bits))
        .collect();

    Some((domain_order_indices, evaluations))
}
