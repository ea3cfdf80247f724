use ff::Field;

/// Failure modes of [`batch_inverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchInversionError {
    /// The input slice was empty.
    EmptyInput,
    /// Some element of the input was zero. Zero has no inverse, and which
    /// element it was is not reported; the whole batch is rejected.
    ZeroElement,
}

/// Inverts every element of `values` in place using Montgomery's trick:
/// one field inversion plus `3(n-1)` multiplications instead of `n`
/// inversions.
///
/// On error the input slice is left unchanged; callers must not assume
/// anything about its contents beyond that.
pub fn batch_inverse<F: Field>(values: &mut [F]) -> Result<(), BatchInversionError> {
    let mut scratchpad = Vec::with_capacity(values.len());
    batch_inverse_scratch_pad(values, &mut scratchpad)
}

/// Same as [`batch_inverse`], reusing a caller-provided scratch buffer to
/// avoid reallocation when invoked in a loop.
pub fn batch_inverse_scratch_pad<F: Field>(
    values: &mut [F],
    scratchpad: &mut Vec<F>,
) -> Result<(), BatchInversionError> {
    if values.is_empty() {
        return Err(BatchInversionError::EmptyInput);
    }

    scratchpad.clear();
    scratchpad.reserve(values.len());

    // Forward pass: scratchpad[i] = v_0 * v_1 * ... * v_i.
    let mut acc = F::ONE;
    for value in values.iter() {
        acc *= value;
        scratchpad.push(acc);
    }

    // The running product is zero iff some input was zero. Nothing has
    // been written back to `values` yet, so bailing out here leaves the
    // input intact.
    let mut acc = Option::<F>::from(acc.invert()).ok_or(BatchInversionError::ZeroElement)?;

    // Backward pass: peel one element off the running product at a time.
    //   acc = (v_0 * ... * v_i)^-1
    //   v_i^-1 = acc * (v_0 * ... * v_{i-1})
    for i in (0..values.len()).rev() {
        let prefix = if i == 0 { F::ONE } else { scratchpad[i - 1] };
        let next_acc = acc * values[i];
        values[i] = acc * prefix;
        acc = next_acc;
    }

    Ok(())
}
