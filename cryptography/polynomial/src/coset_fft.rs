use bls12_381::{ff::Field, Scalar};

/// Shift element for coset FFTs: evaluating over `g * H` instead of the
/// subgroup `H` itself. The inverse is cached for the interpolation
/// direction.
#[derive(Debug, Clone)]
pub struct CosetFFT {
    pub generator: Scalar,
    pub generator_inv: Scalar,
}

impl CosetFFT {
    pub fn new(generator: Scalar) -> Self {
        Self {
            generator,
            generator_inv: generator.invert().expect("coset shift must be nonzero"),
        }
    }
}
