use std::ops::{Deref, DerefMut};

use bls12_381::{ff::Field, Scalar};

/// A polynomial in monomial form, coefficients in ascending degree order:
/// `p(x) = c[0] + c[1]*x + ... + c[n-1]*x^{n-1}`.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct PolyCoeff(pub Vec<Scalar>);

impl PolyCoeff {
    /// Pointwise sum `self + other`; the shorter operand is implicitly
    /// zero-padded.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (longer, shorter) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut sum = longer.clone();
        for (coefficient, &term) in sum.iter_mut().zip(shorter.iter()) {
            *coefficient += term;
        }
        sum
    }

    /// `-self`.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self(self.iter().map(|c| -*c).collect())
    }

    /// `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Evaluates at `x` by Horner's rule.
    #[must_use]
    pub fn eval(&self, x: &Scalar) -> Scalar {
        let mut acc = Scalar::ZERO;
        for coefficient in self.iter().rev() {
            acc = acc * x + coefficient;
        }
        acc
    }

    /// Schoolbook product `self * other`. Only used on the tiny
    /// polynomials of the vanishing-polynomial construction.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::default();
        }

        let mut product = vec![Scalar::ZERO; self.len() + other.len() - 1];
        for (i, a) in self.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                product[i + j] += a * b;
            }
        }
        Self(product)
    }
}

impl Deref for PolyCoeff {
    type Target = Vec<Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PolyCoeff {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Scalar>> for PolyCoeff {
    fn from(coefficients: Vec<Scalar>) -> Self {
        Self(coefficients)
    }
}

/// Builds the monic polynomial with exactly the given roots:
/// `Z(x) = (x - r_0)(x - r_1)...`.
pub fn vanishing_poly(roots: &[Scalar]) -> PolyCoeff {
    let mut poly = PolyCoeff(vec![Scalar::ONE]);
    for root in roots {
        poly = poly.mul(&PolyCoeff(vec![-root, Scalar::ONE]));
    }
    poly
}
