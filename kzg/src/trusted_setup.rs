use bls12_381::{multi_pairings, G1Point, G2Point, G2Prepared};
use polynomial::reverse_bit_order;

use crate::{
    constants::{BYTES_PER_G1_POINT, BYTES_PER_G2_POINT, NUM_G1_POINTS, NUM_G2_POINTS},
    errors::SetupError,
};

/// The structured reference string produced by the trusted-setup
/// ceremony, in the three tables every operation draws from.
///
/// The setup is an ordinary owned value: load it once, then hand shared
/// references to as many [`crate::KzgContext`]s and threads as needed.
/// Nothing here is ever mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedSetup {
    /// `[tau^i]G1` in monomial basis, `NUM_G1_POINTS` entries.
    pub g1_monomial: Vec<G1Point>,
    /// The Lagrange-basis G1 table over the blob domain, with the
    /// bit-reversal permutation already applied: entry `i` is the point
    /// that multiplies blob field element `i` in a commitment MSM.
    pub g1_lagrange_brp: Vec<G1Point>,
    /// `[tau^i]G2`, `NUM_G2_POINTS` entries; entry 1 is `[tau]G2`.
    pub g2_monomial: Vec<G2Point>,
}

impl TrustedSetup {
    /// Builds a setup from already-decompressed points.
    ///
    /// `g1_lagrange` is expected in natural Lagrange order; the
    /// bit-reversal permutation is applied here. Table lengths and the
    /// Lagrange/monomial mix-up check are enforced; the points themselves
    /// are trusted to be valid group elements.
    pub fn from_points(
        g1_monomial: Vec<G1Point>,
        mut g1_lagrange: Vec<G1Point>,
        g2_monomial: Vec<G2Point>,
    ) -> Result<Self, SetupError> {
        if g1_monomial.len() != NUM_G1_POINTS {
            return Err(SetupError::WrongNumberOfG1Points {
                expected: NUM_G1_POINTS,
                got: g1_monomial.len(),
            });
        }
        if g1_lagrange.len() != NUM_G1_POINTS {
            return Err(SetupError::WrongNumberOfG1Points {
                expected: NUM_G1_POINTS,
                got: g1_lagrange.len(),
            });
        }
        if g2_monomial.len() != NUM_G2_POINTS {
            return Err(SetupError::WrongNumberOfG2Points {
                expected: NUM_G2_POINTS,
                got: g2_monomial.len(),
            });
        }

        reject_monomial_disguised_as_lagrange(&g1_lagrange, &g2_monomial)?;

        reverse_bit_order(&mut g1_lagrange);

        Ok(Self {
            g1_monomial,
            g1_lagrange_brp: g1_lagrange,
            g2_monomial,
        })
    }

    /// Builds a setup from raw compressed point bytes: `NUM_G1_POINTS`
    /// 48-byte G1 monomial points, the same number of 48-byte G1 Lagrange
    /// points (natural order), and `NUM_G2_POINTS` 96-byte G2 points.
    ///
    /// Every point is decompressed with curve and subgroup checks.
    pub fn from_bytes(
        g1_monomial_bytes: &[u8],
        g1_lagrange_bytes: &[u8],
        g2_monomial_bytes: &[u8],
    ) -> Result<Self, SetupError> {
        let g1_monomial = deserialize_g1_table(g1_monomial_bytes)?;
        let g1_lagrange = deserialize_g1_table(g1_lagrange_bytes)?;
        let g2_monomial = deserialize_g2_table(g2_monomial_bytes)?;

        Self::from_points(g1_monomial, g1_lagrange, g2_monomial)
    }

    /// Parses the whitespace-separated text format the reference setup
    /// file ships in:
    ///
    /// ```text
    /// <n1> <n2>
    /// <n1 hex-encoded 48-byte G1 Lagrange points>
    /// <n2 hex-encoded 96-byte G2 monomial points>
    /// <n1 hex-encoded 48-byte G1 monomial points>
    /// ```
    pub fn from_text(contents: &str) -> Result<Self, SetupError> {
        let mut tokens = contents.split_whitespace();

        let mut next_token = |what: &str| {
            tokens.next().ok_or_else(|| SetupError::ParseError {
                reason: format!("unexpected end of file, expected {what}"),
            })
        };

        let n1: usize = parse_count(next_token("the G1 point count")?)?;
        let n2: usize = parse_count(next_token("the G2 point count")?)?;

        let mut g1_lagrange_bytes = Vec::with_capacity(n1 * BYTES_PER_G1_POINT);
        for _ in 0..n1 {
            let token = next_token("a G1 Lagrange point")?;
            g1_lagrange_bytes.extend(parse_hex_point(token, BYTES_PER_G1_POINT)?);
        }

        let mut g2_monomial_bytes = Vec::with_capacity(n2 * BYTES_PER_G2_POINT);
        for _ in 0..n2 {
            let token = next_token("a G2 monomial point")?;
            g2_monomial_bytes.extend(parse_hex_point(token, BYTES_PER_G2_POINT)?);
        }

        let mut g1_monomial_bytes = Vec::with_capacity(n1 * BYTES_PER_G1_POINT);
        for _ in 0..n1 {
            let token = next_token("a G1 monomial point")?;
            g1_monomial_bytes.extend(parse_hex_point(token, BYTES_PER_G1_POINT)?);
        }

        Self::from_bytes(&g1_monomial_bytes, &g1_lagrange_bytes, &g2_monomial_bytes)
    }
}

/// The ceremony files have shipped with the two G1 tables swapped before.
/// A monomial table satisfies `e(table[1], G2) == e(table[0], [tau]G2)`
/// (both sides being `e(G1, G2)^tau`); a genuine Lagrange table does not.
fn reject_monomial_disguised_as_lagrange(
    g1_lagrange: &[G1Point],
    g2_monomial: &[G2Point],
) -> Result<(), SetupError> {
    let g2_gen = G2Prepared::from(g2_monomial[0]);
    let tau_g2 = G2Prepared::from(g2_monomial[1]);

    let looks_monomial = multi_pairings(&[
        (&g1_lagrange[1], &g2_gen),
        (&(-g1_lagrange[0]), &tau_g2),
    ]);

    if looks_monomial {
        return Err(SetupError::LagrangeTableInMonomialForm);
    }
    Ok(())
}

fn deserialize_g1_table(bytes: &[u8]) -> Result<Vec<G1Point>, SetupError> {
    if bytes.len() % BYTES_PER_G1_POINT != 0 {
        return Err(SetupError::G1BytesNotAMultipleOfPointSize {
            length: bytes.len(),
        });
    }

    bytes
        .chunks_exact(BYTES_PER_G1_POINT)
        .map(|chunk| {
            let chunk: &[u8; BYTES_PER_G1_POINT] =
                chunk.try_into().expect("chunks_exact yields full chunks");
            Option::<G1Point>::from(G1Point::from_compressed(chunk)).ok_or_else(|| {
                SetupError::InvalidG1Point {
                    bytes: Box::new(*chunk),
                }
            })
        })
        .collect()
}

fn deserialize_g2_table(bytes: &[u8]) -> Result<Vec<G2Point>, SetupError> {
    if bytes.len() % BYTES_PER_G2_POINT != 0 {
        return Err(SetupError::G2BytesNotAMultipleOfPointSize {
            length: bytes.len(),
        });
    }

    bytes
        .chunks_exact(BYTES_PER_G2_POINT)
        .map(|chunk| {
            let chunk: &[u8; BYTES_PER_G2_POINT] =
                chunk.try_into().expect("chunks_exact yields full chunks");
            Option::<G2Point>::from(G2Point::from_compressed(chunk)).ok_or_else(|| {
                SetupError::InvalidG2Point {
                    bytes: Box::new(*chunk),
                }
            })
        })
        .collect()
}

fn parse_count(token: &str) -> Result<usize, SetupError> {
    token.parse().map_err(|_| SetupError::ParseError {
        reason: format!("expected a decimal point count, got {token:?}"),
    })
}

fn parse_hex_point(token: &str, point_size: usize) -> Result<Vec<u8>, SetupError> {
    let token = token.strip_prefix("0x").unwrap_or(token);
    let bytes = hex::decode(token).map_err(|_| SetupError::ParseError {
        reason: format!("point is not valid hex: {token:?}"),
    })?;
    if bytes.len() != point_size {
        return Err(SetupError::ParseError {
            reason: format!(
                "expected a {point_size}-byte point, got {} bytes",
                bytes.len()
            ),
        });
    }
    Ok(bytes)
}
