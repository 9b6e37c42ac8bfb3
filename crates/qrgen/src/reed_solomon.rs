//! Reed-Solomon error correction over GF(2⁸).
//!
//! The field is reduced by the primitive polynomial
//! x⁸ + x⁴ + x³ + x² + 1 (0x11D); α = 0x02 generates its multiplicative
//! group. Each codeword block gets the remainder of its data polynomial
//! divided by the generator polynomial appended as ECC bytes.

use crate::error::QrError;

/// Multiplies two field elements.
pub fn gf_mul(x: u8, y: u8) -> u8 {
    // Russian peasant multiplication; the x⁸ term of 0x11D falls off with
    // the shift, leaving 0x1D.
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

/// Builds the generator polynomial of the given degree: the product
/// (x − α⁰)(x − α¹)···(x − α^(degree−1)).
///
/// Coefficients run from x^(degree−1) down to x⁰; the leading coefficient
/// is always 1 and is left implicit, so the result has exactly `degree`
/// entries. The degree must lie in 1..=255.
pub fn generator(degree: usize) -> Result<Vec<u8>, QrError> {
    if !(1..=255).contains(&degree) {
        return Err(QrError::Invariant("generator degree out of range"));
    }
    // Start from the monomial x⁰.
    let mut coeffs = vec![0u8; degree - 1];
    coeffs.push(1);

    // Multiply the running product by (x − α^i), then advance the root.
    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            coeffs[j] = gf_mul(coeffs[j], root);
            if j + 1 < degree {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    Ok(coeffs)
}

/// Polynomial long division of `data` by `divisor`; the remainder is the
/// block's error correction codewords, one byte per divisor coefficient.
pub fn remainder(data: &[u8], divisor: &[u8]) -> Vec<u8> {
    let mut rem = vec![0u8; divisor.len()];
    for &b in data {
        let factor = b ^ rem.remove(0);
        rem.push(0);
        for (r, &d) in rem.iter_mut().zip(divisor) {
            *r ^= gf_mul(d, factor);
        }
    }
    rem
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn multiply_commutatively() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(gf_mul(a, b), gf_mul(b, a));
            }
        }
    }

    #[test]
    fn treat_one_as_identity_and_zero_as_annihilator() {
        for a in 0..=255u8 {
            assert_eq!(gf_mul(a, 1), a);
            assert_eq!(gf_mul(a, 0), 0);
        }
    }

    #[test]
    fn wrap_multiplication_through_the_primitive_polynomial() {
        // α⁸ = α⁴ + α³ + α² + 1 under 0x11D.
        assert_eq!(gf_mul(0x80, 0x02), 0x1D);
    }

    #[test]
    fn build_the_degree_two_generator() {
        // (x − 1)(x − α) = x² + 3x + 2.
        assert_eq!(generator(2).unwrap(), vec![3, 2]);
    }

    #[test]
    fn build_generators_with_one_entry_per_degree() {
        for degree in [1, 7, 10, 30] {
            assert_eq!(generator(degree).unwrap().len(), degree);
        }
    }

    #[test]
    fn reject_degenerate_degrees() {
        assert!(generator(0).is_err());
        assert!(generator(256).is_err());
    }

    #[test]
    fn return_one_remainder_byte_per_divisor_coefficient() {
        let divisor = generator(10).unwrap();
        assert_eq!(remainder(b"hello", &divisor).len(), 10);
    }

    #[test]
    fn leave_zero_data_with_a_zero_remainder() {
        let divisor = generator(7).unwrap();
        assert_eq!(remainder(&[0u8; 19], &divisor), vec![0u8; 7]);
    }

    #[test]
    fn divide_a_systematic_codeword_evenly() {
        // Appending the remainder to the data yields a multiple of the
        // generator, so dividing again leaves nothing.
        let divisor = generator(13).unwrap();
        let data: Vec<u8> = (0u8..26).map(|i| i.wrapping_mul(37) ^ 0x5A).collect();
        let ecc = remainder(&data, &divisor);
        let mut codeword = data;
        codeword.extend_from_slice(&ecc);
        assert_eq!(remainder(&codeword, &divisor), vec![0u8; 13]);
    }
}
