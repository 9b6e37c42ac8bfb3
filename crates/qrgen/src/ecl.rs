use std::fmt;
use std::str::FromStr;

use crate::error::QrError;

/// The error correction level in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Ecl {
    /// The QR Code can tolerate about  7% erroneous codewords.
    Low,
    /// The QR Code can tolerate about 15% erroneous codewords.
    Medium,
    /// The QR Code can tolerate about 25% erroneous codewords.
    Quartile,
    /// The QR Code can tolerate about 30% erroneous codewords.
    High,
}

impl Ecl {
    /// Row index into the capacity tables (L=0, M=1, Q=2, H=3).
    pub fn ordinal(self) -> usize {
        use Ecl::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// The 2-bit value carried in the format information (L=1, M=0, Q=3,
    /// H=2). Deliberately not the same ordering as [`Ecl::ordinal`].
    pub fn format_bits(self) -> u8 {
        use Ecl::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    /// The single-letter name used on the command line.
    pub fn letter(self) -> char {
        use Ecl::*;
        match self {
            Low => 'L',
            Medium => 'M',
            Quartile => 'Q',
            High => 'H',
        }
    }
}

impl fmt::Display for Ecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Ecl {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" | "l" => Ok(Ecl::Low),
            "M" | "m" => Ok(Ecl::Medium),
            "Q" | "q" => Ok(Ecl::Quartile),
            "H" | "h" => Ok(Ecl::High),
            _ => Err(QrError::Invariant("unknown error correction level")),
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn order_table_ordinals_by_strength() {
        assert_eq!(Ecl::Low.ordinal(), 0);
        assert_eq!(Ecl::Medium.ordinal(), 1);
        assert_eq!(Ecl::Quartile.ordinal(), 2);
        assert_eq!(Ecl::High.ordinal(), 3);
    }

    #[test]
    fn use_the_format_bit_ordering() {
        assert_eq!(Ecl::Low.format_bits(), 1);
        assert_eq!(Ecl::Medium.format_bits(), 0);
        assert_eq!(Ecl::Quartile.format_bits(), 3);
        assert_eq!(Ecl::High.format_bits(), 2);
    }

    #[test]
    fn parse_letters_in_either_case() {
        assert_eq!("L".parse::<Ecl>().unwrap(), Ecl::Low);
        assert_eq!("q".parse::<Ecl>().unwrap(), Ecl::Quartile);
        assert_eq!("h".parse::<Ecl>().unwrap(), Ecl::High);
    }

    #[test]
    fn reject_unknown_letters() {
        assert!("X".parse::<Ecl>().is_err());
        assert!("".parse::<Ecl>().is_err());
    }
}
