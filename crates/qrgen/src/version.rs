use crate::error::QrError;

/// A symbol version number between 1 and 40 (inclusive).
///
/// The version fixes the side length of the module grid: `4·version + 17`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The smallest version defined by the Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The largest version defined by the Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version from the given number, rejecting anything outside
    /// [1, 40].
    pub fn new(ver: u8) -> Result<Self, QrError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(QrError::Invariant("version number out of range"))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub fn value(self) -> u8 {
        self.0
    }
}
