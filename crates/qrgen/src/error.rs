use thiserror::Error;

/// The error type for QR Code construction.
///
/// Nothing in the encoder retries; both variants end the current encode.
/// Capacity exhaustion is the caller's to resolve (raise the maximum
/// version, lower the minimum error correction level, or shorten the
/// payload), while an invariant violation points at a bug rather than at
/// bad user data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit at the maximum allowed version under the
    /// requested minimum error correction level.
    #[error("payload needs {needed} bits but only {capacity} are available")]
    DataOverCapacity { needed: usize, capacity: usize },

    /// A violated precondition: an argument out of range or bit-buffer
    /// misuse.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
}
