use thiserror::Error;

/// Main error type for ASN.1 BER operations
///
/// Running out of input is not an error: readers report it as `Ok(None)` so
/// that a streaming caller can retry once more bytes have arrived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    /// The bytes (or the value being written) cannot be represented as a
    /// valid BER encoding under the supported subset.
    #[error("Invalid ASN.1 encoding: {0}")]
    InvalidAsn1(String),

    /// The caller passed an argument the operation cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Asn1Error {
    /// Build an [`Asn1Error::InvalidAsn1`] error
    pub fn invalid_asn1(msg: impl Into<String>) -> Self {
        Asn1Error::InvalidAsn1(msg.into())
    }

    /// Build an [`Asn1Error::InvalidArgument`] error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Asn1Error::InvalidArgument(msg.into())
    }

    /// Error raised when a decoded tag differs from the expected one
    pub fn tag_mismatch(expected: u8, found: u8) -> Self {
        Asn1Error::InvalidAsn1(format!(
            "Expected 0x{:02x}: got 0x{:02x}",
            expected, found
        ))
    }

    /// Whether this is the malformed-encoding kind
    pub fn is_invalid_asn1(&self) -> bool {
        matches!(self, Asn1Error::InvalidAsn1(_))
    }
}

/// Result type alias for ASN.1 BER operations
pub type Asn1Result<T> = Result<T, Asn1Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_mismatch_message() {
        let err = Asn1Error::tag_mismatch(0x02, 0x04);
        assert!(err.is_invalid_asn1());
        let msg = err.to_string();
        assert!(msg.contains("0x02"));
        assert!(msg.contains("0x04"));
    }

    #[test]
    fn test_invalid_argument_is_not_asn1() {
        let err = Asn1Error::invalid_argument("bad oid");
        assert!(!err.is_invalid_asn1());
        assert_eq!(err.to_string(), "Invalid argument: bad oid");
    }
}
