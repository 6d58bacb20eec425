//! OBJECT IDENTIFIER content encoding
//!
//! - The first two arcs (X.Y) are combined as `40*X + Y`
//! - Every arc is then written in base-128, big-endian, with bit 8 set on
//!   every octet except the last one of the arc
//!
//! Arcs are held as `u64`; larger arcs are rejected rather than silently
//! truncated.

use asn1_core::{Asn1Error, Asn1Result};
use once_cell::sync::Lazy;
use regex::Regex;

static OID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)*$").expect("OID pattern is a valid regex")
});

/// Encode a dotted-decimal OID (e.g. `"1.2.840.113549"`) into content octets
pub fn encode(oid: &str) -> Asn1Result<Vec<u8>> {
    if !OID_PATTERN.is_match(oid) {
        return Err(Asn1Error::invalid_argument(format!(
            "Argument is not a valid OID string: {:?}",
            oid
        )));
    }

    let arcs = oid
        .split('.')
        .map(|part| {
            part.parse::<u64>().map_err(|_| {
                Asn1Error::invalid_argument(format!("OID arc out of range: {}", part))
            })
        })
        .collect::<Asn1Result<Vec<u64>>>()?;

    if arcs.len() < 2 {
        return Err(Asn1Error::invalid_argument(format!(
            "OID must have at least two arcs: {:?}",
            oid
        )));
    }

    let first = arcs[0]
        .checked_mul(40)
        .and_then(|x| x.checked_add(arcs[1]))
        .ok_or_else(|| Asn1Error::invalid_argument("OID first arcs too large"))?;

    let mut bytes = Vec::with_capacity(arcs.len() * 2);
    encode_arc(first, &mut bytes);
    for &arc in &arcs[2..] {
        encode_arc(arc, &mut bytes);
    }

    Ok(bytes)
}

fn encode_arc(arc: u64, out: &mut Vec<u8>) {
    let mut temp = arc;
    let mut arc_bytes = Vec::new();

    // LSB first, then reverse
    loop {
        arc_bytes.push((temp & 0x7F) as u8);
        temp >>= 7;
        if temp == 0 {
            break;
        }
    }

    let last = arc_bytes.len() - 1;
    for (i, &byte) in arc_bytes.iter().rev().enumerate() {
        if i < last {
            out.push(byte | 0x80);
        } else {
            out.push(byte);
        }
    }
}

/// Decode OID content octets back into dotted-decimal text
///
/// The first decoded arc is split as `first / 40` and `first % 40`.
pub fn decode(bytes: &[u8]) -> Asn1Result<String> {
    let mut arcs: Vec<u64> = Vec::new();
    let mut value: u64 = 0;
    let mut pending = false;

    for &byte in bytes {
        if value > (u64::MAX >> 7) {
            return Err(Asn1Error::invalid_asn1("OID arc too large"));
        }
        value = (value << 7) | (byte & 0x7F) as u64;
        pending = true;

        if byte & 0x80 == 0 {
            arcs.push(value);
            value = 0;
            pending = false;
        }
    }

    if pending {
        return Err(Asn1Error::invalid_asn1("OID ends inside an arc"));
    }

    let Some((&first, rest)) = arcs.split_first() else {
        return Err(Asn1Error::invalid_asn1("Empty OID encoding"));
    };

    let mut parts = Vec::with_capacity(arcs.len() + 1);
    parts.push((first / 40).to_string());
    parts.push((first % 40).to_string());
    parts.extend(rest.iter().map(|arc| arc.to_string()));

    Ok(parts.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rsa() {
        let bytes = encode("1.2.840.113549").unwrap();
        assert_eq!(bytes, vec![0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D]);
    }

    #[test]
    fn test_decode_rsa() {
        let oid = decode(&[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D]).unwrap();
        assert_eq!(oid, "1.2.840.113549");
    }

    #[test]
    fn test_encode_two_arcs() {
        assert_eq!(encode("2.5").unwrap(), vec![0x55]);
        assert_eq!(encode("0.0").unwrap(), vec![0x00]);
    }

    #[test]
    fn test_encode_rejects_bad_grammar() {
        for bad in ["", "1.", ".1", "1..2", "1.a.3", "-1.2", "1.2 "] {
            let err = encode(bad).unwrap_err();
            assert!(!err.is_invalid_asn1(), "{:?} should be an argument error", bad);
        }
    }

    #[test]
    fn test_encode_rejects_single_arc() {
        let err = encode("1").unwrap_err();
        assert!(matches!(err, Asn1Error::InvalidArgument(_)));
    }

    #[test]
    fn test_encode_rejects_huge_arc() {
        assert!(encode("1.2.99999999999999999999999").is_err());
    }

    #[test]
    fn test_decode_truncated_arc() {
        let err = decode(&[0x2A, 0x86]).unwrap_err();
        assert!(err.is_invalid_asn1());
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[]).unwrap_err().is_invalid_asn1());
    }

    #[test]
    fn test_decode_overflow() {
        let mut bytes = vec![0x2A];
        bytes.extend_from_slice(&[0xFF; 10]);
        bytes.push(0x7F);
        assert!(decode(&bytes).unwrap_err().is_invalid_asn1());
    }
}
