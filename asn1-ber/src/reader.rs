//! BER reader
//!
//! # Usage Example
//!
//! ```rust
//! use asn1_ber::Reader;
//!
//! let data = [0x30, 0x06, 0x02, 0x01, 0x05, 0x01, 0x01, 0xFF];
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.read_sequence()?, Some(0x30));
//! assert_eq!(reader.read_int()?, Some(5));
//! assert_eq!(reader.read_boolean()?, Some(true));
//! # Ok::<(), asn1_ber::Asn1Error>(())
//! ```
//!
//! # Insufficient Data
//!
//! Every read returns `Asn1Result<Option<T>>`:
//! - `Ok(Some(value))`: the value was decoded and the cursor moved past it
//! - `Ok(None)`: the buffer ends before the value does; nothing was consumed
//! - `Err(_)`: the bytes are not a valid encoding

use asn1_core::{Asn1Error, Asn1Result, Tag};

/// Text decoding applied by [`Reader::read_string_with_encoding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// UTF-8; invalid sequences are an encoding error
    #[default]
    Utf8,
    /// ISO-8859-1, one character per octet
    Latin1,
    /// Lowercase hexadecimal rendering of the raw octets
    Hex,
}

impl StringEncoding {
    fn decode(self, bytes: &[u8]) -> Asn1Result<String> {
        match self {
            StringEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| Asn1Error::invalid_asn1(format!("Invalid UTF-8 string: {}", e))),
            StringEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            StringEncoding::Hex => Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect()),
        }
    }
}

/// BER reader over a fixed byte buffer
///
/// The reader never modifies its input. It only moves forward: `offset` is
/// the next unread byte and `length` is the value of the most recently
/// decoded length field.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            len: 0,
        }
    }

    /// Length decoded by the last length read
    pub fn length(&self) -> usize {
        self.len
    }

    /// Position of the next unread byte
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes
    pub fn remain(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// The unread bytes
    pub fn buffer(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Read the next octet
    pub fn read_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.offset += 1;
        Some(b)
    }

    /// Look at the next octet without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.offset).copied()
    }

    /// Decode the length field at the current position
    ///
    /// See [`Reader::read_length_at`].
    pub fn read_length(&mut self) -> Asn1Result<Option<usize>> {
        self.read_length_at(self.offset)
    }

    /// Decode the length field starting at `offset`
    ///
    /// # Arguments
    /// * `offset` - Position of the first length octet, usually one past a tag
    ///
    /// # Returns
    /// The offset just past the length field. The decoded value is stored
    /// and available from [`Reader::length`]; the cursor itself is not moved,
    /// callers reposition it with the returned offset.
    ///
    /// `Ok(None)` if the buffer ends inside the length field.
    ///
    /// # Error Handling
    /// Returns [`Asn1Error::InvalidAsn1`] for the indefinite form (`0x80`) and
    /// for more than 4 length octets.
    pub fn read_length_at(&mut self, offset: usize) -> Asn1Result<Option<usize>> {
        let Some(&first) = self.buf.get(offset) else {
            log::trace!("no length octet at {}", offset);
            return Ok(None);
        };
        let offset = offset + 1;

        if first & 0x80 == 0 {
            self.len = first as usize;
            return Ok(Some(offset));
        }

        let count = (first & 0x7F) as usize;
        if count == 0 {
            return Err(Asn1Error::invalid_asn1("Indefinite length not supported"));
        }
        if count > 4 {
            return Err(Asn1Error::invalid_asn1(format!(
                "Encoding too long: {} length octets",
                count
            )));
        }
        if self.buf.len() - offset < count {
            log::trace!("need {} length octets at {}, have {}", count, offset, self.buf.len() - offset);
            return Ok(None);
        }

        let mut len = 0usize;
        for &b in &self.buf[offset..offset + count] {
            len = (len << 8) | b as usize;
        }
        self.len = len;

        Ok(Some(offset + count))
    }

    /// Enter a constructed value of any tag
    ///
    /// Returns the tag and leaves the cursor on the first child; the length
    /// of the contents is available from [`Reader::length`].
    pub fn read_sequence(&mut self) -> Asn1Result<Option<u8>> {
        self.enter(None)
    }

    /// Enter a constructed value, requiring `tag`
    pub fn read_sequence_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<u8>> {
        self.enter(Some(tag.into()))
    }

    fn enter(&mut self, expected: Option<u8>) -> Asn1Result<Option<u8>> {
        let Some(tag) = self.peek_tag(expected)? else {
            return Ok(None);
        };
        let Some(offset) = self.read_length_at(self.offset + 1)? else {
            return Ok(None);
        };
        self.offset = offset;
        Ok(Some(tag))
    }

    /// Read the contents of an OCTET STRING
    pub fn read_buffer(&mut self) -> Asn1Result<Option<&'a [u8]>> {
        self.read_buffer_with_tag(Tag::OctetString)
    }

    /// Read the contents of the primitive value under `tag`
    pub fn read_buffer_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<&'a [u8]>> {
        self.read_value(tag.into())
    }

    /// Read an OCTET STRING as UTF-8 text
    pub fn read_string(&mut self) -> Asn1Result<Option<String>> {
        self.read_string_with_encoding(Tag::OctetString, StringEncoding::Utf8)
    }

    /// Read the value under `tag` as UTF-8 text
    pub fn read_string_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<String>> {
        self.read_string_with_encoding(tag, StringEncoding::Utf8)
    }

    /// Read the value under `tag` as text in the given encoding
    pub fn read_string_with_encoding(
        &mut self,
        tag: impl Into<u8>,
        encoding: StringEncoding,
    ) -> Asn1Result<Option<String>> {
        match self.read_value(tag.into())? {
            Some(bytes) => encoding.decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Read the value under `tag` without decoding it as text
    pub fn read_string_raw(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<&'a [u8]>> {
        self.read_value(tag.into())
    }

    /// Read an OBJECT IDENTIFIER as dotted-decimal text
    pub fn read_oid(&mut self) -> Asn1Result<Option<String>> {
        self.read_oid_with_tag(Tag::Oid)
    }

    /// Read a dotted-decimal OID under `tag`
    pub fn read_oid_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<String>> {
        match self.read_value(tag.into())? {
            Some(bytes) => crate::oid::decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Read a BIT STRING as a string of `'0'` and `'1'`
    pub fn read_bit_string(&mut self) -> Asn1Result<Option<String>> {
        self.read_bit_string_with_tag(Tag::BitString)
    }

    /// Read a bit string under `tag`
    ///
    /// # Decoding Format
    /// - Length: number of content octets + 1
    /// - Value: unused bits count (1 octet) + bit string octets
    ///
    /// The octets are rendered most significant bit first, 8 digits each,
    /// and the unused bits are dropped from the end. A zero-length value
    /// yields an empty string.
    ///
    /// # Returns
    /// `Ok(None)` if the declared length runs past the end of the buffer.
    pub fn read_bit_string_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<String>> {
        let Some(bytes) = self.read_value(tag.into())? else {
            return Ok(None);
        };
        let Some((&ignored, octets)) = bytes.split_first() else {
            return Ok(Some(String::new()));
        };

        let mut bits: String = octets.iter().map(|b| format!("{:08b}", b)).collect();
        bits.truncate(bits.len().saturating_sub(ignored as usize));

        Ok(Some(bits))
    }

    /// Read an INTEGER
    pub fn read_int(&mut self) -> Asn1Result<Option<i64>> {
        self.read_int_with_tag(Tag::Integer)
    }

    /// Read a two's complement integer under `tag`
    pub fn read_int_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<i64>> {
        self.read_integer(tag.into())
    }

    /// Read an ENUMERATED
    pub fn read_enumeration(&mut self) -> Asn1Result<Option<i64>> {
        self.read_enumeration_with_tag(Tag::Enumeration)
    }

    /// Read an enumerated value under `tag`
    pub fn read_enumeration_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<i64>> {
        self.read_integer(tag.into())
    }

    /// Read a BOOLEAN; any non-zero value is true
    pub fn read_boolean(&mut self) -> Asn1Result<Option<bool>> {
        self.read_boolean_with_tag(Tag::Boolean)
    }

    /// Read a boolean under `tag`
    pub fn read_boolean_with_tag(&mut self, tag: impl Into<u8>) -> Asn1Result<Option<bool>> {
        Ok(self.read_integer(tag.into())?.map(|value| value != 0))
    }

    fn read_integer(&mut self, tag: u8) -> Asn1Result<Option<i64>> {
        if self.peek_tag(Some(tag))?.is_none() {
            return Ok(None);
        }
        let Some(offset) = self.read_length_at(self.offset + 1)? else {
            return Ok(None);
        };
        if self.len == 0 {
            return Err(Asn1Error::invalid_asn1("Zero-length integer"));
        }
        if self.len > self.buf.len() - offset {
            log::trace!("integer needs {} bytes at {}, have {}", self.len, offset, self.buf.len() - offset);
            return Ok(None);
        }

        let bytes = &self.buf[offset..offset + self.len];
        let value = decode_integer(bytes)?;
        self.offset = offset + self.len;

        Ok(Some(value))
    }

    /// Read the contents of a primitive value with the given tag
    fn read_value(&mut self, tag: u8) -> Asn1Result<Option<&'a [u8]>> {
        if self.peek_tag(Some(tag))?.is_none() {
            return Ok(None);
        }
        let Some(offset) = self.read_length_at(self.offset + 1)? else {
            return Ok(None);
        };
        if self.len > self.buf.len() - offset {
            log::trace!("value needs {} bytes at {}, have {}", self.len, offset, self.buf.len() - offset);
            return Ok(None);
        }

        let value = &self.buf[offset..offset + self.len];
        self.offset = offset + self.len;

        Ok(Some(value))
    }

    /// Peek the next tag and check it against `expected`
    fn peek_tag(&self, expected: Option<u8>) -> Asn1Result<Option<u8>> {
        let Some(found) = self.peek() else {
            return Ok(None);
        };
        match expected {
            Some(tag) if tag != found => Err(Asn1Error::tag_mismatch(tag, found)),
            _ => Ok(Some(found)),
        }
    }
}

/// Big-endian two's complement: the first octet is signed
fn decode_integer(bytes: &[u8]) -> Asn1Result<i64> {
    let Some((&first, rest)) = bytes.split_first() else {
        return Err(Asn1Error::invalid_asn1("Zero-length integer"));
    };

    let mut value = first as i8 as i64;
    for &b in rest {
        value = value
            .checked_mul(256)
            .and_then(|v| v.checked_add(b as i64))
            .ok_or_else(|| {
                Asn1Error::invalid_asn1(format!(
                    "Integer not representable: {} octets",
                    bytes.len()
                ))
            })?;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Writer;
    use asn1_core::tag::{application, context};
    use asn1_core::SEQUENCE_TAG;
    use proptest::prelude::*;

    #[test]
    fn test_read_byte_and_peek() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.peek(), Some(0x01));
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.read_byte(), Some(0x01));
        assert_eq!(reader.read_byte(), Some(0x02));
        assert_eq!(reader.read_byte(), None);
        assert_eq!(reader.peek(), None);
        assert_eq!(reader.remain(), 0);
    }

    #[test]
    fn test_read_length_forms() {
        let cases: [(&[u8], usize); 6] = [
            (&[0x00], 0),
            (&[0x7F], 127),
            (&[0x81, 0x80], 128),
            (&[0x82, 0x01, 0x00], 256),
            (&[0x83, 0x01, 0x00, 0x00], 65536),
            (&[0x84, 0x01, 0x00, 0x00, 0x00], 0x0100_0000),
        ];
        for (data, expected) in cases {
            let mut reader = Reader::new(data);
            let next = reader.read_length().unwrap();
            assert_eq!(next, Some(data.len()));
            assert_eq!(reader.length(), expected);
            assert_eq!(reader.offset(), 0);
        }
    }

    #[test]
    fn test_read_length_at_offset() {
        let data = [0x04, 0x82, 0x01, 0x2C, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_length_at(1).unwrap(), Some(4));
        assert_eq!(reader.length(), 300);
        assert_eq!(reader.offset(), 0);

        assert_eq!(reader.read_length_at(4).unwrap(), Some(5));
        assert_eq!(reader.length(), 0);
        assert_eq!(reader.read_length_at(5).unwrap(), None);
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_read_length_indefinite() {
        let data = [0x80, 0x02, 0x01, 0x00, 0x00, 0x00];
        let mut reader = Reader::new(&data);
        assert!(reader.read_length().unwrap_err().is_invalid_asn1());
    }

    #[test]
    fn test_read_length_too_many_octets() {
        let data = [0x85, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut reader = Reader::new(&data);
        assert!(reader.read_length().unwrap_err().is_invalid_asn1());
    }

    #[test]
    fn test_read_length_truncated() {
        let mut reader = Reader::new(&[0x82, 0x01]);
        assert_eq!(reader.read_length().unwrap(), None);
        let mut reader = Reader::new(&[]);
        assert_eq!(reader.read_length().unwrap(), None);
    }

    #[test]
    fn test_read_int() {
        let data = [0x02, 0x02, 0xFF, 0x7F, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0xFF];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_int().unwrap(), Some(-129));
        assert_eq!(reader.read_int().unwrap(), Some(128));
        assert_eq!(reader.read_int().unwrap(), Some(-1));
        assert_eq!(reader.read_int().unwrap(), None);
    }

    #[test]
    fn test_read_int_zero_length() {
        let mut reader = Reader::new(&[0x02, 0x00]);
        assert!(reader.read_int().unwrap_err().is_invalid_asn1());
    }

    #[test]
    fn test_read_int_overflow() {
        let data = [0x02, 0x09, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut reader = Reader::new(&data);
        let err = reader.read_int().unwrap_err();
        assert!(err.is_invalid_asn1());
        assert!(err.to_string().contains("not representable"));
    }

    #[test]
    fn test_read_int_sign_extended_nine_octets() {
        let data = [0x02, 0x09, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_int().unwrap(), Some(i64::MIN));
    }

    #[test]
    fn test_read_int_truncated() {
        let data = [0x02, 0x04, 0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_int().unwrap(), None);
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_read_int_tag_mismatch() {
        let data = [0x04, 0x01, 0x00];
        let mut reader = Reader::new(&data);
        let err = reader.read_int().unwrap_err();
        assert!(err.is_invalid_asn1());
        let msg = err.to_string();
        assert!(msg.contains("0x02"), "{}", msg);
        assert!(msg.contains("0x04"), "{}", msg);
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_read_boolean_and_enumeration() {
        let data = [0x01, 0x01, 0xFF, 0x01, 0x01, 0x00, 0x0A, 0x01, 0x02, 0x81, 0x01, 0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_boolean().unwrap(), Some(true));
        assert_eq!(reader.read_boolean().unwrap(), Some(false));
        assert_eq!(reader.read_enumeration().unwrap(), Some(2));
        assert_eq!(reader.read_boolean_with_tag(0x81).unwrap(), Some(true));
    }

    #[test]
    fn test_read_buffer() {
        let data = [0x04, 0x03, 0x61, 0x62, 0x63, 0x04, 0x00];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_buffer().unwrap(), Some(&b"abc"[..]));
        assert_eq!(reader.length(), 3);
        assert_eq!(reader.read_buffer().unwrap(), Some(&b""[..]));
        assert_eq!(reader.remain(), 0);
    }

    #[test]
    fn test_read_buffer_truncated() {
        let data = [0x04, 0x05, b'a'];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_buffer().unwrap(), None);
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.buffer(), &data[..]);
    }

    #[test]
    fn test_read_string_encodings() {
        let data = [0x04, 0x02, 0xE9, 0x41, 0x04, 0x02, 0xE9, 0x41, 0x04, 0x02, 0xE9, 0x41];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_string_with_encoding(Tag::OctetString, StringEncoding::Latin1).unwrap(),
            Some("éA".to_string())
        );
        assert_eq!(
            reader.read_string_with_encoding(Tag::OctetString, StringEncoding::Hex).unwrap(),
            Some("e941".to_string())
        );
        assert!(reader.read_string().unwrap_err().is_invalid_asn1());
    }

    #[test]
    fn test_read_string_raw() {
        let data = [0x80, 0x02, 0xDE, 0xAD];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_string_raw(0x80).unwrap(), Some(&[0xDE, 0xAD][..]));
    }

    #[test]
    fn test_read_oid() {
        let data = [0x06, 0x06, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_oid().unwrap(), Some("1.2.840.113549".to_string()));
    }

    #[test]
    fn test_read_bit_string() {
        let mut reader = Reader::new(&[0x03, 0x02, 0x04, 0xF0]);
        assert_eq!(reader.read_bit_string().unwrap(), Some("1111".to_string()));

        let mut reader = Reader::new(&[0x03, 0x03, 0x00, 0xA5, 0x0F]);
        assert_eq!(reader.read_bit_string().unwrap(), Some("1010010100001111".to_string()));

        let mut reader = Reader::new(&[0x03, 0x00, 0x05, 0x00]);
        assert_eq!(reader.read_bit_string().unwrap(), Some(String::new()));
        assert_eq!(reader.offset(), 2);

        let mut reader = Reader::new(&[0x03, 0x03, 0x01, 0xFF]);
        assert_eq!(reader.read_bit_string().unwrap(), None);
    }

    #[test]
    fn test_read_sequence() {
        let data = [0x30, 0x03, 0x02, 0x01, 0x07];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_sequence_with_tag(SEQUENCE_TAG).unwrap(), Some(0x30));
        assert_eq!(reader.length(), 3);
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.read_int().unwrap(), Some(7));
    }

    #[test]
    fn test_read_sequence_mismatch_and_truncated() {
        let mut reader = Reader::new(&[0x31, 0x00]);
        assert!(reader.read_sequence_with_tag(SEQUENCE_TAG).unwrap_err().is_invalid_asn1());
        assert_eq!(reader.read_sequence().unwrap(), Some(0x31));

        let mut reader = Reader::new(&[0x30]);
        assert_eq!(reader.read_sequence().unwrap(), None);
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_empty_reader() {
        let mut reader = Reader::new(&[]);
        assert_eq!(reader.read_int().unwrap(), None);
        assert_eq!(reader.read_string().unwrap(), None);
        assert_eq!(reader.read_oid().unwrap(), None);
        assert_eq!(reader.read_bit_string().unwrap(), None);
        assert_eq!(reader.read_sequence().unwrap(), None);
    }

    #[test]
    fn test_bind_request_round_trip() {
        let mut writer = Writer::new();
        writer.start_sequence();
        writer.write_int(1);
        writer.start_sequence_with_tag(application(0, true));
        writer.write_int(3);
        writer.write_string("cn=root").unwrap();
        writer.write_string_with_tag("secret", context(0, false)).unwrap();
        writer.end_sequence().unwrap();
        writer.end_sequence().unwrap();
        let bytes = writer.into_bytes().unwrap();

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_sequence().unwrap(), Some(0x30));
        assert_eq!(reader.length(), bytes.len() - 2);
        assert_eq!(reader.read_int().unwrap(), Some(1));
        assert_eq!(reader.read_sequence().unwrap(), Some(0x60));
        assert_eq!(reader.read_int().unwrap(), Some(3));
        assert_eq!(reader.read_string().unwrap(), Some("cn=root".to_string()));
        assert_eq!(reader.read_string_with_tag(0x80).unwrap(), Some("secret".to_string()));
        assert_eq!(reader.remain(), 0);
    }

    #[test]
    fn test_large_sequence_round_trip() {
        let payload = vec![0x42; 70000];
        let mut writer = Writer::new();
        writer.start_sequence();
        writer.write_buffer(&payload, Tag::OctetString).unwrap();
        writer.end_sequence().unwrap();
        writer.write_null();
        let bytes = writer.into_bytes().unwrap();

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_sequence().unwrap(), Some(0x30));
        // 04 83 01 11 70 header
        assert_eq!(reader.length(), 70000 + 5);
        assert_eq!(reader.read_buffer().unwrap(), Some(&payload[..]));
        assert_eq!(reader.buffer(), &[0x05, 0x00]);
    }

    #[test]
    fn test_readers_share_input_across_threads() {
        let mut writer = Writer::new();
        writer.write_int(42);
        writer.write_oid("2.5.4.3").unwrap();
        let bytes = writer.into_bytes().unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        let mut reader = Reader::new(&bytes);
                        let int = reader.read_int().unwrap();
                        let oid = reader.read_oid().unwrap();
                        (int, oid)
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), (Some(42), Some("2.5.4.3".to_string())));
            }
        });
    }

    proptest! {
        #[test]
        fn int_round_trip(value in any::<i64>()) {
            let mut writer = Writer::new();
            writer.write_int(value);
            let bytes = writer.into_bytes().unwrap();
            let mut reader = Reader::new(&bytes);
            prop_assert_eq!(reader.read_int().unwrap(), Some(value));
            prop_assert_eq!(reader.remain(), 0);
        }

        #[test]
        fn string_round_trip(value in any::<String>()) {
            let mut writer = Writer::new();
            writer.write_string(&value).unwrap();
            let bytes = writer.into_bytes().unwrap();
            let mut reader = Reader::new(&bytes);
            prop_assert_eq!(reader.read_string().unwrap(), Some(value));
        }

        #[test]
        fn oid_round_trip(
            first in 0u64..3,
            second in 0u64..40,
            rest in proptest::collection::vec(any::<u32>(), 0..8)
        ) {
            let mut arcs = vec![first.to_string(), second.to_string()];
            arcs.extend(rest.iter().map(|arc| arc.to_string()));
            let oid = arcs.join(".");

            let mut writer = Writer::new();
            writer.write_oid(&oid).unwrap();
            let bytes = writer.into_bytes().unwrap();
            let mut reader = Reader::new(&bytes);
            prop_assert_eq!(reader.read_oid().unwrap(), Some(oid));
        }

        #[test]
        fn truncated_input_is_not_an_error(value in any::<i64>(), cut in 0usize..10) {
            let mut writer = Writer::new();
            writer.write_int(value);
            let bytes = writer.into_bytes().unwrap();
            let cut = cut.min(bytes.len() - 1);
            let mut reader = Reader::new(&bytes[..cut]);
            prop_assert_eq!(reader.read_int().unwrap(), None);
        }
    }
}
