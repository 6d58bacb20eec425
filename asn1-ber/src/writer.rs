//! BER writer
//!
//! # Usage Example
//!
//! ```rust
//! use asn1_ber::Writer;
//!
//! let mut writer = Writer::new();
//! writer.start_sequence();
//! writer.write_int(12345);
//! writer.write_string("cn=admin")?;
//! writer.end_sequence()?;
//! let bytes = writer.into_bytes()?;
//! assert_eq!(bytes[0], 0x30);
//! # Ok::<(), asn1_ber::Asn1Error>(())
//! ```

use asn1_core::{Asn1Error, Asn1Result, Tag, SEQUENCE_TAG};
use serde::{Deserialize, Serialize};

use crate::oid;

/// Octets reserved for the length of an open sequence (`0x82 LL LL`)
const SEQUENCE_LENGTH_RESERVE: usize = 3;

/// Largest length the writer can emit (3 length octets)
const MAX_LENGTH: usize = 0xFF_FFFF;

/// Writer buffer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Initial buffer size in bytes
    pub size: usize,
    /// Multiplier applied to the buffer size when it runs out of room
    pub growth_factor: usize,
}

impl WriterOptions {
    /// Create new writer options
    pub fn new(size: usize, growth_factor: usize) -> Self {
        Self { size, growth_factor }
    }

    fn validate(&self) -> Asn1Result<()> {
        if self.size == 0 {
            return Err(Asn1Error::invalid_argument("Writer size must be positive"));
        }
        if self.growth_factor < 2 {
            return Err(Asn1Error::invalid_argument(format!(
                "Writer growth factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            size: 1024,
            growth_factor: 8,
        }
    }
}

/// BER writer for ASN.1 values
///
/// The writer owns a single growable buffer. `offset` marks the end of the
/// committed bytes and never exceeds the allocated size; the buffer grows by
/// `growth_factor` before any write that would not fit.
///
/// Constructed values are written between [`Writer::start_sequence`] and
/// [`Writer::end_sequence`]. The length of an open sequence is unknown while
/// its children are written, so three octets are reserved for it and the
/// payload is shifted once the real length is known.
#[derive(Debug)]
pub struct Writer {
    buf: Vec<u8>,
    offset: usize,
    options: WriterOptions,
    /// Offsets of the reserved length fields of open sequences
    seq: Vec<usize>,
}

impl Writer {
    /// Create a new writer with default options
    pub fn new() -> Self {
        let options = WriterOptions::default();
        Self {
            buf: vec![0; options.size],
            offset: 0,
            options,
            seq: Vec::new(),
        }
    }

    /// Create a new writer with the given buffer settings
    pub fn with_options(options: WriterOptions) -> Asn1Result<Self> {
        options.validate()?;
        Ok(Self {
            buf: vec![0; options.size],
            offset: 0,
            options,
            seq: Vec::new(),
        })
    }

    /// Number of committed bytes
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Allocated buffer size
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of sequences started but not yet ended
    pub fn open_sequences(&self) -> usize {
        self.seq.len()
    }

    /// The committed bytes
    ///
    /// Fails if a sequence is still open: its length field is only a
    /// placeholder at this point.
    pub fn buffer(&self) -> Asn1Result<&[u8]> {
        self.check_closed()?;
        Ok(&self.buf[..self.offset])
    }

    /// Consume the writer and return the committed bytes
    pub fn into_bytes(mut self) -> Asn1Result<Vec<u8>> {
        self.check_closed()?;
        self.buf.truncate(self.offset);
        Ok(self.buf)
    }

    fn check_closed(&self) -> Asn1Result<()> {
        if !self.seq.is_empty() {
            return Err(Asn1Error::invalid_asn1(format!(
                "{} unended sequence(s)",
                self.seq.len()
            )));
        }
        Ok(())
    }

    /// Append one raw octet
    pub fn write_byte(&mut self, b: u8) {
        self.ensure(1);
        self.buf[self.offset] = b;
        self.offset += 1;
    }

    /// Write an INTEGER (universal tag 2)
    pub fn write_int(&mut self, value: i64) {
        self.write_int_with_tag(value, Tag::Integer);
    }

    /// Write an integer in minimal two's complement form under `tag`
    pub fn write_int_with_tag(&mut self, value: i64, tag: impl Into<u8>) {
        let bytes = integer_octets(value);
        self.ensure(2 + bytes.len());
        self.put(tag.into());
        self.put(bytes.len() as u8);
        self.put_slice(&bytes);
    }

    /// Write an ENUMERATED (universal tag 10)
    pub fn write_enumeration(&mut self, value: i64) {
        self.write_int_with_tag(value, Tag::Enumeration);
    }

    /// Write an enumerated value under `tag`
    pub fn write_enumeration_with_tag(&mut self, value: i64, tag: impl Into<u8>) {
        self.write_int_with_tag(value, tag);
    }

    /// Write a BOOLEAN (universal tag 1)
    pub fn write_boolean(&mut self, value: bool) {
        self.write_boolean_with_tag(value, Tag::Boolean);
    }

    /// Write a boolean under `tag`: `0xFF` for true, `0x00` for false
    pub fn write_boolean_with_tag(&mut self, value: bool, tag: impl Into<u8>) {
        self.ensure(3);
        self.put(tag.into());
        self.put(0x01);
        self.put(if value { 0xFF } else { 0x00 });
    }

    /// Write a NULL
    pub fn write_null(&mut self) {
        self.ensure(2);
        self.put(Tag::Null.into());
        self.put(0x00);
    }

    /// Write an OCTET STRING holding the UTF-8 bytes of `value`
    pub fn write_string(&mut self, value: &str) -> Asn1Result<()> {
        self.write_string_with_tag(value, Tag::OctetString)
    }

    /// Write the UTF-8 bytes of `value` under `tag`
    pub fn write_string_with_tag(&mut self, value: &str, tag: impl Into<u8>) -> Asn1Result<()> {
        self.write_buffer(value.as_bytes(), tag)
    }

    /// Write `value` verbatim behind a `tag` and length header
    pub fn write_buffer(&mut self, value: &[u8], tag: impl Into<u8>) -> Asn1Result<()> {
        let length = length_octets(value.len())?;
        self.ensure(1 + length.len() + value.len());
        self.put(tag.into());
        self.put_slice(&length);
        self.put_slice(value);
        Ok(())
    }

    /// Copy an already encoded TLV (tag, length and value) as is
    pub fn write_encoded(&mut self, encoded: &[u8]) {
        self.ensure(encoded.len());
        self.put_slice(encoded);
    }

    /// Write each string as its own value, all under the same `tag`
    pub fn write_string_array<I, S>(&mut self, strings: I, tag: impl Into<u8>) -> Asn1Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tag = tag.into();
        for s in strings {
            self.write_string_with_tag(s.as_ref(), tag)?;
        }
        Ok(())
    }

    /// Write an OBJECT IDENTIFIER given in dotted-decimal form
    pub fn write_oid(&mut self, value: &str) -> Asn1Result<()> {
        self.write_oid_with_tag(value, Tag::Oid)
    }

    /// Write a dotted-decimal OID under `tag`
    ///
    /// Text that is not a dotted-decimal OID fails with
    /// [`Asn1Error::InvalidArgument`] and leaves the buffer untouched.
    pub fn write_oid_with_tag(&mut self, value: &str, tag: impl Into<u8>) -> Asn1Result<()> {
        let bytes = oid::encode(value)?;
        self.write_buffer(&bytes, tag)
    }

    /// Write a length field on its own
    ///
    /// Lengths above `0xFFFFFF` are rejected.
    pub fn write_length(&mut self, len: usize) -> Asn1Result<()> {
        let length = length_octets(len)?;
        self.ensure(length.len());
        self.put_slice(&length);
        Ok(())
    }

    /// Open a SEQUENCE (`0x30`)
    pub fn start_sequence(&mut self) {
        self.start_sequence_with_tag(SEQUENCE_TAG);
    }

    /// Open a constructed value under `tag`
    ///
    /// Must be balanced by a later [`Writer::end_sequence`]; sequences close
    /// in reverse order of opening.
    pub fn start_sequence_with_tag(&mut self, tag: impl Into<u8>) {
        self.ensure(1 + SEQUENCE_LENGTH_RESERVE);
        self.put(tag.into());
        self.seq.push(self.offset);
        self.offset += SEQUENCE_LENGTH_RESERVE;
    }

    /// Close the most recently opened sequence and patch its length
    ///
    /// # Length Patching
    /// Three octets were reserved when the sequence was opened. Once the
    /// payload length is known it is written in its minimal form and the
    /// payload is moved to close or widen the gap:
    /// - `len <= 0x7F`: short form, payload moves 2 octets left
    /// - `len <= 0xFF`: `0x81 LL`, payload moves 1 octet left
    /// - `len <= 0xFFFF`: `0x82 LL LL`, fits the reservation exactly
    /// - `len <= 0xFFFFFF`: `0x83 LL LL LL`, payload moves 1 octet right
    ///
    /// # Errors
    /// - [`Asn1Error::InvalidArgument`] if no sequence is open
    /// - [`Asn1Error::InvalidAsn1`] if the payload exceeds `0xFFFFFF` bytes.
    ///   The sequence is then left open, so [`Writer::buffer`] keeps failing
    ///   instead of exposing the placeholder length.
    pub fn end_sequence(&mut self) -> Asn1Result<()> {
        let Some(&seq) = self.seq.last() else {
            return Err(Asn1Error::invalid_argument(
                "end_sequence called without an open sequence",
            ));
        };
        let start = seq + SEQUENCE_LENGTH_RESERVE;
        let len = self.offset - start;

        if len > MAX_LENGTH {
            return Err(Asn1Error::invalid_asn1(format!(
                "Sequence too long: {} bytes",
                len
            )));
        }
        self.seq.pop();

        match len {
            0..=0x7F => {
                self.shift(start, len, -2);
                self.buf[seq] = len as u8;
            }
            0x80..=0xFF => {
                self.shift(start, len, -1);
                self.buf[seq] = 0x81;
                self.buf[seq + 1] = len as u8;
            }
            0x100..=0xFFFF => {
                self.buf[seq] = 0x82;
                self.buf[seq + 1] = (len >> 8) as u8;
                self.buf[seq + 2] = len as u8;
            }
            _ => {
                log::debug!("widening length field of {}-byte sequence at {}", len, seq);
                self.shift(start, len, 1);
                self.buf[seq] = 0x83;
                self.buf[seq + 1] = (len >> 16) as u8;
                self.buf[seq + 2] = (len >> 8) as u8;
                self.buf[seq + 3] = len as u8;
            }
        }

        log::trace!("closed sequence at {} with {} payload bytes", seq, len);
        Ok(())
    }

    /// Move `len` bytes at `start` by `delta` and adjust the offset to match
    fn shift(&mut self, start: usize, len: usize, delta: isize) {
        if delta > 0 {
            self.ensure(delta as usize);
        }
        let dest = start.wrapping_add_signed(delta);
        self.buf.copy_within(start..start + len, dest);
        self.offset = self.offset.wrapping_add_signed(delta);
    }

    /// Make room for `len` more bytes
    fn ensure(&mut self, len: usize) {
        let size = self.buf.len();
        if size - self.offset >= len {
            return;
        }

        let mut new_size = size.saturating_mul(self.options.growth_factor);
        if new_size - self.offset < len {
            new_size += len;
        }

        log::trace!("growing writer buffer from {} to {} bytes", size, new_size);
        self.buf.resize(new_size, 0);
    }

    fn put(&mut self, b: u8) {
        self.buf[self.offset] = b;
        self.offset += 1;
    }

    fn put_slice(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();
        self.buf[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal big-endian two's complement octets of `value` (at least one)
fn integer_octets(value: i64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8);
    let mut remaining = value;

    while !(-128..=127).contains(&remaining) {
        bytes.push((remaining & 0xFF) as u8);
        remaining >>= 8;
    }
    bytes.push((remaining & 0xFF) as u8);

    bytes.reverse(); // Big-endian
    bytes
}

/// Length field in short form, or long form with up to 3 length octets
fn length_octets(len: usize) -> Asn1Result<Vec<u8>> {
    match len {
        0..=0x7F => Ok(vec![len as u8]),
        0x80..=0xFF => Ok(vec![0x81, len as u8]),
        0x100..=0xFFFF => Ok(vec![0x82, (len >> 8) as u8, len as u8]),
        0x1_0000..=MAX_LENGTH => Ok(vec![0x83, (len >> 16) as u8, (len >> 8) as u8, len as u8]),
        _ => Err(Asn1Error::invalid_asn1(format!(
            "Length too long (> 4 bytes): {}",
            len
        ))),
    }
}
