//! BER (Basic Encoding Rules) writer and reader for ASN.1
//!
//! Each ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): lengths 0-127, bit 8 clear
//! - **Long form**: first byte `0x80 | n`, followed by `n` big-endian length
//!   bytes. The writer emits at most 3 length bytes and the reader accepts at
//!   most 4. Indefinite length (`0x80`) is rejected.
//!
//! The [`Writer`] builds messages into a growable buffer and back-patches the
//! lengths of constructed values when they are closed. The [`Reader`] walks a
//! received message tag by tag; the caller knows the schema and drives it.

pub mod oid;
pub mod reader;
pub mod writer;

pub use asn1_core::{Asn1Error, Asn1Result, Tag, TagClass};
pub use asn1_core::{APPLICATION, CONSTRUCTOR, CONTEXT, PRIVATE, SEQUENCE_TAG, SET_TAG};
pub use reader::{Reader, StringEncoding};
pub use writer::{Writer, WriterOptions};
