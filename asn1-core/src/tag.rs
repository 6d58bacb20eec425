//! ASN.1 tag registry
//!
//! Only single-octet tags are handled:
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//!
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number
//!
//! Writers and readers treat tags as plain `u8` values; the constants here are
//! combined with bitwise OR, e.g. `Tag::Sequence as u8 | CONSTRUCTOR`.

use crate::error::{Asn1Error, Asn1Result};

/// Constructed bit (bit 6)
pub const CONSTRUCTOR: u8 = 0x20;
/// Application class bits
pub const APPLICATION: u8 = 0x40;
/// Context-specific class bits
pub const CONTEXT: u8 = 0x80;
/// Private class bits
pub const PRIVATE: u8 = 0xC0;

/// Default tag of a SEQUENCE (universal 16, constructed)
pub const SEQUENCE_TAG: u8 = Tag::Sequence as u8 | CONSTRUCTOR;
/// Default tag of a SET (universal 17, constructed)
pub const SET_TAG: u8 = Tag::Set as u8 | CONSTRUCTOR;

/// ASN.1 universal tag numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Eoc = 0,
    Boolean = 1,
    Integer = 2,
    BitString = 3,
    OctetString = 4,
    Null = 5,
    Oid = 6,
    ObjectDescriptor = 7,
    External = 8,
    Real = 9,
    Enumeration = 10,
    Pdv = 11,
    Utf8String = 12,
    RelativeOid = 13,
    Sequence = 16,
    Set = 17,
    NumericString = 18,
    PrintableString = 19,
    T61String = 20,
    VideotexString = 21,
    Ia5String = 22,
    UtcTime = 23,
    GeneralizedTime = 24,
    GraphicString = 25,
    VisibleString = 26,
    GeneralString = 28,
    UniversalString = 29,
    CharacterString = 30,
    BmpString = 31,
}

impl Tag {
    /// Get tag from its universal tag number
    pub fn from_u8(value: u8) -> Asn1Result<Self> {
        match value {
            0 => Ok(Tag::Eoc),
            1 => Ok(Tag::Boolean),
            2 => Ok(Tag::Integer),
            3 => Ok(Tag::BitString),
            4 => Ok(Tag::OctetString),
            5 => Ok(Tag::Null),
            6 => Ok(Tag::Oid),
            7 => Ok(Tag::ObjectDescriptor),
            8 => Ok(Tag::External),
            9 => Ok(Tag::Real),
            10 => Ok(Tag::Enumeration),
            11 => Ok(Tag::Pdv),
            12 => Ok(Tag::Utf8String),
            13 => Ok(Tag::RelativeOid),
            16 => Ok(Tag::Sequence),
            17 => Ok(Tag::Set),
            18 => Ok(Tag::NumericString),
            19 => Ok(Tag::PrintableString),
            20 => Ok(Tag::T61String),
            21 => Ok(Tag::VideotexString),
            22 => Ok(Tag::Ia5String),
            23 => Ok(Tag::UtcTime),
            24 => Ok(Tag::GeneralizedTime),
            25 => Ok(Tag::GraphicString),
            26 => Ok(Tag::VisibleString),
            28 => Ok(Tag::GeneralString),
            29 => Ok(Tag::UniversalString),
            30 => Ok(Tag::CharacterString),
            31 => Ok(Tag::BmpString),
            _ => Err(Asn1Error::invalid_argument(format!(
                "Unknown universal tag number: {}",
                value
            ))),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}

/// Tag class (bits 8-7 of the tag octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// Get tag class from a tag octet
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Convert tag class to its bits in the tag octet
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// Get the class of a tag
#[inline]
pub fn tag_class(tag: u8) -> TagClass {
    TagClass::from_bits(tag)
}

/// Check if a tag indicates a constructed type
#[inline]
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTOR != 0
}

/// Get the tag number (bits 5-1)
#[inline]
pub const fn tag_number(tag: u8) -> u8 {
    tag & 0x1F
}

/// Build a context-specific tag, e.g. `[3]` or `[0] IMPLICIT SEQUENCE`
pub fn context(number: u8, constructed: bool) -> u8 {
    compose(TagClass::ContextSpecific, number, constructed)
}

/// Build an application tag, e.g. `[APPLICATION 0]` for an LDAP BindRequest
pub fn application(number: u8, constructed: bool) -> u8 {
    compose(TagClass::Application, number, constructed)
}

fn compose(class: TagClass, number: u8, constructed: bool) -> u8 {
    let constructed_bit = if constructed { CONSTRUCTOR } else { 0x00 };
    class.to_bits() | constructed_bit | tag_number(number)
}
