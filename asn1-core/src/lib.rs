//! Core types for ASN.1 BER encoding
//!
//! This crate provides the tag registry and the error types shared by the
//! BER writer and reader.

pub mod error;
pub mod tag;

pub use error::{Asn1Error, Asn1Result};
pub use tag::{Tag, TagClass, CONSTRUCTOR, APPLICATION, CONTEXT, PRIVATE, SEQUENCE_TAG, SET_TAG};
