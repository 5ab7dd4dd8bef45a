//! MARC holdings record parsing
//!
//! Holding records carry their MFHD data as MARC21 XML. This module parses it
//! once and offers field/subfield access to the holdings engine.

pub mod parser;

pub use parser::{DataField, MarcRecord, Subfield};
