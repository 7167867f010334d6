//! Footer wire format.
//!
//! Layered the same way as every binary decoder in this crate:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: bounds-checked little-endian field access
//! - `parser`: typed footer values (no direct byte indexing)
//! - `error`: read failures
//!
//! A Type-0 footer is 16 bytes: a 64-bit trigger timestamp, a 32-bit record
//! number, a 24-bit frame count and an AUX input byte (nonzero means set).
//! Type 1 appends a signed 16-bit analog value, for 18 bytes.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{Footer, FooterType0, FooterType1, parse_footer_type_0, parse_footer_type_1};
