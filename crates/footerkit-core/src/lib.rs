//! footerkit core library: record footer extraction for digitizer buffers.
//!
//! Digitizer boards append a fixed-size footer (trigger timestamp, record
//! number, frame count, AUX input state and, on some boards, an analog
//! sample) after every channel record of a DMA buffer. This crate locates
//! those footers from the acquisition configuration and decodes them:
//!
//! - `geometry`: where footers sit for a given layout (layout resolver)
//! - `bounds`: whether the requested footers fit in the buffer
//! - `footer`: the footer wire format (layout/reader/parser)
//! - `decode`: the decode loop tying the three together
//! - `ffi`: C entry points with status codes and message buffers
//!
//! Decoding is pure: no I/O, no global state, the input buffer is never
//! written, and no byte outside the buffer is ever read.
//!
//! Invariants:
//! - Footer positions depend only on the configuration, never on buffer
//!   contents.
//! - Configuration errors are reported before the buffer is touched.
//! - A failed decode leaves the caller's output untouched.
//!
//! # Examples
//! ```
//! use footerkit_core::{
//!     BoardType, DataDomain, DataLayout, FooterConfiguration, Footers, decode_board_footers,
//! };
//!
//! let config = FooterConfiguration {
//!     board_type: BoardType::Ats9373,
//!     data_domain: DataDomain::Time,
//!     active_channel_count: 1,
//!     data_layout: DataLayout::SampleInterleaved,
//!     bytes_per_record_per_channel: 4096,
//!     records_per_buffer_per_channel: 2,
//!     fifo: false,
//! };
//! let buffer = vec![0u8; 2 * (4096 + 16)];
//! let footers = decode_board_footers(&buffer, &config, 2)?;
//! assert!(matches!(footers, Footers::Type0(ref f) if f.len() == 2));
//! # Ok::<(), footerkit_core::FooterError>(())
//! ```

mod board;
mod bounds;
pub mod check;
mod config;
mod decode;
mod error;
pub mod ffi;
pub mod footer;
mod geometry;

pub use board::{BoardType, DataDomain, DataLayout, FooterType};
pub use bounds::validate_bounds;
pub use config::FooterConfiguration;
pub use decode::{Footers, decode_board_footers, decode_footers, decode_footers_vec};
pub use error::{
    BoundsError, ConfigError, FooterError, STATUS_BOUNDS_ERROR, STATUS_CONFIGURATION_ERROR,
    STATUS_INVALID_ARGUMENT, STATUS_OK, STATUS_UNSUPPORTED_VARIANT,
};
pub use ffi::RawFooterConfiguration;
pub use footer::{Footer, FooterType0, FooterType1};
pub use geometry::{FooterGeometry, FooterLocation, SlotOrder, resolve};
