use thiserror::Error;

use crate::board::{BoardType, DataDomain, DataLayout, FooterType};
use crate::footer::error::FooterReadError;

/// Status returned by the C entry points on success.
pub const STATUS_OK: i32 = 0;
pub const STATUS_CONFIGURATION_ERROR: i32 = -1;
pub const STATUS_BOUNDS_ERROR: i32 = -2;
pub const STATUS_UNSUPPORTED_VARIANT: i32 = -3;
pub const STATUS_INVALID_ARGUMENT: i32 = -4;

/// A configuration that cannot describe a buffer with footers.
///
/// Always reported before the buffer is touched.
///
/// # Examples
/// ```
/// use footerkit_core::ConfigError;
///
/// let err = ConfigError::ZeroChannelCount;
/// assert!(err.to_string().contains("active channel count is 0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("active channel count is 0")]
    ZeroChannelCount,
    #[error("record size is 0")]
    ZeroRecordSize,
    #[error("records per buffer is 0")]
    ZeroRecordsPerBuffer,
    #[error("board {board} does not embed footers in the {domain} domain")]
    UnsupportedDomain {
        board: BoardType,
        domain: DataDomain,
    },
    #[error("FIFO mode is not supported with {layout} layout and {channels} active channels")]
    UnsupportedFifoLayout { layout: DataLayout, channels: usize },
    #[error("record geometry overflows the address space")]
    GeometryOverflow,
    #[error("invalid {kind} code {code:#x}")]
    UnknownCode { kind: &'static str, code: u32 },
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
}

/// A requested extraction that does not fit in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error(
        "footer {index} at offset {offset} needs {size} bytes but the buffer holds {buffer_length}"
    )]
    OutOfRange {
        index: usize,
        offset: usize,
        size: usize,
        buffer_length: usize,
    },
    #[error("offset of footer {index} overflows the address space")]
    OffsetOverflow { index: usize },
    #[error("requested {requested} footers but the buffer geometry holds {available}")]
    CountExceedsGeometry { requested: usize, available: usize },
    #[error("footer {index} could not be read: {source}")]
    Unreadable {
        index: usize,
        #[source]
        source: FooterReadError,
    },
}

/// Any failure of a decode call.
///
/// # Examples
/// ```
/// use footerkit_core::{ConfigError, FooterError, STATUS_CONFIGURATION_ERROR};
///
/// let err = FooterError::from(ConfigError::ZeroRecordSize);
/// assert_eq!(err.status_code(), STATUS_CONFIGURATION_ERROR);
/// assert_eq!(err.to_string(), "configuration error: record size is 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FooterError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("bounds error: {0}")]
    Bounds(#[from] BoundsError),
    #[error("unsupported footer variant: board {board} emits {expected} footers, not {requested}")]
    UnsupportedVariant {
        board: BoardType,
        expected: FooterType,
        requested: FooterType,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl FooterError {
    /// Nonzero status code identifying the failure kind at the C boundary.
    pub fn status_code(&self) -> i32 {
        match self {
            FooterError::Config(_) => STATUS_CONFIGURATION_ERROR,
            FooterError::Bounds(_) => STATUS_BOUNDS_ERROR,
            FooterError::UnsupportedVariant { .. } => STATUS_UNSUPPORTED_VARIANT,
            FooterError::InvalidArgument(_) => STATUS_INVALID_ARGUMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundsError, ConfigError, FooterError};
    use crate::board::{BoardType, FooterType};

    #[test]
    fn bounds_message_names_index_and_offset() {
        let err = BoundsError::OutOfRange {
            index: 3,
            offset: 448,
            size: 16,
            buffer_length: 463,
        };
        let msg = FooterError::from(err).to_string();
        assert!(msg.starts_with("bounds error:"));
        assert!(msg.contains("footer 3"));
        assert!(msg.contains("offset 448"));
    }

    #[test]
    fn status_codes_are_distinct_and_nonzero() {
        let errors = [
            FooterError::from(ConfigError::ZeroChannelCount),
            FooterError::from(BoundsError::OffsetOverflow { index: 0 }),
            FooterError::UnsupportedVariant {
                board: BoardType::Ats9350,
                expected: FooterType::Type0,
                requested: FooterType::Type1,
            },
            FooterError::InvalidArgument("null buffer"),
        ];
        let codes: Vec<i32> = errors.iter().map(FooterError::status_code).collect();
        assert_eq!(codes, vec![-1, -2, -3, -4]);
    }

    #[test]
    fn unknown_code_is_hex() {
        let err = ConfigError::UnknownCode {
            kind: "data layout",
            code: 0x40_0000,
        };
        assert_eq!(err.to_string(), "invalid data layout code 0x400000");
    }
}
