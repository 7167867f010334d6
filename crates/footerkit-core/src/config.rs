use serde::{Deserialize, Serialize};

use crate::board::{BoardType, DataDomain, DataLayout};
use crate::error::ConfigError;

/// Acquisition parameters needed to locate footers in a buffer.
///
/// # Examples
/// ```
/// use footerkit_core::{BoardType, DataDomain, DataLayout, FooterConfiguration};
///
/// let config = FooterConfiguration {
///     board_type: BoardType::Ats9350,
///     data_domain: DataDomain::Time,
///     active_channel_count: 2,
///     data_layout: DataLayout::BufferInterleaved,
///     bytes_per_record_per_channel: 4096,
///     records_per_buffer_per_channel: 2,
///     fifo: false,
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.footers_per_buffer(), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterConfiguration {
    pub board_type: BoardType,
    pub data_domain: DataDomain,
    pub active_channel_count: usize,
    pub data_layout: DataLayout,
    pub bytes_per_record_per_channel: usize,
    pub records_per_buffer_per_channel: usize,
    /// Acquisition used FIFO-only streaming: footers follow each other at a
    /// constant stride with no per-buffer record structure.
    #[serde(default)]
    pub fifo: bool,
}

impl FooterConfiguration {
    /// Check the configuration before any offset arithmetic.
    ///
    /// The board/domain combination is checked first, then geometry fields,
    /// then the FIFO/layout combination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.board_type.supports_domain(self.data_domain) {
            return Err(ConfigError::UnsupportedDomain {
                board: self.board_type,
                domain: self.data_domain,
            });
        }
        if self.active_channel_count == 0 {
            return Err(ConfigError::ZeroChannelCount);
        }
        if self.bytes_per_record_per_channel == 0 {
            return Err(ConfigError::ZeroRecordSize);
        }
        if self.records_per_buffer_per_channel == 0 {
            return Err(ConfigError::ZeroRecordsPerBuffer);
        }
        // Buffer interleaving groups records per channel across the whole
        // buffer, which needs the record count FIFO streaming discards.
        if self.fifo
            && self.active_channel_count > 1
            && self.data_layout == DataLayout::BufferInterleaved
        {
            return Err(ConfigError::UnsupportedFifoLayout {
                layout: self.data_layout,
                channels: self.active_channel_count,
            });
        }
        Ok(())
    }

    /// Number of footers a non-FIFO buffer holds, if it fits in `usize`.
    pub fn footers_per_buffer(&self) -> Option<usize> {
        self.active_channel_count
            .checked_mul(self.records_per_buffer_per_channel)
    }
}
