//! Footer placement inside a buffer.
//!
//! Every record is followed by its footer, so one "record slot" is
//! `bytes_per_record_per_channel + footer size` bytes and footers sit at the
//! end of their slot. The layout decides the order slots appear in:
//! channel-major for buffer interleaving, record-major for record and sample
//! interleaving. FIFO acquisitions have no per-buffer structure and are read
//! as an unbounded run of slots.

use serde::Serialize;

use crate::board::{DataLayout, FooterType};
use crate::config::FooterConfiguration;
use crate::error::{BoundsError, ConfigError};

/// Order in which record slots follow each other in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrder {
    /// Index `k` is record `k % R` of channel `k / R`.
    ChannelMajor,
    /// Index `k` is channel `k % C` of record `k / C`.
    RecordMajor,
    /// FIFO: index `k` is the `k`-th slot, with no channel/record identity.
    Continuous,
}

/// Resolved placement of footers for one configuration and footer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterGeometry {
    pub footer_size: usize,
    /// Payload plus footer: the distance between consecutive footers.
    pub per_channel_record_size: usize,
    pub first_footer_offset: usize,
    pub footer_stride: usize,
    pub order: SlotOrder,
    channel_count: usize,
    records_per_channel: usize,
}

/// Where one footer lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterLocation {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<usize>,
    pub offset: usize,
}

/// Resolve footer placement for `config`.
///
/// # Examples
/// ```
/// use footerkit_core::{BoardType, DataDomain, DataLayout, FooterConfiguration, FooterType, resolve};
///
/// let config = FooterConfiguration {
///     board_type: BoardType::Ats9350,
///     data_domain: DataDomain::Time,
///     active_channel_count: 2,
///     data_layout: DataLayout::BufferInterleaved,
///     bytes_per_record_per_channel: 100,
///     records_per_buffer_per_channel: 2,
///     fifo: false,
/// };
/// let geometry = resolve(&config, FooterType::Type0)?;
/// assert_eq!(geometry.first_footer_offset, 100);
/// assert_eq!(geometry.footer_stride, 116);
/// # Ok::<(), footerkit_core::ConfigError>(())
/// ```
///
/// # Errors
/// Returns `ConfigError` when the configuration is invalid or its geometry
/// does not fit in the address space.
pub fn resolve(
    config: &FooterConfiguration,
    footer_type: FooterType,
) -> Result<FooterGeometry, ConfigError> {
    config.validate()?;

    let footer_size = footer_type.size();
    let per_channel_record_size = config
        .bytes_per_record_per_channel
        .checked_add(footer_size)
        .ok_or(ConfigError::GeometryOverflow)?;

    let order = if config.fifo {
        SlotOrder::Continuous
    } else {
        // The whole buffer must be addressable so that no in-geometry
        // footer offset can overflow.
        config
            .footers_per_buffer()
            .and_then(|slots| slots.checked_mul(per_channel_record_size))
            .ok_or(ConfigError::GeometryOverflow)?;
        match config.data_layout {
            DataLayout::BufferInterleaved => SlotOrder::ChannelMajor,
            DataLayout::RecordInterleaved | DataLayout::SampleInterleaved => {
                SlotOrder::RecordMajor
            }
        }
    };

    let geometry = FooterGeometry {
        footer_size,
        per_channel_record_size,
        first_footer_offset: config.bytes_per_record_per_channel,
        footer_stride: per_channel_record_size,
        order,
        channel_count: config.active_channel_count,
        records_per_channel: config.records_per_buffer_per_channel,
    };
    tracing::debug!(
        board = %config.board_type,
        layout = %config.data_layout,
        fifo = config.fifo,
        footer_type = %footer_type,
        first = geometry.first_footer_offset,
        stride = geometry.footer_stride,
        "resolved footer geometry"
    );
    Ok(geometry)
}

impl FooterGeometry {
    /// Number of footers the geometry holds, or `None` when unbounded (FIFO).
    pub fn capacity(&self) -> Option<usize> {
        match self.order {
            SlotOrder::Continuous => None,
            SlotOrder::ChannelMajor | SlotOrder::RecordMajor => {
                Some(self.channel_count * self.records_per_channel)
            }
        }
    }

    /// Location of the footer at enumeration index `index`.
    ///
    /// Indices beyond `capacity()` are not rejected here; the bounds
    /// validator does that.
    pub fn location(&self, index: usize) -> Result<FooterLocation, BoundsError> {
        let (channel, record) = match self.order {
            SlotOrder::ChannelMajor => (
                Some(index / self.records_per_channel),
                Some(index % self.records_per_channel),
            ),
            SlotOrder::RecordMajor => (
                Some(index % self.channel_count),
                Some(index / self.channel_count),
            ),
            SlotOrder::Continuous => (None, None),
        };

        let slot = match (self.order, channel, record) {
            (SlotOrder::ChannelMajor, Some(c), Some(i)) => c
                .checked_mul(self.records_per_channel)
                .and_then(|base| base.checked_add(i)),
            (SlotOrder::RecordMajor, Some(c), Some(i)) => i
                .checked_mul(self.channel_count)
                .and_then(|base| base.checked_add(c)),
            _ => Some(index),
        };
        let offset = slot
            .and_then(|slot| slot.checked_mul(self.per_channel_record_size))
            .and_then(|start| start.checked_add(self.first_footer_offset))
            .ok_or(BoundsError::OffsetOverflow { index })?;

        Ok(FooterLocation {
            index,
            channel,
            record,
            offset,
        })
    }

    /// Locations of the first `count` footers in enumeration order.
    pub fn locations(
        &self,
        count: usize,
    ) -> impl Iterator<Item = Result<FooterLocation, BoundsError>> + '_ {
        (0..count).map(move |index| self.location(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{FooterLocation, SlotOrder, resolve};
    use crate::board::{BoardType, DataDomain, DataLayout, FooterType};
    use crate::config::FooterConfiguration;
    use crate::error::{BoundsError, ConfigError};

    fn config(layout: DataLayout) -> FooterConfiguration {
        FooterConfiguration {
            board_type: BoardType::Ats9350,
            data_domain: DataDomain::Time,
            active_channel_count: 2,
            data_layout: layout,
            bytes_per_record_per_channel: 100,
            records_per_buffer_per_channel: 2,
            fifo: false,
        }
    }

    fn offsets(config: &FooterConfiguration, count: usize) -> Vec<usize> {
        let geometry = resolve(config, FooterType::Type0).unwrap();
        geometry
            .locations(count)
            .map(|loc| loc.unwrap().offset)
            .collect()
    }

    #[test]
    fn buffer_interleaved_offsets() {
        let c = config(DataLayout::BufferInterleaved);
        assert_eq!(offsets(&c, 4), vec![100, 216, 332, 448]);
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        assert_eq!(geometry.order, SlotOrder::ChannelMajor);
        assert_eq!(
            geometry.location(2).unwrap(),
            FooterLocation {
                index: 2,
                channel: Some(1),
                record: Some(0),
                offset: 332
            }
        );
    }

    #[test]
    fn record_interleaved_offsets() {
        let c = config(DataLayout::RecordInterleaved);
        assert_eq!(offsets(&c, 4), vec![100, 216, 332, 448]);
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        let second = geometry.location(1).unwrap();
        assert_eq!((second.channel, second.record), (Some(1), Some(0)));
    }

    #[test]
    fn sample_interleaved_matches_record_interleaved() {
        let sample = config(DataLayout::SampleInterleaved);
        let record = config(DataLayout::RecordInterleaved);
        let a = resolve(&sample, FooterType::Type1).unwrap();
        let b = resolve(&record, FooterType::Type1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.per_channel_record_size, 118);
    }

    #[test]
    fn buffer_interleaved_channel_stride_with_three_records() {
        let mut c = config(DataLayout::BufferInterleaved);
        c.records_per_buffer_per_channel = 3;
        // Channel 1 starts after three slots of channel 0.
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        let loc = geometry.location(3).unwrap();
        assert_eq!((loc.channel, loc.record), (Some(1), Some(0)));
        assert_eq!(loc.offset, 3 * 116 + 100);
    }

    #[test]
    fn record_interleaved_three_channels() {
        let mut c = config(DataLayout::RecordInterleaved);
        c.active_channel_count = 3;
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        let loc = geometry.location(4).unwrap();
        assert_eq!((loc.channel, loc.record), (Some(1), Some(1)));
        assert_eq!(loc.offset, 3 * 116 + 116 + 100);
    }

    #[test]
    fn fifo_is_continuous_and_unbounded() {
        let mut c = config(DataLayout::RecordInterleaved);
        c.fifo = true;
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        assert_eq!(geometry.order, SlotOrder::Continuous);
        assert_eq!(geometry.capacity(), None);
        let loc = geometry.location(7).unwrap();
        assert_eq!(loc.channel, None);
        assert_eq!(loc.offset, 7 * 116 + 100);
    }

    #[test]
    fn fifo_offset_overflow_is_bounds_error() {
        let mut c = config(DataLayout::SampleInterleaved);
        c.fifo = true;
        let geometry = resolve(&c, FooterType::Type0).unwrap();
        let err = geometry.location(usize::MAX).unwrap_err();
        assert_eq!(err, BoundsError::OffsetOverflow { index: usize::MAX });
    }

    #[test]
    fn oversized_geometry_rejected() {
        let mut c = config(DataLayout::BufferInterleaved);
        c.records_per_buffer_per_channel = usize::MAX / 2;
        assert_eq!(
            resolve(&c, FooterType::Type0).unwrap_err(),
            ConfigError::GeometryOverflow
        );

        let mut c = config(DataLayout::BufferInterleaved);
        c.bytes_per_record_per_channel = usize::MAX;
        assert_eq!(
            resolve(&c, FooterType::Type0).unwrap_err(),
            ConfigError::GeometryOverflow
        );
    }

    #[test]
    fn zero_channels_rejected_before_arithmetic() {
        let mut c = config(DataLayout::RecordInterleaved);
        c.active_channel_count = 0;
        assert_eq!(
            resolve(&c, FooterType::Type0).unwrap_err(),
            ConfigError::ZeroChannelCount
        );
    }
}
