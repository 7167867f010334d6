use crate::error::BoundsError;
use crate::geometry::{FooterGeometry, FooterLocation};

/// Check that the first `footer_count` footers fit in a buffer of
/// `buffer_length` bytes and return their locations.
///
/// A count of zero always succeeds with no locations. Outside FIFO mode the
/// count may not exceed what the geometry holds. Fails on the first footer
/// whose `offset + footer_size` passes the end of the buffer.
///
/// # Examples
/// ```
/// use footerkit_core::{
///     BoardType, BoundsError, DataDomain, DataLayout, FooterConfiguration, FooterType,
///     resolve, validate_bounds,
/// };
///
/// let config = FooterConfiguration {
///     board_type: BoardType::Ats9350,
///     data_domain: DataDomain::Time,
///     active_channel_count: 1,
///     data_layout: DataLayout::RecordInterleaved,
///     bytes_per_record_per_channel: 100,
///     records_per_buffer_per_channel: 2,
///     fifo: false,
/// };
/// let geometry = resolve(&config, FooterType::Type0).unwrap();
/// assert_eq!(validate_bounds(&geometry, 2, 232).unwrap().len(), 2);
/// assert!(matches!(
///     validate_bounds(&geometry, 2, 231),
///     Err(BoundsError::OutOfRange { index: 1, .. })
/// ));
/// ```
pub fn validate_bounds(
    geometry: &FooterGeometry,
    footer_count: usize,
    buffer_length: usize,
) -> Result<Vec<FooterLocation>, BoundsError> {
    if footer_count == 0 {
        return Ok(Vec::new());
    }
    if let Some(available) = geometry.capacity() {
        if footer_count > available {
            return Err(BoundsError::CountExceedsGeometry {
                requested: footer_count,
                available,
            });
        }
    }

    // No more footers than stride-sized slots can fit in the buffer.
    let fitting = buffer_length / geometry.footer_stride + 1;
    let mut locations = Vec::with_capacity(footer_count.min(fitting));
    for location in geometry.locations(footer_count) {
        let location = location?;
        let end = location
            .offset
            .checked_add(geometry.footer_size)
            .ok_or(BoundsError::OffsetOverflow {
                index: location.index,
            })?;
        if end > buffer_length {
            return Err(BoundsError::OutOfRange {
                index: location.index,
                offset: location.offset,
                size: geometry.footer_size,
                buffer_length,
            });
        }
        locations.push(location);
    }
    Ok(locations)
}
