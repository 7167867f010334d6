use serde::Serialize;

use crate::board::FooterType;
use crate::bounds::validate_bounds;
use crate::config::FooterConfiguration;
use crate::error::{BoundsError, FooterError};
use crate::footer::reader::FooterReader;
use crate::footer::{Footer, FooterType0, FooterType1};
use crate::geometry::resolve;

/// Decode `output.len()` footers of variant `T` from `buffer` into `output`.
///
/// Returns the number of footers written. Decoding is all-or-nothing: when
/// an error is returned `output` is left untouched.
///
/// # Examples
/// ```
/// use footerkit_core::{
///     BoardType, DataDomain, DataLayout, FooterConfiguration, FooterType0, decode_footers,
/// };
///
/// let config = FooterConfiguration {
///     board_type: BoardType::Ats9350,
///     data_domain: DataDomain::Time,
///     active_channel_count: 1,
///     data_layout: DataLayout::RecordInterleaved,
///     bytes_per_record_per_channel: 8,
///     records_per_buffer_per_channel: 1,
///     fifo: false,
/// };
/// let mut buffer = vec![0u8; 24];
/// buffer[8] = 42; // trigger timestamp, low byte
/// let mut footers = [FooterType0::default()];
/// assert_eq!(decode_footers(&buffer, &config, &mut footers)?, 1);
/// assert_eq!(footers[0].trigger_timestamp, 42);
/// # Ok::<(), footerkit_core::FooterError>(())
/// ```
///
/// # Errors
/// - `FooterError::Config` when the configuration is invalid.
/// - `FooterError::UnsupportedVariant` when the board does not emit `T`.
/// - `FooterError::Bounds` when a footer would be read past the buffer end.
pub fn decode_footers<T: Footer>(
    buffer: &[u8],
    config: &FooterConfiguration,
    output: &mut [T],
) -> Result<usize, FooterError> {
    let decoded = decode_footers_vec::<T>(buffer, config, output.len())?;
    output.copy_from_slice(&decoded);
    Ok(decoded.len())
}

/// Decode `footer_count` footers of variant `T` into a new vector.
pub fn decode_footers_vec<T: Footer>(
    buffer: &[u8],
    config: &FooterConfiguration,
    footer_count: usize,
) -> Result<Vec<T>, FooterError> {
    config.validate()?;
    let expected = config.board_type.footer_type();
    if T::FOOTER_TYPE != expected {
        return Err(FooterError::UnsupportedVariant {
            board: config.board_type,
            expected,
            requested: T::FOOTER_TYPE,
        });
    }

    let geometry = resolve(config, T::FOOTER_TYPE)?;
    let locations = validate_bounds(&geometry, footer_count, buffer.len())?;

    let mut footers = Vec::with_capacity(locations.len());
    for location in &locations {
        let footer = FooterReader::at(buffer, location.offset, geometry.footer_size)
            .and_then(|reader| T::parse(reader.bytes()))
            .map_err(|source| BoundsError::Unreadable {
                index: location.index,
                source,
            })?;
        tracing::trace!(
            index = location.index,
            offset = location.offset,
            record_number = footer.record_number(),
            "decoded footer"
        );
        footers.push(footer);
    }

    tracing::debug!(
        board = %config.board_type,
        footer_type = %T::FOOTER_TYPE,
        count = footers.len(),
        buffer_len = buffer.len(),
        "decoded footers"
    );
    Ok(footers)
}

/// Footers decoded with the variant the board emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Footers {
    Type0(Vec<FooterType0>),
    Type1(Vec<FooterType1>),
}

impl Footers {
    pub fn footer_type(&self) -> FooterType {
        match self {
            Footers::Type0(_) => FooterType::Type0,
            Footers::Type1(_) => FooterType::Type1,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Footers::Type0(footers) => footers.len(),
            Footers::Type1(footers) => footers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn record_numbers(&self) -> Vec<u32> {
        match self {
            Footers::Type0(footers) => footers.iter().map(|f| f.record_number()).collect(),
            Footers::Type1(footers) => footers.iter().map(|f| f.record_number()).collect(),
        }
    }

    pub fn trigger_timestamps(&self) -> Vec<u64> {
        match self {
            Footers::Type0(footers) => footers.iter().map(|f| f.trigger_timestamp()).collect(),
            Footers::Type1(footers) => footers.iter().map(|f| f.trigger_timestamp()).collect(),
        }
    }
}

/// Decode `footer_count` footers using the board's own footer variant.
pub fn decode_board_footers(
    buffer: &[u8],
    config: &FooterConfiguration,
    footer_count: usize,
) -> Result<Footers, FooterError> {
    match config.board_type.footer_type() {
        FooterType::Type0 => decode_footers_vec(buffer, config, footer_count).map(Footers::Type0),
        FooterType::Type1 => decode_footers_vec(buffer, config, footer_count).map(Footers::Type1),
    }
}
