use serde::{Deserialize, Serialize};

use super::error::FooterReadError;
use super::layout;
use super::reader::FooterReader;
use crate::board::FooterType;

/// Decoded footer, variant 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct FooterType0 {
    /// Trigger time in sample-clock ticks.
    pub trigger_timestamp: u64,
    pub record_number: u32,
    pub frame_count: u32,
    pub aux_in_state: bool,
}

/// Decoded footer, variant 1: variant 0 plus the analog input sampled at
/// trigger time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct FooterType1 {
    pub trigger_timestamp: u64,
    pub record_number: u32,
    pub frame_count: u32,
    pub aux_in_state: bool,
    pub analog_value: i16,
}

/// A footer variant that can be decoded from its wire bytes.
pub trait Footer: Copy + Default {
    const FOOTER_TYPE: FooterType;

    /// Decode from a slice starting at the footer's first byte.
    fn parse(bytes: &[u8]) -> Result<Self, FooterReadError>;

    fn trigger_timestamp(&self) -> u64;

    fn record_number(&self) -> u32;
}

impl Footer for FooterType0 {
    const FOOTER_TYPE: FooterType = FooterType::Type0;

    fn parse(bytes: &[u8]) -> Result<Self, FooterReadError> {
        parse_footer_type_0(bytes)
    }

    fn trigger_timestamp(&self) -> u64 {
        self.trigger_timestamp
    }

    fn record_number(&self) -> u32 {
        self.record_number
    }
}

impl Footer for FooterType1 {
    const FOOTER_TYPE: FooterType = FooterType::Type1;

    fn parse(bytes: &[u8]) -> Result<Self, FooterReadError> {
        parse_footer_type_1(bytes)
    }

    fn trigger_timestamp(&self) -> u64 {
        self.trigger_timestamp
    }

    fn record_number(&self) -> u32 {
        self.record_number
    }
}

pub fn parse_footer_type_0(bytes: &[u8]) -> Result<FooterType0, FooterReadError> {
    let reader = FooterReader::new(bytes);
    reader.require_len(layout::TYPE_0_SIZE)?;

    Ok(FooterType0 {
        trigger_timestamp: reader.read_u64_le(layout::TRIGGER_TIMESTAMP_RANGE.clone())?,
        record_number: reader.read_u32_le(layout::RECORD_NUMBER_RANGE.clone())?,
        frame_count: reader.read_u24_le(layout::FRAME_COUNT_RANGE.clone())?,
        aux_in_state: reader.read_aux_in_state()?,
    })
}

pub fn parse_footer_type_1(bytes: &[u8]) -> Result<FooterType1, FooterReadError> {
    let reader = FooterReader::new(bytes);
    reader.require_len(layout::TYPE_1_SIZE)?;
    let base = parse_footer_type_0(bytes)?;

    Ok(FooterType1 {
        trigger_timestamp: base.trigger_timestamp,
        record_number: base.record_number,
        frame_count: base.frame_count,
        aux_in_state: base.aux_in_state,
        analog_value: reader.read_i16_le(layout::ANALOG_VALUE_RANGE.clone())?,
    })
}
