pub const TRIGGER_TIMESTAMP_RANGE: std::ops::Range<usize> = 0..8;
pub const RECORD_NUMBER_RANGE: std::ops::Range<usize> = 8..12;
pub const FRAME_COUNT_RANGE: std::ops::Range<usize> = 12..15;
pub const AUX_IN_STATE_OFFSET: usize = 15;
pub const ANALOG_VALUE_RANGE: std::ops::Range<usize> = 16..18;

pub const TYPE_0_SIZE: usize = AUX_IN_STATE_OFFSET + 1;
pub const TYPE_1_SIZE: usize = ANALOG_VALUE_RANGE.end;
