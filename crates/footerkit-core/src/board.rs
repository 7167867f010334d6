//! Closed vocabulary shared with external callers.
//!
//! Every enumeration here carries a stable numeric code. The codes cross the
//! C boundary inside `RawFooterConfiguration`, so they must never change;
//! adding a board is a data update to `board_types!` below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

macro_rules! board_types {
    ($($variant:ident = $code:literal => $name:literal),+ $(,)?) => {
        /// Digitizer board models, with the codes the acquisition driver reports.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        #[repr(u32)]
        pub enum BoardType {
            $($variant = $code),+
        }

        impl BoardType {
            /// Every known board, in code order.
            pub const ALL: &'static [BoardType] = &[$(BoardType::$variant),+];

            /// Lower-case model name (e.g. `"ats9350"`).
            pub fn name(self) -> &'static str {
                match self {
                    $(BoardType::$variant => $name),+
                }
            }

            pub fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($code => Some(BoardType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

board_types! {
    Ats850 = 1 => "ats850",
    Ats310 = 2 => "ats310",
    Ats330 = 3 => "ats330",
    Ats855 = 4 => "ats855",
    Ats315 = 5 => "ats315",
    Ats335 = 6 => "ats335",
    Ats460 = 7 => "ats460",
    Ats860 = 8 => "ats860",
    Ats660 = 9 => "ats660",
    Ats665 = 10 => "ats665",
    Ats9462 = 11 => "ats9462",
    Ats9434 = 12 => "ats9434",
    Ats9870 = 13 => "ats9870",
    Ats9350 = 14 => "ats9350",
    Ats9325 = 15 => "ats9325",
    Ats9440 = 16 => "ats9440",
    Ats9410 = 17 => "ats9410",
    Ats9351 = 18 => "ats9351",
    Ats9310 = 19 => "ats9310",
    Ats9461 = 20 => "ats9461",
    Ats9850 = 21 => "ats9850",
    Ats9625 = 22 => "ats9625",
    Atg6500 = 23 => "atg6500",
    Ats9626 = 24 => "ats9626",
    Ats9360 = 25 => "ats9360",
    Axi9870 = 26 => "axi9870",
    Ats9370 = 27 => "ats9370",
    Atu7825 = 28 => "atu7825",
    Ats9373 = 29 => "ats9373",
    Ats9416 = 30 => "ats9416",
    Ats9637 = 31 => "ats9637",
    Ats9120 = 32 => "ats9120",
    Ats9371 = 33 => "ats9371",
    Ats9130 = 34 => "ats9130",
    Ats9352 = 35 => "ats9352",
    Ats9453 = 36 => "ats9453",
    Ats9146 = 37 => "ats9146",
    Ats9000 = 38 => "ats9000",
    Atst371 = 39 => "atst371",
    Ats9437 = 40 => "ats9437",
    Ats9618 = 41 => "ats9618",
    Ats9358 = 42 => "ats9358",
    Forest = 43 => "forest",
    Ats9353 = 44 => "ats9353",
    Ats9872 = 45 => "ats9872",
    Ats9470 = 46 => "ats9470",
    Ats9628 = 47 => "ats9628",
}

impl BoardType {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Footer variant emitted by the board's firmware.
    pub fn footer_type(self) -> FooterType {
        match self {
            BoardType::Ats9352 | BoardType::Ats9353 => FooterType::Type1,
            _ => FooterType::Type0,
        }
    }

    /// Whether the board embeds footers in buffers of the given domain.
    ///
    /// Time-domain footers are universal; frequency-domain footers only exist
    /// on boards with an on-board FFT module.
    pub fn supports_domain(self, domain: DataDomain) -> bool {
        match domain {
            DataDomain::Time => true,
            DataDomain::Frequency => matches!(
                self,
                BoardType::Ats9350
                    | BoardType::Ats9351
                    | BoardType::Ats9352
                    | BoardType::Ats9353
                    | BoardType::Ats9360
                    | BoardType::Ats9370
                    | BoardType::Ats9371
                    | BoardType::Ats9373
            ),
        }
    }

    /// Vertical resolution in bits, or `None` for boards that do not digitize
    /// (the ATG6500 is a generator).
    pub fn resolution_bits(self) -> Option<u8> {
        use BoardType::*;
        match self {
            Ats850 | Ats855 | Ats860 | Atu7825 | Ats9870 | Axi9870 | Ats9850 | Ats9872 => Some(8),
            Ats9461 | Ats9410 => Some(10),
            Ats310 | Ats315 | Ats330 | Ats335 | Ats9120 | Ats9130 | Ats9350 | Ats9310
            | Ats9351 | Ats9325 | Ats9000 | Ats9352 | Ats9360 | Ats9358 | Ats9370 | Ats9371
            | Atst371 | Ats9373 | Forest | Ats9353 => Some(12),
            Ats460 | Ats9434 | Ats9440 | Ats9416 | Ats9437 | Ats9453 | Ats9146 | Ats9470 => {
                Some(14)
            }
            Ats660 | Ats665 | Ats9462 | Ats9625 | Ats9626 | Ats9637 | Ats9618 | Ats9628 => {
                Some(16)
            }
            Atg6500 => None,
        }
    }

    /// Resolution padded to whole bytes.
    pub fn bytes_per_sample(self) -> Option<usize> {
        self.resolution_bits()
            .map(|bits| (usize::from(bits) + 7) / 8)
    }
}

impl TryFrom<u32> for BoardType {
    type Error = ConfigError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        BoardType::from_code(code).ok_or(ConfigError::UnknownCode {
            kind: "board type",
            code,
        })
    }
}

impl FromStr for BoardType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BoardType::ALL
            .iter()
            .copied()
            .find(|board| board.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "board type",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Domain represented by the samples of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum DataDomain {
    Time = 0x1000,
    Frequency = 0x2000,
}

impl DataDomain {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            DataDomain::Time => "time",
            DataDomain::Frequency => "frequency",
        }
    }
}

impl TryFrom<u32> for DataDomain {
    type Error = ConfigError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0x1000 => Ok(DataDomain::Time),
            0x2000 => Ok(DataDomain::Frequency),
            _ => Err(ConfigError::UnknownCode {
                kind: "data domain",
                code,
            }),
        }
    }
}

impl fmt::Display for DataDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arrangement of the channels' records relative to each other in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum DataLayout {
    /// All records of channel 0, then all records of channel 1, ...
    BufferInterleaved = 0x10_0000,
    /// Record `i` of every channel, then record `i + 1` of every channel, ...
    RecordInterleaved = 0x20_0000,
    /// Samples interleaved within each record block; footers stay contiguous.
    SampleInterleaved = 0x30_0000,
}

impl DataLayout {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            DataLayout::BufferInterleaved => "buffer_interleaved",
            DataLayout::RecordInterleaved => "record_interleaved",
            DataLayout::SampleInterleaved => "sample_interleaved",
        }
    }
}

impl TryFrom<u32> for DataLayout {
    type Error = ConfigError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0x10_0000 => Ok(DataLayout::BufferInterleaved),
            0x20_0000 => Ok(DataLayout::RecordInterleaved),
            0x30_0000 => Ok(DataLayout::SampleInterleaved),
            _ => Err(ConfigError::UnknownCode {
                kind: "data layout",
                code,
            }),
        }
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Footer binary layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum FooterType {
    #[serde(rename = "type_0")]
    Type0 = 0,
    #[serde(rename = "type_1")]
    Type1 = 1,
}

impl FooterType {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            FooterType::Type0 => "type_0",
            FooterType::Type1 => "type_1",
        }
    }

    /// Width of one footer in the buffer, in bytes.
    pub fn size(self) -> usize {
        match self {
            FooterType::Type0 => crate::footer::layout::TYPE_0_SIZE,
            FooterType::Type1 => crate::footer::layout::TYPE_1_SIZE,
        }
    }
}

impl TryFrom<u32> for FooterType {
    type Error = ConfigError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FooterType::Type0),
            1 => Ok(FooterType::Type1),
            _ => Err(ConfigError::UnknownCode {
                kind: "footer type",
                code,
            }),
        }
    }
}

impl fmt::Display for FooterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
