use super::error::FooterReadError;
use super::layout;

/// Little-endian field access over one footer's bytes.
pub struct FooterReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FooterReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Borrow the `size` bytes at `offset` in `buffer`.
    pub fn at(buffer: &'a [u8], offset: usize, size: usize) -> Result<Self, FooterReadError> {
        let end = offset.checked_add(size).ok_or(FooterReadError::TooShort {
            needed: usize::MAX,
            actual: buffer.len(),
        })?;
        let bytes = buffer.get(offset..end).ok_or(FooterReadError::TooShort {
            needed: end,
            actual: buffer.len(),
        })?;
        Ok(Self::new(bytes))
    }

    /// The bytes this reader covers.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FooterReadError> {
        if self.bytes.len() < needed {
            return Err(FooterReadError::TooShort {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FooterReadError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(FooterReadError::TooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FooterReadError> {
        self.bytes
            .get(range.clone())
            .ok_or(FooterReadError::TooShort {
                needed: range.end,
                actual: self.bytes.len(),
            })
    }

    fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], FooterReadError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| FooterReadError::TooShort {
            needed: N,
            actual: bytes.len(),
        })
    }

    pub fn read_u64_le(&self, range: std::ops::Range<usize>) -> Result<u64, FooterReadError> {
        self.read_array::<8>(range).map(u64::from_le_bytes)
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, FooterReadError> {
        self.read_array::<4>(range).map(u32::from_le_bytes)
    }

    /// 24-bit little-endian unsigned value, widened to `u32`.
    pub fn read_u24_le(&self, range: std::ops::Range<usize>) -> Result<u32, FooterReadError> {
        let [b0, b1, b2] = self.read_array::<3>(range)?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    pub fn read_i16_le(&self, range: std::ops::Range<usize>) -> Result<i16, FooterReadError> {
        self.read_array::<2>(range).map(i16::from_le_bytes)
    }

    /// Any nonzero byte is a set AUX input.
    pub fn read_aux_in_state(&self) -> Result<bool, FooterReadError> {
        Ok(self.read_u8(layout::AUX_IN_STATE_OFFSET)? != 0)
    }
}
