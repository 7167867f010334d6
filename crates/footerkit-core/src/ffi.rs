//! C entry points.
//!
//! One function per footer variant. Each returns `STATUS_OK` or a negative
//! status naming the failure kind, and on failure writes a NUL-terminated
//! ASCII message into the caller's error buffer. On failure the footer array
//! is left untouched.

use std::ffi::c_char;

use crate::board::{BoardType, DataDomain, DataLayout};
use crate::config::FooterConfiguration;
use crate::decode::decode_footers_vec;
use crate::error::{ConfigError, FooterError, STATUS_OK};
use crate::footer::{Footer, FooterType0, FooterType1};

/// `FooterConfiguration` as laid out by C callers, with enumerations passed
/// as their numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct RawFooterConfiguration {
    pub board_type: u32,
    pub data_domain: u32,
    pub active_channel_count: usize,
    pub data_layout: u32,
    pub bytes_per_record_per_channel: usize,
    pub records_per_buffer_per_channel: usize,
    /// Nonzero selects FIFO mode.
    pub fifo: u8,
}

impl TryFrom<RawFooterConfiguration> for FooterConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawFooterConfiguration) -> Result<Self, Self::Error> {
        Ok(FooterConfiguration {
            board_type: BoardType::try_from(raw.board_type)?,
            data_domain: DataDomain::try_from(raw.data_domain)?,
            active_channel_count: raw.active_channel_count,
            data_layout: DataLayout::try_from(raw.data_layout)?,
            bytes_per_record_per_channel: raw.bytes_per_record_per_channel,
            records_per_buffer_per_channel: raw.records_per_buffer_per_channel,
            fifo: raw.fifo != 0,
        })
    }
}

impl From<FooterConfiguration> for RawFooterConfiguration {
    fn from(config: FooterConfiguration) -> Self {
        RawFooterConfiguration {
            board_type: config.board_type.code(),
            data_domain: config.data_domain.code(),
            active_channel_count: config.active_channel_count,
            data_layout: config.data_layout.code(),
            bytes_per_record_per_channel: config.bytes_per_record_per_channel,
            records_per_buffer_per_channel: config.records_per_buffer_per_channel,
            fifo: u8::from(config.fifo),
        }
    }
}

/// Decode Type-0 footers.
///
/// # Safety
/// - `data` must point to `data_size_bytes` readable bytes, or be null with
///   `data_size_bytes == 0`.
/// - `footers` must point to `footer_count` writable `FooterType0` slots, or
///   be null with `footer_count == 0`.
/// - `error_message` must point to `error_message_max_size` writable bytes,
///   or be null.
/// - None of the regions may be mutated by another thread during the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn footerkit_decode_footers_type_0(
    data: *const u8,
    data_size_bytes: usize,
    configuration: RawFooterConfiguration,
    footers: *mut FooterType0,
    footer_count: usize,
    error_message: *mut c_char,
    error_message_max_size: usize,
) -> i32 {
    unsafe {
        decode_raw(
            data,
            data_size_bytes,
            configuration,
            footers,
            footer_count,
            error_message,
            error_message_max_size,
        )
    }
}

/// Decode Type-1 footers.
///
/// # Safety
/// Same contract as [`footerkit_decode_footers_type_0`], with `footers`
/// pointing to `FooterType1` slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn footerkit_decode_footers_type_1(
    data: *const u8,
    data_size_bytes: usize,
    configuration: RawFooterConfiguration,
    footers: *mut FooterType1,
    footer_count: usize,
    error_message: *mut c_char,
    error_message_max_size: usize,
) -> i32 {
    unsafe {
        decode_raw(
            data,
            data_size_bytes,
            configuration,
            footers,
            footer_count,
            error_message,
            error_message_max_size,
        )
    }
}

unsafe fn decode_raw<T: Footer>(
    data: *const u8,
    data_size_bytes: usize,
    configuration: RawFooterConfiguration,
    footers: *mut T,
    footer_count: usize,
    error_message: *mut c_char,
    error_message_max_size: usize,
) -> i32 {
    let result = unsafe { decode_into(data, data_size_bytes, configuration, footers, footer_count) };
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => {
            tracing::warn!(status = err.status_code(), error = %err, "footer decode failed");
            if !error_message.is_null() && error_message_max_size > 0 {
                // SAFETY: caller guarantees `error_message_max_size` writable bytes.
                let out = unsafe {
                    std::slice::from_raw_parts_mut(error_message.cast::<u8>(), error_message_max_size)
                };
                write_error_message(&err.to_string(), out);
            }
            err.status_code()
        }
    }
}

unsafe fn decode_into<T: Footer>(
    data: *const u8,
    data_size_bytes: usize,
    configuration: RawFooterConfiguration,
    footers: *mut T,
    footer_count: usize,
) -> Result<(), FooterError> {
    let config = FooterConfiguration::try_from(configuration)?;
    config.validate()?;

    if data.is_null() && data_size_bytes != 0 {
        return Err(FooterError::InvalidArgument("data buffer is null"));
    }
    if footers.is_null() && footer_count != 0 {
        return Err(FooterError::InvalidArgument("footer array is null"));
    }

    let buffer: &[u8] = if data_size_bytes == 0 {
        &[]
    } else {
        // SAFETY: non-null and `data_size_bytes` readable bytes per the contract.
        unsafe { std::slice::from_raw_parts(data, data_size_bytes) }
    };

    let decoded = decode_footers_vec::<T>(buffer, &config, footer_count)?;
    if !decoded.is_empty() {
        // SAFETY: `footers` holds `footer_count == decoded.len()` writable
        // slots; the slots may be uninitialized, so they are written without
        // forming a reference to them.
        unsafe { std::ptr::copy_nonoverlapping(decoded.as_ptr(), footers, decoded.len()) };
    }
    Ok(())
}

/// Copy `message` into `out` as NUL-terminated ASCII, truncating to fit.
///
/// Non-ASCII bytes are replaced with `?`. Nothing is written when `out` is
/// empty.
pub fn write_error_message(message: &str, out: &mut [u8]) {
    let Some(room) = out.len().checked_sub(1) else {
        return;
    };
    let len = message.len().min(room);
    for (dst, src) in out.iter_mut().zip(message.bytes().take(len)) {
        *dst = if src.is_ascii() { src } else { b'?' };
    }
    out[len] = 0;
}

#[cfg(test)]
mod tests {
    use super::{RawFooterConfiguration, write_error_message};
    use crate::board::{BoardType, DataDomain, DataLayout};
    use crate::config::FooterConfiguration;

    fn raw(fifo: u8) -> RawFooterConfiguration {
        RawFooterConfiguration {
            board_type: BoardType::Ats9350.code(),
            data_domain: DataDomain::Time.code(),
            active_channel_count: 1,
            data_layout: DataLayout::RecordInterleaved.code(),
            bytes_per_record_per_channel: 64,
            records_per_buffer_per_channel: 2,
            fifo,
        }
    }

    #[test]
    fn any_nonzero_fifo_byte_selects_fifo() {
        for byte in [1u8, 2, 0x80, 0xff] {
            let config = FooterConfiguration::try_from(raw(byte)).unwrap();
            assert!(config.fifo, "fifo byte {byte:#04x}");
        }
        let config = FooterConfiguration::try_from(raw(0)).unwrap();
        assert!(!config.fifo);
        assert_eq!(RawFooterConfiguration::from(config).fifo, 0);
    }

    #[test]
    fn message_is_truncated_and_terminated() {
        let mut out = [0xffu8; 6];
        write_error_message("bounds error", &mut out);
        assert_eq!(&out, b"bound\0");
    }

    #[test]
    fn short_message_fits() {
        let mut out = [0xffu8; 8];
        write_error_message("ok", &mut out);
        assert_eq!(&out[..3], b"ok\0");
        assert_eq!(out[3], 0xff);
    }

    #[test]
    fn non_ascii_replaced() {
        let mut out = [0u8; 8];
        write_error_message("é", &mut out);
        assert_eq!(&out[..3], b"??\0");
    }

    #[test]
    fn empty_buffer_untouched() {
        let mut out: [u8; 0] = [];
        write_error_message("anything", &mut out);
    }
}
