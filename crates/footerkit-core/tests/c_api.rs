use std::ffi::{CStr, c_char};
use std::ptr;

use footerkit_core::ffi::{footerkit_decode_footers_type_0, footerkit_decode_footers_type_1};
use footerkit_core::footer::layout;
use footerkit_core::{
    BoardType, DataDomain, DataLayout, FooterConfiguration, FooterType0, FooterType1,
    RawFooterConfiguration, STATUS_BOUNDS_ERROR, STATUS_CONFIGURATION_ERROR,
    STATUS_INVALID_ARGUMENT, STATUS_OK, STATUS_UNSUPPORTED_VARIANT,
};

fn raw_config(board: BoardType) -> RawFooterConfiguration {
    RawFooterConfiguration::from(FooterConfiguration {
        board_type: board,
        data_domain: DataDomain::Time,
        active_channel_count: 1,
        data_layout: DataLayout::RecordInterleaved,
        bytes_per_record_per_channel: 64,
        records_per_buffer_per_channel: 3,
        fifo: false,
    })
}

fn buffer_with_records(footer_size: usize, records: u32) -> Vec<u8> {
    let slot = 64 + footer_size;
    let mut buffer = vec![0u8; slot * records as usize];
    for k in 0..records as usize {
        let start = k * slot + 64;
        buffer[start + layout::RECORD_NUMBER_RANGE.start..start + layout::RECORD_NUMBER_RANGE.end]
            .copy_from_slice(&(k as u32 + 1).to_le_bytes());
    }
    buffer
}

fn message(buffer: &[c_char]) -> String {
    // SAFETY: the library always NUL-terminates within capacity.
    unsafe { CStr::from_ptr(buffer.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[test]
fn type_0_success_returns_zero() {
    let data = buffer_with_records(16, 3);
    let mut footers = [FooterType0::default(); 3];
    let mut error = [0 as c_char; 128];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            data.len(),
            raw_config(BoardType::Ats9350),
            footers.as_mut_ptr(),
            footers.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(status, STATUS_OK);
    let records: Vec<u32> = footers.iter().map(|f| f.record_number).collect();
    assert_eq!(records, vec![1, 2, 3]);
    assert_eq!(error[0], 0);
}

#[test]
fn type_1_success_returns_zero() {
    let data = buffer_with_records(18, 3);
    let mut footers = [FooterType1::default(); 2];
    let status = unsafe {
        footerkit_decode_footers_type_1(
            data.as_ptr(),
            data.len(),
            raw_config(BoardType::Ats9353),
            footers.as_mut_ptr(),
            footers.len(),
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_OK);
    assert_eq!(footers[1].record_number, 2);
}

#[test]
fn bounds_error_writes_message() {
    let data = buffer_with_records(16, 3);
    let mut footers = [FooterType0::default(); 3];
    let mut error = [0 as c_char; 256];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            data.len() - 1,
            raw_config(BoardType::Ats9350),
            footers.as_mut_ptr(),
            footers.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(status, STATUS_BOUNDS_ERROR);
    let text = message(&error);
    assert!(text.starts_with("bounds error"), "{text}");
    assert!(text.contains("footer 2"), "{text}");
    assert!(footers.iter().all(|f| *f == FooterType0::default()));
}

#[test]
fn message_truncated_to_capacity() {
    let data = buffer_with_records(16, 3);
    let mut footers = [FooterType0::default(); 3];
    let mut error = [0x7f as c_char; 8];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            10,
            raw_config(BoardType::Ats9350),
            footers.as_mut_ptr(),
            footers.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(status, STATUS_BOUNDS_ERROR);
    assert_eq!(message(&error), "bounds ");
    assert_eq!(error[7], 0);
}

#[test]
fn invalid_enum_code_is_configuration_error() {
    let mut config = raw_config(BoardType::Ats9350);
    config.data_layout = 0x12345;
    let mut error = [0 as c_char; 128];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            ptr::null(),
            0,
            config,
            ptr::null_mut(),
            0,
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(status, STATUS_CONFIGURATION_ERROR);
    assert!(message(&error).contains("invalid data layout code 0x12345"));
}

#[test]
fn zero_channels_is_configuration_error() {
    let mut config = raw_config(BoardType::Ats9350);
    config.active_channel_count = 0;
    let data = buffer_with_records(16, 3);
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            data.len(),
            config,
            ptr::null_mut(),
            0,
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_CONFIGURATION_ERROR);
}

#[test]
fn configuration_checked_before_buffer_pointer() {
    let mut config = raw_config(BoardType::Ats9350);
    config.active_channel_count = 0;
    let mut footers = [FooterType0::default(); 1];
    let mut error = [0 as c_char; 128];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            ptr::null(),
            4096,
            config,
            footers.as_mut_ptr(),
            footers.len(),
            error.as_mut_ptr(),
            error.len(),
        )
    };
    assert_eq!(status, STATUS_CONFIGURATION_ERROR);
    assert!(message(&error).contains("active channel count is 0"));
}

#[test]
fn nonzero_fifo_byte_streams_past_geometry() {
    let mut config = raw_config(BoardType::Ats9350);
    config.fifo = 2;
    config.records_per_buffer_per_channel = 1;
    let data = buffer_with_records(16, 3);
    let mut footers = [FooterType0::default(); 3];
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            data.len(),
            config,
            footers.as_mut_ptr(),
            footers.len(),
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_OK);
    assert_eq!(footers[2].record_number, 3);
}

#[test]
fn wrong_variant_is_reported() {
    let data = buffer_with_records(18, 3);
    let mut footers = [FooterType1::default(); 1];
    let status = unsafe {
        footerkit_decode_footers_type_1(
            data.as_ptr(),
            data.len(),
            raw_config(BoardType::Ats9350),
            footers.as_mut_ptr(),
            footers.len(),
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_UNSUPPORTED_VARIANT);
}

#[test]
fn null_output_with_count_is_invalid_argument() {
    let data = buffer_with_records(16, 3);
    let status = unsafe {
        footerkit_decode_footers_type_0(
            data.as_ptr(),
            data.len(),
            raw_config(BoardType::Ats9350),
            ptr::null_mut(),
            2,
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_INVALID_ARGUMENT);
}

#[test]
fn zero_count_with_null_pointers_succeeds() {
    let status = unsafe {
        footerkit_decode_footers_type_0(
            ptr::null(),
            0,
            raw_config(BoardType::Ats9350),
            ptr::null_mut(),
            0,
            ptr::null_mut(),
            0,
        )
    };
    assert_eq!(status, STATUS_OK);
}
