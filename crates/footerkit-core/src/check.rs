//! Sanity checks over decoded footers of a complete acquisition.
//!
//! An acquisition started from record 1 with a periodic trigger yields
//! consecutive record numbers and evenly spaced trigger timestamps; these
//! checks confirm both and point at the first footer that breaks the
//! pattern.

use thiserror::Error;

/// Relative tolerance on trigger spacing (5%).
pub const TIMESTAMP_TOLERANCE_DIVISOR: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("footer {index} has record number {actual} instead of {expected}")]
    RecordNumber {
        index: usize,
        actual: u32,
        expected: u64,
    },
    #[error("first footer has timestamp {actual}, higher than the expected maximum {maximum}")]
    FirstTimestamp { actual: u64, maximum: u64 },
    #[error("timestamp of footer {index} ({actual}) is higher than the next")]
    TimestampOrder { index: usize, actual: u64 },
    #[error(
        "timestamp difference between footer {index} and the next ({difference}) is less than minimum {minimum}"
    )]
    SpacingTooShort {
        index: usize,
        difference: u64,
        minimum: u64,
    },
    #[error(
        "timestamp difference between footer {index} and the next ({difference}) is more than maximum {maximum}"
    )]
    SpacingTooLong {
        index: usize,
        difference: u64,
        maximum: u64,
    },
}

/// Footer `k` must carry record number `k + 1`.
///
/// # Examples
/// ```
/// use footerkit_core::check::check_record_numbers;
///
/// assert!(check_record_numbers(&[1, 2, 3]).is_ok());
/// assert!(check_record_numbers(&[1, 3]).is_err());
/// ```
pub fn check_record_numbers(record_numbers: &[u32]) -> Result<(), CheckError> {
    for (index, &actual) in record_numbers.iter().enumerate() {
        let expected = index as u64 + 1;
        if u64::from(actual) != expected {
            return Err(CheckError::RecordNumber {
                index,
                actual,
                expected,
            });
        }
    }
    Ok(())
}

/// Trigger timestamps must be non-decreasing and spaced by
/// `expected_ticks_per_trigger` within 5%.
pub fn check_timestamps(
    timestamps: &[u64],
    expected_ticks_per_trigger: u64,
) -> Result<(), CheckError> {
    let Some(&first) = timestamps.first() else {
        return Ok(());
    };
    let tolerance = expected_ticks_per_trigger / TIMESTAMP_TOLERANCE_DIVISOR;
    let maximum = expected_ticks_per_trigger.saturating_add(tolerance);
    let minimum = expected_ticks_per_trigger - tolerance;

    if first > maximum {
        return Err(CheckError::FirstTimestamp {
            actual: first,
            maximum,
        });
    }

    for (index, pair) in timestamps.windows(2).enumerate() {
        let (previous, next) = (pair[0], pair[1]);
        if previous > next {
            return Err(CheckError::TimestampOrder {
                index,
                actual: previous,
            });
        }
        let difference = next - previous;
        if difference < minimum {
            return Err(CheckError::SpacingTooShort {
                index,
                difference,
                minimum,
            });
        }
        if difference > maximum {
            return Err(CheckError::SpacingTooLong {
                index,
                difference,
                maximum,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CheckError, check_record_numbers, check_timestamps};

    #[test]
    fn record_numbers_start_at_one() {
        let err = check_record_numbers(&[0, 1]).unwrap_err();
        assert_eq!(
            err,
            CheckError::RecordNumber {
                index: 0,
                actual: 0,
                expected: 1
            }
        );
    }

    #[test]
    fn evenly_spaced_timestamps_pass() {
        assert!(check_timestamps(&[1000, 2010, 2990, 4000], 1000).is_ok());
        assert!(check_timestamps(&[], 1000).is_ok());
    }

    #[test]
    fn late_first_timestamp() {
        let err = check_timestamps(&[1051], 1000).unwrap_err();
        assert_eq!(
            err,
            CheckError::FirstTimestamp {
                actual: 1051,
                maximum: 1050
            }
        );
    }

    #[test]
    fn decreasing_timestamps() {
        let err = check_timestamps(&[1000, 900], 1000).unwrap_err();
        assert_eq!(
            err,
            CheckError::TimestampOrder {
                index: 0,
                actual: 1000
            }
        );
    }

    #[test]
    fn spacing_limits() {
        assert!(matches!(
            check_timestamps(&[1000, 1900], 1000),
            Err(CheckError::SpacingTooShort { index: 0, .. })
        ));
        assert!(matches!(
            check_timestamps(&[1000, 2000, 3100], 1000),
            Err(CheckError::SpacingTooLong { index: 1, .. })
        ));
    }
}
