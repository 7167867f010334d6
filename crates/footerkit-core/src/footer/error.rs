use thiserror::Error;

/// Errors returned by footer field reads.
///
/// # Examples
/// ```
/// use footerkit_core::footer::error::FooterReadError;
///
/// let err = FooterReadError::TooShort { needed: 16, actual: 15 };
/// assert!(err.to_string().contains("footer too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FooterReadError {
    #[error("footer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
