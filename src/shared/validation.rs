use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for per-record PINs
    /// Exactly four ASCII digits
    /// - Valid: "0000", "1234"
    /// - Invalid: "123", "12345", "12a4", "abcd"
    pub static ref PIN_REGEX: Regex = Regex::new(r"^[0-9]{4}$").unwrap();

    /// Characters allowed in a phone number besides digits
    pub static ref PHONE_CHARS_REGEX: Regex = Regex::new(r"^\+?[0-9 ()\-]+$").unwrap();

    /// Regex for 24-hour clock times as entered in the timings form
    /// - Valid: "06:10", "13:30", "23:59"
    /// - Invalid: "6:10", "24:00", "12:60", "noon"
    pub static ref TIME_REGEX: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Phone numbers need at least ten digits; spaces, dashes, parentheses and a
/// leading `+` are tolerated.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_CHARS_REGEX.is_match(phone.trim())
        || !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
    {
        return Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("A valid phone number is required.")));
    }
    Ok(())
}

/// Empty means "not set"; anything else must be HH:MM.
pub fn validate_optional_time(time: &str) -> Result<(), ValidationError> {
    if time.is_empty() || TIME_REGEX.is_match(time) {
        return Ok(());
    }
    Err(ValidationError::new("time").with_message(Cow::Borrowed("Time must be HH:MM.")))
}
