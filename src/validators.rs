// src/validators.rs - Client-side checks for the onboarding inputs
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Field;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[\s\-.()+]").unwrap();
    static ref PHONE_DIGITS: Regex = Regex::new(r"^[0-9]{10,11}$").unwrap();
}

/// At least two characters once surrounding whitespace is removed.
pub fn name(value: &str) -> bool {
    value.trim().chars().count() >= 2
}

pub fn email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// 10 or 11 digits after dropping spaces, dashes, dots, parentheses and plus signs.
pub fn phone(value: &str) -> bool {
    let cleaned = PHONE_SEPARATORS.replace_all(value, "");
    PHONE_DIGITS.is_match(&cleaned)
}

pub fn validate(field: Field, value: &str) -> bool {
    match field {
        Field::Name => name(value),
        Field::Email => email(value),
        Field::Phone => phone(value),
    }
}
