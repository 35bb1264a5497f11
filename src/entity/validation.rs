//! Client-side form validation.
//!
//! Validation runs before any request is built and blocks submission with
//! field-level messages.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const POSTAL_CODE_PATTERN: &str = r"^[0-9]{5,6}$";
const CODE_PATTERN: &str = r"^[A-Za-z]{2,3}$";

/// Field-level validation messages keyed by form field.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records a message for a field unless one is already recorded.
    ///
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &String)> {
        self.0.iter()
    }

    /// Returns `Ok(value)` when no errors were recorded.
    ///
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Checks that a value is not blank.
    ///
    pub fn require(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
    }

    /// Checks a non-blank value against an email pattern.
    ///
    pub fn email(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_email(value.trim()) {
            self.add(field, "Enter a valid email address");
        }
    }

    /// Checks a non-blank value against the postal code pattern.
    ///
    pub fn postal_code(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_postal_code(value.trim()) {
            self.add(field, "Postal code must be 5 or 6 digits");
        }
    }

    /// Checks a non-blank value against the short code pattern.
    ///
    pub fn code(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_code(value.trim()) {
            self.add(field, "Code must be 2 or 3 letters");
        }
    }
}

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Failed to compile pattern '{}': {}", source, e);
            None
        }
    })
    .as_ref()
}

pub fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&EMAIL, EMAIL_PATTERN).map_or(false, |re| re.is_match(value))
}

pub fn is_postal_code(value: &str) -> bool {
    static POSTAL_CODE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&POSTAL_CODE, POSTAL_CODE_PATTERN).map_or(false, |re| re.is_match(value))
}

pub fn is_code(value: &str) -> bool {
    static CODE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&CODE, CODE_PATTERN).map_or(false, |re| re.is_match(value))
}
