//! Contact form validation.
//!
//! All fields are trimmed before checking. Phone is optional; the others are
//! required.
//!
//! | Field   | Rule                                         |
//! |---------|----------------------------------------------|
//! | name    | at least 2 characters                        |
//! | email   | [`Email::parse`]                             |
//! | phone   | empty, or `+` optional, a digit, then 7+ of digits, spaces, `-`, `(`, `)` |
//! | message | at least 10 characters                       |

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError};

/// Minimum length of the name field, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum length of the message field, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9\s\-()]{7,}$").expect("phone pattern is valid")
});

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Form field name, also used in element IDs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised field name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown contact form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for ContactField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// Why a single field was rejected. The display text is shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactFieldError {
    #[error("Please enter your name (at least 2 characters)")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail(#[source] EmailError),
    #[error("Please enter the phone number in international format")]
    InvalidPhone,
    #[error("Message is too short (at least 10 characters)")]
    MessageTooShort,
}

/// Field-level validation failures, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(ContactField, ContactFieldError)>,
}

impl FieldErrors {
    /// The error for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&ContactFieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| error)
    }

    /// The user-facing message for `field`, or an empty string.
    #[must_use]
    pub fn message(&self, field: ContactField) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.errors.iter().map(|(field, _)| *field)
    }

    fn push(&mut self, field: ContactField, error: ContactFieldError) {
        self.errors.push((field, error));
    }
}

/// Raw contact form input, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Trimmed value of a field.
    #[must_use]
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => self.name.trim(),
            ContactField::Email => self.email.trim(),
            ContactField::Phone => self.phone.trim(),
            ContactField::Message => self.message.trim(),
        }
    }

    /// Check a single field, as done while the user types.
    ///
    /// # Errors
    ///
    /// Returns the reason the field is rejected.
    pub fn validate_field(&self, field: ContactField) -> Result<(), ContactFieldError> {
        let value = self.value(field);
        match field {
            ContactField::Name if value.chars().count() < MIN_NAME_CHARS => {
                Err(ContactFieldError::NameTooShort)
            }
            ContactField::Email => Email::parse(value)
                .map(drop)
                .map_err(ContactFieldError::InvalidEmail),
            ContactField::Phone if !value.is_empty() && !PHONE_PATTERN.is_match(value) => {
                Err(ContactFieldError::InvalidPhone)
            }
            ContactField::Message if value.chars().count() < MIN_MESSAGE_CHARS => {
                Err(ContactFieldError::MessageTooShort)
            }
            _ => Ok(()),
        }
    }

    /// Check every field and build the request to record.
    ///
    /// # Errors
    ///
    /// Returns every failing field, not just the first.
    pub fn validate(&self, submitted_at: DateTime<Utc>) -> Result<ContactRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut email = None;
        for field in ContactField::ALL {
            let checked = match field {
                ContactField::Email => Email::parse(self.value(field))
                    .map(|parsed| email = Some(parsed))
                    .map_err(ContactFieldError::InvalidEmail),
                _ => self.validate_field(field),
            };
            if let Err(error) = checked {
                errors.push(field, error);
            }
        }

        let Some(email) = email.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };

        Ok(ContactRequest {
            name: self.value(ContactField::Name).to_owned(),
            email,
            phone: self.value(ContactField::Phone).to_owned(),
            message: self.value(ContactField::Message).to_owned(),
            ts: submitted_at,
        })
    }
}

/// A validated contact request, as appended to the request log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: Email,
    /// Empty when the visitor left no phone number.
    pub phone: String,
    pub message: String,
    /// Submission time, stored as Unix milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
}
