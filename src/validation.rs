//! Field validation for inbound payloads.
//!
//! Every payload type implements [`Validate`]; failures are gathered per field
//! so one response reports every bad field, keyed by field name.

use std::collections::BTreeMap;
use std::fmt;

use email_address::EmailAddress;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::error::{ManagerError, Result};

/// Largest value a positive integer column can hold.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Largest value of a small positive integer column (player attribute values).
pub const MAX_SMALL_AMOUNT: u16 = 32767;

pub const BLANK: &str = "This field may not be blank.";
pub const REQUIRED: &str = "This field is required.";
pub const NULL: &str = "This field may not be null.";

/// Field name → messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Drop any messages already recorded for `field` and keep only `message`.
    pub fn replace(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), vec![message.into()]);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Turn the collected messages into `Ok(())` or a validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ManagerError::Validation(self))
        }
    }

    /// A required, non-blank string no longer than `max_length` characters.
    pub fn required_text(&mut self, field: &str, value: &str, max_length: usize) {
        if value.trim().is_empty() {
            self.add(field, BLANK);
        } else {
            self.max_length(field, value, max_length);
        }
    }

    /// An optional string; when present it must respect `max_length`.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max_length: usize) {
        if let Some(value) = value {
            self.max_length(field, value, max_length);
        }
    }

    pub fn max_length(&mut self, field: &str, value: &str, max_length: usize) {
        if value.chars().count() > max_length {
            self.add(
                field,
                format!("Ensure this field has no more than {max_length} characters."),
            );
        }
    }

    /// Positive integer columns are stored as SQLite signed integers.
    pub fn amount(&mut self, field: &str, value: u64) {
        if value > MAX_AMOUNT {
            self.add(
                field,
                format!("Ensure this value is less than or equal to {MAX_AMOUNT}."),
            );
        }
    }

    pub fn email(&mut self, field: &str, value: &str, max_length: usize) {
        if value.trim().is_empty() {
            self.add(field, BLANK);
        } else if !EmailAddress::is_valid(value) {
            self.add(field, "Enter a valid email address.");
        } else {
            self.max_length(field, value, max_length);
        }
    }

    /// Membership in one of the configured choice lists.
    pub fn choice(&mut self, field: &str, value: &str, choices: &[String]) {
        if !choices.iter().any(|c| c == value) {
            self.add(field, format!("\"{value}\" is not a valid choice."));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Check a payload against the configured limits.
pub trait Validate {
    fn validate(&self, settings: &Settings) -> Result<()>;
}

/// JSON shape used to stand in for a missing required key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandIn {
    Text,
    Number,
    Date,
    Label(&'static str),
}

impl StandIn {
    pub fn value(self) -> Value {
        match self {
            StandIn::Text => Value::String(String::new()),
            StandIn::Number => Value::from(0),
            StandIn::Date => Value::from("2000-01-01"),
            StandIn::Label(label) => Value::from(label),
        }
    }
}

/// A client payload with keys that must be present.
///
/// Absent keys are reported as required in the same response as every other
/// field error of the payload.
pub trait Draft: DeserializeOwned + Validate {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[];

    /// Deserialize `fields`, reporting missing or null required keys.
    fn from_fields(mut fields: Map<String, Value>, settings: &Settings) -> Result<Self> {
        let mut absent = Vec::new();
        for &(name, stand_in) in Self::REQUIRED {
            let message = match fields.get(name) {
                None => REQUIRED,
                Some(Value::Null) => NULL,
                Some(_) => continue,
            };
            fields.insert(name.to_string(), stand_in.value());
            absent.push((name, message));
        }

        let draft: Self = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ManagerError::MalformedBody {
                message: e.to_string(),
            }
        })?;
        if absent.is_empty() {
            return Ok(draft);
        }

        let mut errors = match draft.validate(settings) {
            Ok(()) => ValidationErrors::default(),
            Err(ManagerError::Validation(errors)) => errors,
            Err(other) => return Err(other),
        };
        for (name, message) in absent {
            errors.replace(name, message);
        }
        Err(ManagerError::Validation(errors))
    }
}

/// Message used when a referenced record does not exist.
pub fn invalid_pk(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Message used when a unique column already holds the value.
pub fn already_exists(entity: &str, field: &str) -> String {
    format!("{entity} with this {field} already exists.")
}

/// Lower-case the domain part of an email address.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests;
