//! Field constraints and payload field readers.
//!
//! Each reader looks at one key of a JSON object payload and returns a
//! [`Patch`]: `None` when the key is absent (or invalid), `Some(None)` when the
//! client sent `null` to clear a nullable field, `Some(Some(v))` for a value.
//! Failures are appended to a shared [`ValidationErrors`] so every bad field
//! is reported in one pass.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde_json::{Map, Value};

use crate::errors::{NON_FIELD_ERRORS, ValidationErrors};

pub const COMMON_NAME_MAX: usize = 255;
pub const SCIENTIFIC_NAME_MAX: usize = 255;
pub const HABITAT_MAX: usize = 255;
pub const ORIGIN_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 3000;
pub const LOCATION_MAX: usize = 250;
pub const NOTE_MAX: usize = 3000;
pub const USERNAME_MAX: usize = 150;
/// Max length of a stored image upload path.
pub const IMAGE_PATH_MAX: usize = 100;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_A_STRING: &str = "Not a valid string.";
pub const MSG_NOT_A_FILE: &str =
    "The submitted data was not a file. Check the encoding type on the form.";
pub const MSG_NO_NAME: &str = "No filename could be determined.";
pub const MSG_TIME_FORMAT: &str =
    "Time has wrong format. Use one of these formats instead: hh:mm[:ss[.uuuuuu]].";
pub const MSG_DATE_FORMAT: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Absent / cleared / set.
pub type Patch<T> = Option<Option<T>>;

/// Whether a write must carry every required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or full replace: required fields must be present.
    Full,
    /// Partial update: only the keys present are validated.
    Partial,
}

/// Message for a value longer than `max` characters.
#[must_use]
pub fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Message for an image path longer than [`IMAGE_PATH_MAX`].
#[must_use]
pub fn filename_length_message(len: usize) -> String {
    format!("Ensure this filename has at most {IMAGE_PATH_MAX} characters (it has {len}).")
}

/// Message for a related-record key that matches nothing.
#[must_use]
pub fn invalid_pk_message(pk: i64) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}

/// Python-flavoured type name used in client-facing messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Borrow the payload as a JSON object.
///
/// # Errors
///
/// Returns a `non_field_errors` entry if the payload is not an object.
pub fn expect_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload.as_object().ok_or_else(|| {
        ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(payload)
            ),
        )
    })
}

/// A bounded text column.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub name: &'static str,
    pub max_length: usize,
    /// Nullable and blank-able. Blank input is stored as `NULL`.
    pub optional: bool,
}

impl TextField {
    #[must_use]
    pub const fn required(name: &'static str, max_length: usize) -> Self {
        Self { name, max_length, optional: false }
    }

    #[must_use]
    pub const fn optional(name: &'static str, max_length: usize) -> Self {
        Self { name, max_length, optional: true }
    }

    /// Read and clean this field. Surrounding whitespace is trimmed.
    pub fn read(
        &self,
        payload: &Map<String, Value>,
        mode: WriteMode,
        errors: &mut ValidationErrors,
    ) -> Patch<String> {
        let Some(raw) = payload.get(self.name) else {
            if !self.optional && mode == WriteMode::Full {
                errors.add(self.name, MSG_REQUIRED);
            }
            return None;
        };
        match raw {
            Value::Null if self.optional => Some(None),
            Value::Null => {
                errors.add(self.name, MSG_NULL);
                None
            }
            Value::String(s) => self.clean(s.trim(), errors),
            Value::Number(n) => self.clean(&n.to_string(), errors),
            _ => {
                errors.add(self.name, MSG_NOT_A_STRING);
                None
            }
        }
    }

    /// Check a value that did not come from a payload (e.g. a CLI argument).
    ///
    /// # Errors
    ///
    /// Returns the field's blank or length error.
    pub fn validate(&self, value: &str) -> Result<Option<String>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let cleaned = self.clean(value.trim(), &mut errors).flatten();
        errors.into_result(cleaned)
    }

    fn clean(&self, text: &str, errors: &mut ValidationErrors) -> Patch<String> {
        if text.is_empty() {
            if self.optional {
                return Some(None);
            }
            errors.add(self.name, MSG_BLANK);
            return None;
        }
        if text.chars().count() > self.max_length {
            errors.add(self.name, max_length_message(self.max_length));
            return None;
        }
        Some(Some(text.to_string()))
    }
}

/// Read an optional image field carrying the submitted filename.
///
/// Directory components are dropped. The length check here covers the
/// filename alone; the full upload path is checked again once the owner is
/// known.
pub fn read_image(
    payload: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Patch<String> {
    match payload.get(name)? {
        Value::Null => Some(None),
        Value::String(s) => {
            let base = crate::uploads::base_name(s);
            if base.is_empty() {
                errors.add(name, MSG_NO_NAME);
                return None;
            }
            let len = base.chars().count();
            if len > IMAGE_PATH_MAX {
                errors.add(name, filename_length_message(len));
                return None;
            }
            Some(Some(base.to_string()))
        }
        _ => {
            errors.add(name, MSG_NOT_A_FILE);
            None
        }
    }
}

/// Read an optional, nullable primary-key reference.
///
/// Integers and integer strings are accepted. Existence is not checked here.
pub fn read_pk(
    payload: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Patch<i64> {
    let raw = payload.get(name)?;
    let pk = match raw {
        Value::Null => return Some(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if pk.is_none() {
        errors.add(
            name,
            format!(
                "Incorrect type. Expected pk value, received {}.",
                json_type_name(raw)
            ),
        );
        return None;
    }
    Some(pk)
}

/// Read a non-nullable time field that has a server-side default.
pub fn read_time(
    payload: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveTime> {
    match payload.get(name)? {
        Value::Null => {
            errors.add(name, MSG_NULL);
            None
        }
        Value::String(s) => {
            let parsed = parse_time(s.trim());
            if parsed.is_none() {
                errors.add(name, MSG_TIME_FORMAT);
            }
            parsed
        }
        _ => {
            errors.add(name, MSG_TIME_FORMAT);
            None
        }
    }
}

/// Read a non-nullable date field that has a server-side default.
pub fn read_date(
    payload: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    match payload.get(name)? {
        Value::Null => {
            errors.add(name, MSG_NULL);
            None
        }
        Value::String(s) => {
            let parsed = parse_date(s.trim());
            if parsed.is_none() {
                errors.add(name, MSG_DATE_FORMAT);
            }
            parsed
        }
        _ => {
            errors.add(name, MSG_DATE_FORMAT);
            None
        }
    }
}

/// Parse `hh:mm`, `hh:mm:ss`, or `hh:mm:ss.uuuuuu`.
///
/// Leap seconds (`:60`) are rejected.
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .filter(|time| time.nanosecond() < 1_000_000_000)
}

/// Parse `YYYY-MM-DD`.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Render a time as `hh:mm:ss`, adding `.uuuuuu` only when there are sub-seconds.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    let micros = time.nanosecond() / 1_000;
    if micros == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{micros:06}", time.format("%H:%M:%S"))
    }
}

/// Render a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
