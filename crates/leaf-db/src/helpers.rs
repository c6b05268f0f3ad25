//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and the text encodings
//! used for timestamps, times, and dates.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use leaf_core::enums::EntityType;
use leaf_core::fields::{parse_date, parse_time};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column holding `hh:mm:ss[.uuuuuu]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a time.
pub fn parse_time_column(s: &str) -> Result<NaiveTime, DatabaseError> {
    parse_time(s).ok_or_else(|| DatabaseError::Query(format!("Failed to parse time '{s}'")))
}

/// Parse a TEXT column holding `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a date.
pub fn parse_date_column(s: &str) -> Result<NaiveDate, DatabaseError> {
    parse_date(s).ok_or_else(|| DatabaseError::Query(format!("Failed to parse date '{s}'")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Bind an optional value, mapping `None` to SQL NULL.
pub fn opt_value<T: Into<libsql::Value>>(value: Option<T>) -> libsql::Value {
    value.map_or(libsql::Value::Null, Into::into)
}

/// Map `EntityType` to the corresponding SQL table name.
#[must_use]
pub const fn entity_type_to_table(entity: EntityType) -> &'static str {
    match entity {
        EntityType::User => "users",
        EntityType::Plant => "plants",
        EntityType::Observation => "observations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_accepts_both_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn datetime_rejects_garbage() {
        assert!(matches!(parse_datetime("yesterday"), Err(DatabaseError::Query(_))));
    }

    #[test]
    fn time_and_date_columns() {
        assert_eq!(
            parse_time_column("08:00:00.500000").unwrap(),
            NaiveTime::from_hms_micro_opt(8, 0, 0, 500_000).unwrap()
        );
        assert_eq!(
            parse_date_column("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert!(parse_time_column("8 o'clock").is_err());
        assert!(parse_date_column("March").is_err());
    }

    #[test]
    fn every_entity_has_a_table() {
        assert_eq!(entity_type_to_table(EntityType::User), "users");
        assert_eq!(entity_type_to_table(EntityType::Plant), "plants");
        assert_eq!(entity_type_to_table(EntityType::Observation), "observations");
    }
}
