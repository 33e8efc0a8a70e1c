//! Parsing of `YYYY-MM-DD` calendar dates sent by clients.
//!
//! Browser date inputs submit an empty string when left blank, so a blank
//! value is treated the same as an absent one.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an optional date field.
///
/// `None` and blank strings yield `Ok(None)`. Anything else must match
/// [`DATE_FORMAT`].
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                CoreError::Validation(format!(
                    "Data inválida em '{field}'. Use o formato AAAA-MM-DD"
                ))
            }),
    }
}
