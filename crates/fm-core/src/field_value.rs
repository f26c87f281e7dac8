//! Typed view over the string-stored animal field values.
//!
//! Values are persisted as plain strings regardless of kind. Where the kind is
//! known, callers parse into a [`FieldValue`] to get a checked representation
//! (a real calendar date for `date` fields) and convert back with
//! [`FieldValue::into_stored`] before writing.

use chrono::NaiveDate;

use crate::enums::FieldKind;
use crate::errors::CoreError;

/// Storage format for `date` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Select(String),
    TextArea(String),
}

impl FieldValue {
    /// Parse a stored string according to `kind`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `kind` is `date` and `raw` is not a
    /// `YYYY-MM-DD` date.
    pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, CoreError> {
        match kind {
            FieldKind::Text => Ok(Self::Text(raw.to_string())),
            FieldKind::Select => Ok(Self::Select(raw.to_string())),
            FieldKind::TextArea => Ok(Self::TextArea(raw.to_string())),
            FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(Self::Date)
                .map_err(|e| CoreError::Validation(format!("invalid date '{raw}': {e}"))),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Date(_) => FieldKind::Date,
            Self::Select(_) => FieldKind::Select,
            Self::TextArea(_) => FieldKind::TextArea,
        }
    }

    /// Convert back to the persisted string form.
    #[must_use]
    pub fn into_stored(self) -> String {
        match self {
            Self::Text(s) | Self::Select(s) | Self::TextArea(s) => s,
            Self::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::Text, "Cage A")]
    #[case(FieldKind::Select, "male")]
    #[case(FieldKind::TextArea, "line one\nline two")]
    #[case(FieldKind::Date, "2025-03-14")]
    fn parse_then_store_preserves_text(#[case] kind: FieldKind, #[case] raw: &str) {
        let value = FieldValue::parse(kind, raw).unwrap();
        assert_eq!(value.kind(), kind);
        assert_eq!(value.into_stored(), raw);
    }

    #[test]
    fn date_parses_to_calendar_date() {
        let value = FieldValue::parse(FieldKind::Date, "2024-02-29").unwrap();
        assert_eq!(
            value,
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn invalid_date_is_rejected() {
        let err = FieldValue::parse(FieldKind::Date, "3mo").unwrap_err();
        assert!(err.to_string().contains("invalid date '3mo'"));
    }
}
