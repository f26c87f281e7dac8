use chrono::NaiveDate;
use fm_core::field_value::DATE_FORMAT;
use serde::de::DeserializeOwned;

/// Parse an enum value by its wire name.
///
/// Accepts the exact wire spelling (`rawData`), a kebab or snake form
/// (`raw-data`, `raw_data`), or the separator-free lowercase form
/// (`textarea`).
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let candidates = [
        raw.to_string(),
        to_camel(raw),
        raw.to_lowercase().replace(['-', '_'], ""),
    ];
    candidates
        .iter()
        .find_map(|candidate| serde_json::from_value(serde_json::Value::from(candidate.as_str())).ok())
        .ok_or_else(|| anyhow::anyhow!("invalid {field} '{raw}'"))
}

fn to_camel(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper = false;
    for ch in raw.chars() {
        if matches!(ch, '-' | '_') {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Validate a `YYYY-MM-DD` date argument, returning it unchanged.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|_| raw.to_string())
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

#[cfg(test)]
mod tests {
    use fm_core::enums::{AnimalKind, AppliesTo, FieldKind, PropertyKind};

    use super::{parse_date, parse_enum};

    #[test]
    fn parses_wire_spelling() {
        let kind: PropertyKind = parse_enum("rawData", "kind").expect("kind should parse");
        assert_eq!(kind, PropertyKind::RawData);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let kind: PropertyKind = parse_enum("raw-data", "kind").expect("kind should parse");
        assert_eq!(kind, PropertyKind::RawData);
        let field: FieldKind = parse_enum("text-area", "kind").expect("kind should parse");
        assert_eq!(field, FieldKind::TextArea);
    }

    #[test]
    fn parses_lowercase_enums() {
        assert_eq!(parse_enum::<AnimalKind>("Sample", "kind").unwrap(), AnimalKind::Sample);
        assert_eq!(parse_enum::<AppliesTo>("both", "applies-to").unwrap(), AppliesTo::Both);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AnimalKind>("plant", "kind").expect_err("should fail");
        assert!(err.to_string().contains("invalid kind 'plant'"));
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(parse_date("2026-02-01", "start").unwrap(), "2026-02-01");
        assert!(parse_date("02/01/2026", "start").is_err());
    }
}
