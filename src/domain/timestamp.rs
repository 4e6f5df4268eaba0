//! Timestamp parsing for backend records.
//!
//! The backend emits `2021-10-04 14:23:06.545000+00:00`; RFC 3339 is accepted
//! as well so hand-written fixtures stay readable.

use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer};

const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, BACKEND_FORMAT))
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("unsupported timestamp `{raw}`")))
}

/// Same as [`deserialize`] for fields that may be absent or `null`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse(&raw).ok_or_else(|| D::Error::custom(format!("unsupported timestamp `{raw}`")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_backend_format_with_fraction_and_offset() {
        let parsed = parse("2021-10-04 14:23:06.545000+00:00").expect("must parse");

        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2021, 10, 4, 14, 23, 6).unwrap()
                + chrono::Duration::microseconds(545_000)
        );
    }

    #[test]
    fn parses_rfc3339_and_normalizes_offset() {
        let parsed = parse("2021-10-04T16:00:00+02:00").expect("must parse");

        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 10, 4, 14, 0, 0).unwrap());
    }

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize_option")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn optional_field_accepts_missing_null_and_value() {
        let missing: Stamped = serde_json::from_str("{}").expect("missing field");
        let null: Stamped = serde_json::from_str(r#"{"at": null}"#).expect("null field");
        let set: Stamped =
            serde_json::from_str(r#"{"at": "2024-01-01 00:00:00+00:00"}"#).expect("set field");

        assert_eq!(missing.at, None);
        assert_eq!(null.at, None);
        assert_eq!(set.at, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn rejects_free_text() {
        assert_eq!(parse("yesterday"), None);
    }
}
