use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};

/// Current UTC time truncated to whole milliseconds.
pub fn now() -> DateTime<Utc> {
    let current = Utc::now();
    DateTime::from_timestamp_millis(current.timestamp_millis()).unwrap_or(current)
}

/// Timestamp for a mutation of a record last stamped at `previous`.
/// Always at least one millisecond later, even if the wall clock has not moved.
pub fn next_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    let floor = previous + TimeDelta::milliseconds(1);
    if current < floor {
        floor
    } else {
        current
    }
}

/// Accepts RFC 3339 as well as offset-less ISO strings, which are taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn parse_field<E: serde::de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
    parse_datetime(raw).ok_or_else(|| E::custom(format!("invalid date/time: {raw}")))
}

/// Serde helper for optional date/time fields on create bodies.
pub fn optional_datetime<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(de)? {
        Some(raw) => parse_field(&raw).map(Some),
        None => Ok(None),
    }
}

/// Serde helper for nullable date/time fields on patch bodies:
/// absent keeps the value, `null` clears it.
pub fn patch_datetime<'de, D>(de: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_datetime(de).map(Some)
}

/// Serde helper for nullable patch fields: absent keeps the value, `null` clears it.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Serde helper for non-nullable patch fields: absent keeps the value, `null` is rejected.
pub fn non_null<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    match Option::<T>::deserialize(de)? {
        Some(value) => Ok(Some(value)),
        None => Err(serde::de::Error::custom("field may not be null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn next_stamp_never_repeats_previous() {
        let previous = now() + TimeDelta::seconds(5);
        assert_eq!(next_stamp(previous), previous + TimeDelta::milliseconds(1));

        let old = now() - TimeDelta::seconds(5);
        assert!(next_stamp(old) > old + TimeDelta::seconds(4));
    }

    #[test]
    fn parses_rfc3339_and_naive_iso() {
        let with_offset = parse_datetime("2025-03-01T10:30:00+02:00").unwrap();
        assert_eq!(with_offset.hour(), 8);

        let naive = parse_datetime("2025-03-01T10:30:00.123456").unwrap();
        assert_eq!(naive.hour(), 10);
        assert_eq!(naive.day(), 1);

        let date_only = parse_datetime("2025-12-31").unwrap();
        assert_eq!(date_only.month(), 12);

        assert!(parse_datetime("next tuesday").is_none());
    }
}
