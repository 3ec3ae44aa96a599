use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Timestamp rendering used everywhere a reading leaves the process:
/// JSON responses, the CSV durable record and the XLSX mirror.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Reading {
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} T: {} / H: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.temperature,
            self.humidity
        )
    }
}

/// Lenient timestamp parsing for caller-supplied values. Sensors report
/// RFC 3339 or `YYYY-MM-DD HH:MM:SS`, older firmware sends a bare date.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(parsed.and_time(NaiveTime::MIN));
    }

    None
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_timestamp(&value)
            .ok_or_else(|| de::Error::custom(format!("malformed timestamp {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2024-05-01 12:30:00"),
            Some(datetime("2024-05-01 12:30:00"))
        );

        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00"),
            Some(datetime("2024-05-01 12:30:00"))
        );

        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00.250"),
            NaiveDateTime::parse_from_str("2024-05-01 12:30:00.250", "%Y-%m-%d %H:%M:%S%.f").ok()
        );

        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00+03:00"),
            Some(datetime("2024-05-01 12:30:00"))
        );

        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(datetime("2024-05-01 00:00:00"))
        );

        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("1714562200000"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let reading = Reading {
            timestamp: datetime("2024-05-01 12:30:00"),
            temperature: 25.2,
            humidity: 60.3,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2024-05-01 12:30:00","temperature":25.2,"humidity":60.3}"#
        );

        let parsed: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }

    #[test]
    fn test_display() {
        let reading = Reading {
            timestamp: datetime("2024-05-01 12:30:00"),
            temperature: 25.2,
            humidity: 60.3,
        };

        assert_eq!(reading.to_string(), "2024-05-01 12:30:00 T: 25.2 / H: 60.3");
    }
}
