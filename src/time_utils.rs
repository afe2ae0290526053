// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared clock and calendar-day helpers.

use chrono::{NaiveDate, TimeZone, Utc};

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC calendar day of an epoch-millisecond timestamp.
pub fn utc_day_of_millis(millis: i64) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// Serde codec for timestamps in the JavaScript `toISOString` shape
/// (`2024-01-15T10:00:00.000Z`). Any RFC 3339 offset is accepted on input.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_day_of_millis() {
        // 2024-01-15T23:59:59.999Z
        let day = utc_day_of_millis(1_705_363_199_999).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let next = utc_day_of_millis(1_705_363_200_000).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }
}
