use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

use crate::params::ParamValue;

/// Unit of a relative time offset such as `-1hour` or `+2days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl OffsetUnit {
    fn as_str(self) -> &'static str {
        match self {
            OffsetUnit::Minute => "minute",
            OffsetUnit::Hour => "hour",
            OffsetUnit::Day => "day",
            OffsetUnit::Week => "week",
        }
    }

    fn minutes(self) -> i64 {
        match self {
            OffsetUnit::Minute => 1,
            OffsetUnit::Hour => 60,
            OffsetUnit::Day => 60 * 24,
            OffsetUnit::Week => 60 * 24 * 7,
        }
    }
}

/// Time relative to now, as accepted by `from` / `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub amount: i64,
    pub unit: OffsetUnit,
}

impl Offset {
    pub fn minutes(amount: i64) -> Self {
        Self { amount, unit: OffsetUnit::Minute }
    }

    pub fn hours(amount: i64) -> Self {
        Self { amount, unit: OffsetUnit::Hour }
    }

    pub fn days(amount: i64) -> Self {
        Self { amount, unit: OffsetUnit::Day }
    }

    pub fn weeks(amount: i64) -> Self {
        Self { amount, unit: OffsetUnit::Week }
    }

    /// Express a duration in the largest unit that divides it evenly
    /// (sub-minute precision is truncated).
    pub fn from_duration(d: Duration) -> Self {
        let minutes = d.num_minutes();
        for unit in [OffsetUnit::Week, OffsetUnit::Day, OffsetUnit::Hour] {
            if minutes != 0 && minutes % unit.minutes() == 0 {
                return Self { amount: minutes / unit.minutes(), unit };
            }
        }
        Self::minutes(minutes)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.amount.abs() == 1 { "" } else { "s" };
        write!(f, "{:+}{}{}", self.amount, self.unit.as_str(), plural)
    }
}

impl From<Offset> for ParamValue {
    fn from(value: Offset) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Str(yyyy_mm_dd(&value))
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::Str(value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

pub fn yyyy_mm_dd(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse date inputs from config or the command line:
/// - "YYYYMMDD" or "YYYY-MM-DD"
/// - integer <= 0 means today + delta days
///
/// Returns `None` for anything else; such values can still be passed to the
/// API verbatim (it understands e.g. `today` or `+1week`).
pub fn parse_date_like(s: &str, now: DateTime<Utc>) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        if n <= 0 {
            return Duration::try_days(n).and_then(|d| now.date_naive().checked_add_signed(d));
        }
        if trimmed.len() == 8 {
            return NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok();
        }
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offsets_render_signed_and_pluralized() {
        assert_eq!(Offset::hours(-1).to_string(), "-1hour");
        assert_eq!(Offset::days(2).to_string(), "+2days");
        assert_eq!(Offset::weeks(1).to_string(), "+1week");
        assert_eq!(Offset::minutes(-30).to_string(), "-30minutes");
    }

    #[test]
    fn offset_from_duration_picks_largest_unit() {
        assert_eq!(Offset::from_duration(Duration::hours(-1)), Offset::hours(-1));
        assert_eq!(Offset::from_duration(Duration::hours(48)), Offset::days(2));
        assert_eq!(Offset::from_duration(Duration::days(14)), Offset::weeks(2));
        assert_eq!(Offset::from_duration(Duration::minutes(90)), Offset::minutes(90));
    }

    #[test]
    fn dates_convert_to_param_values() {
        let d = NaiveDate::from_ymd_opt(2018, 3, 7).unwrap();
        assert_eq!(ParamValue::from(d), ParamValue::from("2018-03-07"));
        let dt = Utc.with_ymd_and_hms(2018, 3, 7, 6, 30, 0).unwrap();
        assert_eq!(ParamValue::from(dt), ParamValue::from("2018-03-07T06:30:00Z"));
    }

    #[test]
    fn parses_date_like_values() {
        let now = Utc.with_ymd_and_hms(2022, 1, 31, 12, 0, 0).unwrap();
        assert_eq!(
            parse_date_like("20000101", now),
            NaiveDate::from_ymd_opt(2000, 1, 1)
        );
        assert_eq!(
            parse_date_like("2000-01-02", now),
            NaiveDate::from_ymd_opt(2000, 1, 2)
        );
        assert_eq!(parse_date_like("-1", now), NaiveDate::from_ymd_opt(2022, 1, 30));
        assert_eq!(parse_date_like("today", now), None);
        assert_eq!(parse_date_like("-100000000", now), None);
        assert_eq!(parse_date_like("-999999999999", now), None);
    }
}
