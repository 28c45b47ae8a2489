//! Date-time serializer and tick conversions
//!
//! A tick is 100 nanoseconds; tick zero is 0001-01-01T00:00:00.

use chrono::{DateTime, NaiveDateTime, Timelike};
use oro_domain::constants::{
    DATE_TIME_FORMAT, MAX_DATE_TIME_TICKS, SECONDS_FROM_YEAR_ONE_TO_UNIX_EPOCH, TICKS_PER_SECOND,
};
use oro_domain::ports::ValueSerializer;

const NANOS_PER_TICK: i64 = 100;
const NANOS_PER_MILLI: u32 = 1_000_000;

const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Ticks of `value`
pub fn to_ticks(value: &NaiveDateTime) -> i64 {
    let utc = value.and_utc();
    let nanos = i64::from(utc.timestamp_subsec_nanos());
    (utc.timestamp() + SECONDS_FROM_YEAR_ONE_TO_UNIX_EPOCH) * TICKS_PER_SECOND
        + nanos / NANOS_PER_TICK
}

/// Date-time at `ticks`; `None` outside `[0, MAX_DATE_TIME_TICKS]`
pub fn from_ticks(ticks: i64) -> Option<NaiveDateTime> {
    if !(0..=MAX_DATE_TIME_TICKS).contains(&ticks) {
        return None;
    }
    let seconds = ticks.div_euclid(TICKS_PER_SECOND) - SECONDS_FROM_YEAR_ONE_TO_UNIX_EPOCH;
    let nanos = u32::try_from(ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK).ok()?;
    DateTime::from_timestamp(seconds, nanos).map(|value| value.naive_utc())
}

/// `yyyy-MM-dd HH:mm:ss.FFF`; the fraction is trimmed of trailing zeros and
/// dropped with its dot when zero
pub fn format_date_time(value: &NaiveDateTime) -> String {
    let mut text = value.format(DATE_TIME_FORMAT).to_string();
    let millis = (value.nanosecond() % 1_000_000_000) / NANOS_PER_MILLI;
    if millis > 0 {
        let fraction = format!("{millis:03}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

/// Date-times in the serialized format or as a tick count
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeSerializer;

impl ValueSerializer for DateTimeSerializer {
    type Value = NaiveDateTime;

    fn serialize(&self, value: &NaiveDateTime) -> Option<String> {
        Some(format_date_time(value))
    }

    fn deserialize(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| text.parse::<i64>().ok().and_then(from_ticks))
    }

    fn to_source_code(&self, value: &NaiveDateTime) -> String {
        let utc = value.and_utc();
        format!(
            "chrono::DateTime::from_timestamp({}, {}).unwrap_or_default().naive_utc()",
            utc.timestamp(),
            utc.timestamp_subsec_nanos()
        )
    }
}
