use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AxisError, AxisResult};

/// Calendar-aware instant used by the axis internals.
///
/// The offset is the axis timezone, so `date_naive()` yields the local
/// calendar day the tick belongs to.
pub type AxisDateTime = DateTime<FixedOffset>;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> AxisResult<f64> {
    value.to_f64().ok_or_else(|| {
        AxisError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts unix seconds into an instant in `offset`.
///
/// Sub-millisecond precision is rounded away. Returns `None` for non-finite
/// input or instants outside chrono's supported range.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64, offset: FixedOffset) -> Option<AxisDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1_000.0).round();
    if millis > (i64::MAX as f64) || millis < (i64::MIN as f64) {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|dt| dt.with_timezone(&offset))
}
