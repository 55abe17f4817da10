use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta, Weekday,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{AxisDateTime, unix_seconds_to_datetime};

/// Calendar granularity understood by [`CalendarAligner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarUnit {
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    /// Next coarser unit; `Year` is its own parent.
    #[must_use]
    pub fn coarser(self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month | Self::Year => Self::Year,
        }
    }

    /// Moves `instant` by `steps` whole units (negative steps move back).
    ///
    /// Month and year steps follow chrono's clamping to the last day of
    /// shorter months. Returns `None` on calendar overflow.
    #[must_use]
    pub fn advance(self, instant: AxisDateTime, steps: i64) -> Option<AxisDateTime> {
        match self {
            Self::Day => shift_days(instant, steps),
            Self::Week => shift_days(instant, steps.checked_mul(7)?),
            Self::Month => shift_months(instant, steps),
            Self::Year => shift_months(instant, steps.checked_mul(12)?),
        }
    }
}

fn shift_days(instant: AxisDateTime, days: i64) -> Option<AxisDateTime> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        instant.checked_add_days(magnitude)
    } else {
        instant.checked_sub_days(magnitude)
    }
}

fn shift_months(instant: AxisDateTime, months: i64) -> Option<AxisDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

/// Snaps instants to local calendar boundaries and counts whole units.
///
/// Boundaries are computed in a fixed UTC offset, so every day is exactly
/// 24 hours long and results never depend on the host timezone database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAligner {
    offset: FixedOffset,
    week_start: Weekday,
}

impl Default for CalendarAligner {
    fn default() -> Self {
        Self::new(FixedOffset::east_opt(0).expect("zero UTC offset is valid"), Weekday::Mon)
    }
}

impl CalendarAligner {
    #[must_use]
    pub fn new(offset: FixedOffset, week_start: Weekday) -> Self {
        Self { offset, week_start }
    }

    #[must_use]
    pub fn offset(self) -> FixedOffset {
        self.offset
    }

    #[must_use]
    pub fn week_start(self) -> Weekday {
        self.week_start
    }

    /// Converts unix seconds into an instant expressed in the axis offset.
    #[must_use]
    pub fn instant(self, unix_seconds: f64) -> Option<AxisDateTime> {
        unix_seconds_to_datetime(unix_seconds, self.offset)
    }

    #[must_use]
    pub fn start_of_day(self, instant: AxisDateTime) -> AxisDateTime {
        self.local_midnight(self.local_date(instant))
    }

    #[must_use]
    pub fn start_of_week(self, instant: AxisDateTime) -> AxisDateTime {
        let date = self.local_date(instant);
        let back = (date.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        let week_start = date
            .checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(date);
        self.local_midnight(week_start)
    }

    #[must_use]
    pub fn start_of_month(self, instant: AxisDateTime) -> AxisDateTime {
        let date = self.local_date(instant);
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
        self.local_midnight(first)
    }

    #[must_use]
    pub fn start_of_year(self, instant: AxisDateTime) -> AxisDateTime {
        let date = self.local_date(instant);
        let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
        self.local_midnight(first)
    }

    #[must_use]
    pub fn start_of(self, unit: CalendarUnit, instant: AxisDateTime) -> AxisDateTime {
        match unit {
            CalendarUnit::Day => self.start_of_day(instant),
            CalendarUnit::Week => self.start_of_week(instant),
            CalendarUnit::Month => self.start_of_month(instant),
            CalendarUnit::Year => self.start_of_year(instant),
        }
    }

    /// Whole days elapsed from `from` to `to`, truncated.
    ///
    /// `from <= to` is a caller precondition.
    #[must_use]
    pub fn days_between(self, from: AxisDateTime, to: AxisDateTime) -> i64 {
        if !ordered(from, to, "days_between") {
            return 0;
        }
        to.signed_duration_since(from).num_days()
    }

    #[must_use]
    pub fn weeks_between(self, from: AxisDateTime, to: AxisDateTime) -> i64 {
        self.days_between(from, to) / 7
    }

    /// Complete calendar months from `from` to `to`.
    ///
    /// This is the largest `n` such that `from + n months <= to`, so
    /// 2020-01-31 to 2020-02-29 counts as one month (clamped end of month)
    /// while 2020-01-15 to 2020-02-14 counts as zero.
    #[must_use]
    pub fn months_between(self, from: AxisDateTime, to: AxisDateTime) -> i64 {
        if !ordered(from, to, "months_between") {
            return 0;
        }
        let from_local = from.with_timezone(&self.offset);
        let to_local = to.with_timezone(&self.offset);
        let mut months = i64::from(to_local.year() - from_local.year()) * 12
            + i64::from(to_local.month())
            - i64::from(from_local.month());

        while months > 0 {
            match shift_months(from_local, months) {
                Some(candidate) if candidate <= to_local => break,
                _ => months -= 1,
            }
        }
        months.max(0)
    }

    #[must_use]
    pub fn units_between(self, unit: CalendarUnit, from: AxisDateTime, to: AxisDateTime) -> i64 {
        match unit {
            CalendarUnit::Day => self.days_between(from, to),
            CalendarUnit::Week => self.weeks_between(from, to),
            CalendarUnit::Month => self.months_between(from, to),
            CalendarUnit::Year => self.months_between(from, to) / 12,
        }
    }

    fn local_date(self, instant: AxisDateTime) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn local_midnight(self, date: NaiveDate) -> AxisDateTime {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local
            .checked_sub_signed(TimeDelta::seconds(i64::from(self.offset.local_minus_utc())))
            .unwrap_or(local);
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }
}

fn ordered(from: AxisDateTime, to: AxisDateTime, operation: &'static str) -> bool {
    debug_assert!(from <= to, "{operation} requires from <= to ({from} > {to})");
    if from > to {
        warn!(%from, %to, operation, "calendar span is inverted; counting zero units");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Weekday};

    use super::{CalendarAligner, CalendarUnit};

    fn utc_aligner() -> CalendarAligner {
        CalendarAligner::default()
    }

    #[test]
    fn start_of_week_honours_configured_weekday() {
        let offset = FixedOffset::east_opt(0).unwrap();
        // 2019-12-18 is a Wednesday.
        let wednesday = offset.with_ymd_and_hms(2019, 12, 18, 15, 30, 0).unwrap();

        let monday_first = CalendarAligner::new(offset, Weekday::Mon);
        let sunday_first = CalendarAligner::new(offset, Weekday::Sun);

        assert_eq!(
            monday_first.start_of_week(wednesday),
            offset.with_ymd_and_hms(2019, 12, 16, 0, 0, 0).unwrap()
        );
        assert_eq!(
            sunday_first.start_of_week(wednesday),
            offset.with_ymd_and_hms(2019, 12, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn start_of_day_uses_local_calendar_day() {
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        let aligner = CalendarAligner::new(moscow, Weekday::Mon);
        // 22:30 UTC on Dec 31 is already Jan 1 in UTC+3.
        let instant = aligner
            .instant(
                chrono::Utc
                    .with_ymd_and_hms(2019, 12, 31, 22, 30, 0)
                    .unwrap()
                    .timestamp() as f64,
            )
            .unwrap();

        assert_eq!(
            aligner.start_of_day(instant),
            moscow.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            aligner.start_of_year(instant),
            moscow.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn alignment_is_idempotent_for_every_unit() {
        let aligner = utc_aligner();
        let offset = aligner.offset();
        let instant = offset.with_ymd_and_hms(2020, 2, 29, 13, 14, 15).unwrap();

        for unit in [
            CalendarUnit::Day,
            CalendarUnit::Week,
            CalendarUnit::Month,
            CalendarUnit::Year,
        ] {
            let once = aligner.start_of(unit, instant);
            assert_eq!(aligner.start_of(unit, once), once, "unit={unit:?}");
            assert!(once <= instant);
        }
    }

    #[test]
    fn months_between_counts_complete_months_only() {
        let aligner = utc_aligner();
        let offset = aligner.offset();
        let jan_15 = offset.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap();
        let feb_14 = offset.with_ymd_and_hms(2020, 2, 14, 0, 0, 0).unwrap();
        let feb_15 = offset.with_ymd_and_hms(2020, 2, 15, 0, 0, 0).unwrap();
        let jan_31 = offset.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap();
        let feb_29 = offset.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();

        assert_eq!(aligner.months_between(jan_15, feb_14), 0);
        assert_eq!(aligner.months_between(jan_15, feb_15), 1);
        assert_eq!(aligner.months_between(jan_31, feb_29), 1);
        assert_eq!(aligner.months_between(jan_15, jan_15), 0);
    }

    #[test]
    fn day_and_week_counts_truncate() {
        let aligner = utc_aligner();
        let offset = aligner.offset();
        let start = offset.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        let end = offset.with_ymd_and_hms(2020, 3, 14, 23, 59, 59).unwrap();

        assert_eq!(aligner.days_between(start, end), 13);
        assert_eq!(aligner.weeks_between(start, end), 1);
        assert_eq!(aligner.units_between(CalendarUnit::Year, start, end), 0);
    }

    #[test]
    fn advance_moves_backwards_and_forwards() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let jan_1 = offset.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            CalendarUnit::Month.advance(jan_1, 3),
            Some(offset.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            CalendarUnit::Week.advance(jan_1, -1),
            Some(offset.with_ymd_and_hms(2019, 12, 25, 0, 0, 0).unwrap())
        );
        assert_eq!(
            CalendarUnit::Year.advance(jan_1, -2),
            Some(offset.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "days_between requires from <= to")]
    fn inverted_span_is_a_debug_precondition_failure() {
        let aligner = utc_aligner();
        let offset = aligner.offset();
        let later = offset.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let earlier = offset.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let _ = aligner.days_between(later, earlier);
    }
}
