use chrono::TimeDelta;

use crate::core::calendar::{CalendarAligner, CalendarUnit};
use crate::core::primitives::{AxisDateTime, datetime_to_unix_seconds};
use crate::core::stride::Stride;

/// Ordered pair of instants.
///
/// Well-formed periods have `start <= end`. Inverted periods are still
/// representable because viewports can transiently invert during gestures;
/// [`TimePeriod::is_degenerate`] reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriod {
    start: AxisDateTime,
    end: AxisDateTime,
}

impl TimePeriod {
    #[must_use]
    pub fn new(start: AxisDateTime, end: AxisDateTime) -> Self {
        Self { start, end }
    }

    /// Builds a period from unix seconds in the aligner's offset.
    #[must_use]
    pub fn from_unix_seconds(start: f64, end: f64, aligner: CalendarAligner) -> Option<Self> {
        Some(Self::new(aligner.instant(start)?, aligner.instant(end)?))
    }

    /// Period starting at `start` and spanning exactly one stride.
    #[must_use]
    pub fn starting_at(start: AxisDateTime, stride: Stride) -> Option<Self> {
        Some(Self::new(start, stride.advance(start, 1)?))
    }

    #[must_use]
    pub fn start(self) -> AxisDateTime {
        self.start
    }

    #[must_use]
    pub fn end(self) -> AxisDateTime {
        self.end
    }

    /// `true` for zero-length and inverted periods.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    #[must_use]
    pub fn duration_seconds(self) -> f64 {
        datetime_to_unix_seconds(&self.end) - datetime_to_unix_seconds(&self.start)
    }

    #[must_use]
    pub fn days(self, aligner: CalendarAligner) -> i64 {
        aligner.days_between(self.start, self.end)
    }

    #[must_use]
    pub fn weeks(self, aligner: CalendarAligner) -> i64 {
        aligner.weeks_between(self.start, self.end)
    }

    #[must_use]
    pub fn months(self, aligner: CalendarAligner) -> i64 {
        aligner.months_between(self.start, self.end)
    }

    /// Whole `unit`s covered by the period; zero for inverted periods.
    #[must_use]
    pub fn units(self, unit: CalendarUnit, aligner: CalendarAligner) -> i64 {
        if self.start > self.end {
            return 0;
        }
        aligner.units_between(unit, self.start, self.end)
    }

    /// Open-interval overlap: periods that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(self, other: TimePeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Both endpoints advanced by one stride.
    #[must_use]
    pub fn shifted(self, stride: Stride) -> Option<Self> {
        Some(Self::new(
            stride.advance(self.start, 1)?,
            stride.advance(self.end, 1)?,
        ))
    }
}
