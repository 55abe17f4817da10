use serde::{Deserialize, Serialize};

use crate::core::calendar::CalendarUnit;
use crate::core::period::TimePeriod;
use crate::core::primitives::AxisDateTime;

/// History length a user can pick for the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePreset {
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
}

impl RangePreset {
    pub const ALL: [RangePreset; 6] = [
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
    ];

    /// Longest preset; used to size the initial data request.
    #[must_use]
    pub fn biggest() -> Self {
        Self::TwoYears
    }

    fn calendar_length(self) -> (CalendarUnit, i64) {
        match self {
            Self::OneWeek => (CalendarUnit::Week, 1),
            Self::OneMonth => (CalendarUnit::Month, 1),
            Self::ThreeMonths => (CalendarUnit::Month, 3),
            Self::SixMonths => (CalendarUnit::Month, 6),
            Self::OneYear => (CalendarUnit::Year, 1),
            Self::TwoYears => (CalendarUnit::Year, 2),
        }
    }

    /// Short identifier shown on range buttons, e.g. `"3M"`.
    #[must_use]
    pub fn range_id(self) -> String {
        let (unit, count) = self.calendar_length();
        let suffix = match unit {
            CalendarUnit::Day => "D",
            CalendarUnit::Week => "W",
            CalendarUnit::Month => "M",
            CalendarUnit::Year => "Y",
        };
        format!("{count}{suffix}")
    }

    #[must_use]
    pub fn from_range_id(range_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.range_id().eq_ignore_ascii_case(range_id))
    }

    /// Period of the preset's calendar length starting at `start`.
    #[must_use]
    pub fn period_from(self, start: AxisDateTime) -> Option<TimePeriod> {
        let (unit, count) = self.calendar_length();
        Some(TimePeriod::new(start, unit.advance(start, count)?))
    }

    /// Period of the preset's calendar length ending at `end`.
    #[must_use]
    pub fn period_until(self, end: AxisDateTime) -> Option<TimePeriod> {
        let (unit, count) = self.calendar_length();
        Some(TimePeriod::new(unit.advance(end, -count)?, end))
    }
}
