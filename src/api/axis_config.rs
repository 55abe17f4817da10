use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::CalendarAligner;

/// Timezone in which calendar boundaries and tick labels are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeAxisTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl TimeAxisTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    /// `None` when the offset is a day or more away from UTC.
    #[must_use]
    pub fn try_fixed_offset(self) -> Option<FixedOffset> {
        FixedOffset::east_opt(i32::from(self.offset_minutes()) * 60)
    }

    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        self.try_fixed_offset()
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero UTC offset is valid"))
    }
}

/// Calendar conventions of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisCalendarConfig {
    pub timezone: TimeAxisTimeZone,
    /// First day of the week used to phase day strides.
    pub week_start: Weekday,
}

impl Default for AxisCalendarConfig {
    fn default() -> Self {
        Self {
            timezone: TimeAxisTimeZone::Utc,
            week_start: Weekday::Mon,
        }
    }
}

impl AxisCalendarConfig {
    #[must_use]
    pub fn aligner(self) -> CalendarAligner {
        CalendarAligner::new(self.timezone.fixed_offset(), self.week_start)
    }
}
