use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::calendar::CalendarAligner;
use crate::core::period::TimePeriod;
use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{AxisError, AxisResult};

/// Visible window of the chart, delivered on every pan/zoom/resize.
///
/// Instants are unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisViewport {
    pub visible_min: f64,
    pub visible_max: f64,
    pub content_width_px: f64,
}

impl AxisViewport {
    #[must_use]
    pub fn new(visible_min: f64, visible_max: f64, content_width_px: f64) -> Self {
        Self {
            visible_min,
            visible_max,
            content_width_px,
        }
    }

    /// `false` for non-finite bounds or a non-positive pixel width.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.visible_min.is_finite()
            && self.visible_max.is_finite()
            && self.content_width_px.is_finite()
            && self.content_width_px > 0.0
    }

    #[must_use]
    pub fn focused_period(self, aligner: CalendarAligner) -> Option<TimePeriod> {
        TimePeriod::from_unix_seconds(self.visible_min, self.visible_max, aligner)
    }
}

/// Time span of the whole loaded dataset, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpan {
    pub min: f64,
    pub max: f64,
}

impl DatasetSpan {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span from the first to the last point, both snapped to start of day.
    ///
    /// Points are expected in time order, as delivered by the data layer.
    pub fn from_points(points: &[PlotPoint], aligner: CalendarAligner) -> AxisResult<Self> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(AxisError::InvalidData(
                "dataset span cannot be built from empty data".to_owned(),
            ));
        };
        let first = aligner.instant(first.time).ok_or_else(|| {
            AxisError::InvalidData("first point time must be finite and in range".to_owned())
        })?;
        let last = aligner.instant(last.time).ok_or_else(|| {
            AxisError::InvalidData("last point time must be finite and in range".to_owned())
        })?;
        if last < first {
            return Err(AxisError::InvalidData(
                "points must be ordered by time".to_owned(),
            ));
        }

        Ok(Self {
            min: datetime_to_unix_seconds(&aligner.start_of_day(first)),
            max: datetime_to_unix_seconds(&aligner.start_of_day(last)),
        })
    }

    #[must_use]
    pub fn duration_seconds(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn period(self, aligner: CalendarAligner) -> Option<TimePeriod> {
        TimePeriod::from_unix_seconds(self.min, self.max, aligner)
    }
}

/// One plotted sample: time in unix seconds and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub time: f64,
    pub value: f64,
}

impl PlotPoint {
    #[must_use]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> AxisResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(&time),
            value: decimal_to_f64(value, "value")?,
        })
    }
}
