use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CalendarAligner, DatasetSpan, PlotPoint, TimePeriod};
use crate::error::AxisResult;

use super::AxisEngine;

/// Blank time added before and after the dataset on the axis, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideInsets {
    pub left: f64,
    pub right: f64,
}

/// Upper bound of the horizontal zoom scale for a dataset period.
///
/// Short datasets cannot be zoomed at all; longer ones may be zoomed until
/// roughly one week, one month or one quarter fills the chart.
#[must_use]
pub fn max_zoom_scale_for_period(period: TimePeriod, aligner: CalendarAligner) -> f64 {
    if period.is_degenerate() {
        return 1.0;
    }
    let weeks = period.weeks(aligner);
    let months = period.months(aligner);

    let scale = if weeks <= 1 {
        1.0
    } else if months <= 2 {
        weeks as f64
    } else if months <= 6 {
        months as f64
    } else {
        months as f64 / 3.0
    };
    scale.max(1.0)
}

#[must_use]
pub fn side_insets_for_span(span: DatasetSpan, left_ratio: f64, right_ratio: f64) -> SideInsets {
    let duration = span.duration_seconds();
    if !duration.is_finite() || duration <= 0.0 {
        return SideInsets {
            left: 0.0,
            right: 0.0,
        };
    }
    SideInsets {
        left: duration * left_ratio,
        right: duration * right_ratio,
    }
}

impl AxisEngine {
    /// Day-aligned span of `points`; fails on empty or unordered data.
    pub fn dataset_span(&self, points: &[PlotPoint]) -> AxisResult<DatasetSpan> {
        let span = DatasetSpan::from_points(points, self.aligner)?;
        debug!(min = span.min, max = span.max, points = points.len(), "dataset span");
        Ok(span)
    }

    #[must_use]
    pub fn max_zoom_scale(&self, span: DatasetSpan) -> f64 {
        span.period(self.aligner)
            .map_or(1.0, |period| max_zoom_scale_for_period(period, self.aligner))
    }

    #[must_use]
    pub fn side_insets(&self, span: DatasetSpan) -> SideInsets {
        side_insets_for_span(
            span,
            self.config.left_inset_ratio,
            self.config.right_inset_ratio,
        )
    }

    /// Axis range that fully shows the dataset plus its side insets.
    #[must_use]
    pub fn padded_axis_range(&self, span: DatasetSpan) -> (f64, f64) {
        let insets = self.side_insets(span);
        (span.min - insets.left, span.max + insets.right)
    }
}
