use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::calendar::CalendarAligner;
use crate::core::period::TimePeriod;
use crate::core::stride::{LabelStyle, Stride, StrideCatalog};

/// Estimated on-screen width of one label per style, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelWidths {
    pub short_px: f64,
    pub long_px: f64,
}

impl LabelWidths {
    #[must_use]
    pub fn new(short_px: f64, long_px: f64) -> Self {
        Self { short_px, long_px }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.short_px.is_finite()
            && self.short_px > 0.0
            && self.long_px.is_finite()
            && self.long_px > 0.0
    }

    #[must_use]
    pub fn for_style(self, style: LabelStyle) -> f64 {
        match style {
            LabelStyle::Short => self.short_px,
            LabelStyle::Long => self.long_px,
        }
    }
}

/// Outcome of [`select_stride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrideSelection {
    pub stride: Stride,
    /// Ticks the stride needs to cover the focused window.
    pub needed_ticks: i64,
    /// Ticks allowed for the stride's label style.
    pub budget: i64,
    /// `false` when no candidate fit and the coarsest stride was used.
    pub fits: bool,
}

/// Number of labels of width `label_width_px` that fit in `content_width_px`.
#[must_use]
pub fn max_tick_count(content_width_px: f64, label_width_px: f64) -> i64 {
    if !content_width_px.is_finite() || content_width_px <= 0.0 {
        return 0;
    }
    if !label_width_px.is_finite() || label_width_px <= 0.0 {
        return 0;
    }
    (content_width_px / label_width_px).floor() as i64
}

/// Picks the finest catalog stride whose tick count fits the pixel budget.
///
/// The catalog is walked finest first, so for fixed budgets a wider focused
/// window never yields a finer stride. Falls back to the coarsest stride when
/// nothing fits; labels may then crowd at extreme zoom-out.
#[must_use]
pub fn select_stride(
    focused: TimePeriod,
    content_width_px: f64,
    widths: LabelWidths,
    catalog: &StrideCatalog,
    aligner: CalendarAligner,
) -> StrideSelection {
    let max_short = max_tick_count(content_width_px, widths.short_px);
    let max_long = max_tick_count(content_width_px, widths.long_px);

    for &stride in catalog.strides() {
        let units = focused.units(stride.unit().calendar_unit(), aligner);
        let needed_ticks = ceil_div(units, i64::from(stride.count()));
        let budget = match stride.label_style() {
            LabelStyle::Short => max_short,
            LabelStyle::Long => max_long,
        };
        trace!(%stride, units, needed_ticks, budget, "stride candidate");
        if needed_ticks <= budget {
            return StrideSelection {
                stride,
                needed_ticks,
                budget,
                fits: true,
            };
        }
    }

    let stride = catalog.coarsest();
    let units = focused.units(stride.unit().calendar_unit(), aligner);
    let needed_ticks = ceil_div(units, i64::from(stride.count()));
    let budget = match stride.label_style() {
        LabelStyle::Short => max_short,
        LabelStyle::Long => max_long,
    };
    debug!(
        %stride,
        needed_ticks,
        budget,
        "no stride fits the label budget; using coarsest"
    );
    StrideSelection {
        stride,
        needed_ticks,
        budget,
        fits: false,
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    if divisor <= 0 {
        return value;
    }
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::{LabelWidths, ceil_div, max_tick_count, select_stride};
    use crate::core::calendar::CalendarAligner;
    use crate::core::period::TimePeriod;
    use crate::core::stride::{Stride, StrideCatalog};

    fn period(days: i64) -> TimePeriod {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2019, 3, 4, 0, 0, 0)
            .unwrap();
        TimePeriod::new(start, start + chrono::TimeDelta::days(days))
    }

    #[test]
    fn ceil_div_rounds_up_partial_strides() {
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(8, 2), 4);
        assert_eq!(ceil_div(0, 3), 0);
    }

    #[test]
    fn budget_is_floor_of_width_ratio() {
        assert_eq!(max_tick_count(320.0, 40.0), 8);
        assert_eq!(max_tick_count(319.0, 40.0), 7);
        assert_eq!(max_tick_count(320.0, 0.0), 0);
        assert_eq!(max_tick_count(f64::NAN, 40.0), 0);
    }

    #[test]
    fn two_week_window_on_narrow_axis_uses_two_day_stride() {
        let selection = select_stride(
            period(14),
            320.0,
            LabelWidths::new(40.0, 60.0),
            &StrideCatalog::default(),
            CalendarAligner::default(),
        );
        assert_eq!(selection.stride, Stride::days(2));
        assert_eq!(selection.needed_ticks, 7);
        assert_eq!(selection.budget, 8);
        assert!(selection.fits);
    }

    #[test]
    fn unusable_budget_falls_back_to_coarsest() {
        let selection = select_stride(
            period(3_650),
            100.0,
            LabelWidths::new(40.0, 60.0),
            &StrideCatalog::default(),
            CalendarAligner::default(),
        );
        assert_eq!(selection.stride, Stride::months(6));
        assert!(!selection.fits);
        assert_eq!(selection.budget, 1);
    }
}
