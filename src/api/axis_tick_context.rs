use crate::core::{AxisDateTime, LabelStyle, StrideSelection, TimePeriod};

use super::LabelFormatter;

/// Per-frame axis decision shared by tick slicing and label formatting.
///
/// Built once per viewport change and discarded afterwards; the formatter
/// reads the style from here instead of asking the slicer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTickContext {
    pub focused: TimePeriod,
    pub full: TimePeriod,
    pub selection: StrideSelection,
    pub anchor: AxisDateTime,
    pub content_width_px: f64,
}

impl AxisTickContext {
    #[must_use]
    pub fn style(&self) -> LabelStyle {
        self.selection.stride.label_style()
    }

    #[must_use]
    pub fn label(&self, formatter: LabelFormatter, tick: AxisDateTime) -> String {
        formatter.format(tick, self.style())
    }
}
