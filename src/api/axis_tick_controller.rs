use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{
    AxisViewport, DatasetSpan, LabelWidths, datetime_to_unix_seconds, select_stride,
    slice_ticks_from_anchor, tick_anchor,
};

use super::{AxisEngine, AxisTickContext, FontMetrics};

/// One time-axis mark handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Unix seconds; the x coordinate of the tick.
    pub position: f64,
    pub label: String,
}

impl AxisEngine {
    /// Estimates short/long label widths with `metrics`.
    ///
    /// The dataset's last instant is the sample, so the estimate is stable
    /// across frames of one dataset. Returns `None` when the span is not a
    /// usable instant.
    #[must_use]
    pub fn measure_label_widths(
        &self,
        span: DatasetSpan,
        metrics: &dyn FontMetrics,
    ) -> Option<LabelWidths> {
        let sample = self
            .aligner
            .instant(span.max)
            .or_else(|| self.aligner.instant(span.min))?;
        Some(
            self.formatter
                .measure_label_widths(sample, metrics, self.config.label_padding_px),
        )
    }

    /// Ticks for the current viewport, measuring label widths with `metrics`.
    #[must_use]
    pub fn compute_axis_ticks(
        &self,
        viewport: AxisViewport,
        span: DatasetSpan,
        metrics: &dyn FontMetrics,
    ) -> Vec<AxisTick> {
        let Some(widths) = self.measure_label_widths(span, metrics) else {
            warn!(
                min = span.min,
                max = span.max,
                "dataset span is not a valid instant; no ticks"
            );
            return Vec::new();
        };
        self.compute_axis_ticks_with_widths(viewport, span, widths)
    }

    /// Ticks for the current viewport with pre-measured label widths.
    ///
    /// Total: degenerate or invalid input produces an empty list.
    #[must_use]
    pub fn compute_axis_ticks_with_widths(
        &self,
        viewport: AxisViewport,
        span: DatasetSpan,
        widths: LabelWidths,
    ) -> Vec<AxisTick> {
        let Some(context) = self.axis_tick_context(viewport, span, widths) else {
            return Vec::new();
        };

        slice_ticks_from_anchor(
            context.focused,
            context.anchor,
            context.selection.stride,
            self.aligner,
        )
        .into_iter()
        .map(|tick| AxisTick {
            position: datetime_to_unix_seconds(&tick),
            label: context.label(self.formatter, tick),
        })
        .collect()
    }

    /// Resolves stride, style and anchor for a viewport.
    ///
    /// Returns `None` for degenerate viewports and for inputs that violate
    /// the caller contract (non-finite bounds, unusable label widths).
    #[must_use]
    pub fn axis_tick_context(
        &self,
        viewport: AxisViewport,
        span: DatasetSpan,
        widths: LabelWidths,
    ) -> Option<AxisTickContext> {
        if !viewport.is_valid() {
            warn!(?viewport, "invalid axis viewport; no ticks");
            return None;
        }
        debug_assert!(
            widths.is_valid(),
            "label widths must be measured before computing ticks ({widths:?})"
        );
        if !widths.is_valid() {
            warn!(?widths, "label widths must be measured before computing ticks");
            return None;
        }

        let focused = viewport.focused_period(self.aligner)?;
        if focused.is_degenerate() {
            trace!(?viewport, "degenerate focused window; no ticks");
            return None;
        }
        let Some(full) = span.period(self.aligner) else {
            warn!(?span, "dataset span is not a valid instant; no ticks");
            return None;
        };
        if focused.start() < full.start() {
            trace!(
                visible_min = viewport.visible_min,
                dataset_min = span.min,
                "focused window starts before dataset"
            );
        }

        let selection = select_stride(
            focused,
            viewport.content_width_px,
            widths,
            &self.catalog,
            self.aligner,
        );
        let anchor = tick_anchor(full, selection.stride, self.aligner);
        trace!(
            stride = %selection.stride,
            needed = selection.needed_ticks,
            budget = selection.budget,
            %anchor,
            "axis tick context"
        );

        Some(AxisTickContext {
            focused,
            full,
            selection,
            anchor,
            content_width_px: viewport.content_width_px,
        })
    }
}
