use std::sync::Arc;

use chrono::FixedOffset;

use crate::core::{AxisDateTime, LabelStyle, LabelWidths};

pub type ValueLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

const SHORT_LABEL_PATTERN: &str = "%d.%m";
const LONG_LABEL_PATTERN: &str = "%m.%Y";

/// Text measurement supplied by the host toolkit.
///
/// Only used to estimate label widths once per style, never for layout.
pub trait FontMetrics {
    fn text_width(&self, text: &str) -> f64;
}

/// Fixed advance per character; handy for tests and terminal-like hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFontMetrics {
    pub char_width_px: f64,
}

impl MonospaceFontMetrics {
    #[must_use]
    pub fn new(char_width_px: f64) -> Self {
        Self { char_width_px }
    }
}

impl FontMetrics for MonospaceFontMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width_px
    }
}

impl<F> FontMetrics for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Renders tick instants as `dd.mm` (short) or `mm.yyyy` (long).
///
/// Pure: the output depends only on the instant, the style and the
/// configured offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormatter {
    offset: FixedOffset,
}

impl LabelFormatter {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn format(self, tick: AxisDateTime, style: LabelStyle) -> String {
        let pattern = match style {
            LabelStyle::Short => SHORT_LABEL_PATTERN,
            LabelStyle::Long => LONG_LABEL_PATTERN,
        };
        tick.with_timezone(&self.offset).format(pattern).to_string()
    }

    #[must_use]
    pub fn measure_width(sample_text: &str, metrics: &dyn FontMetrics) -> f64 {
        metrics.text_width(sample_text)
    }

    /// Width estimate for both styles from one representative instant.
    #[must_use]
    pub fn measure_label_widths(
        self,
        sample: AxisDateTime,
        metrics: &dyn FontMetrics,
        padding_px: f64,
    ) -> LabelWidths {
        let short = Self::measure_width(&self.format(sample, LabelStyle::Short), metrics);
        let long = Self::measure_width(&self.format(sample, LabelStyle::Long), metrics);
        LabelWidths::new(short + padding_px, long + padding_px)
    }
}

#[must_use]
pub fn default_value_formatter() -> ValueLabelFormatterFn {
    Arc::new(|value| format!("{value:.2}"))
}
