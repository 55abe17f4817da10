use std::fmt;

use tracing::debug;

use crate::core::{CalendarAligner, StrideCatalog, ValueLabelDecimator};
use crate::error::AxisResult;

use super::label_text_formatter::default_value_formatter;
use super::{AxisEngineConfig, LabelFormatter, ValueLabelFormatterFn};

/// Main facade consumed by the chart view.
///
/// One engine belongs to one chart view. The only state retained between
/// calls is the value-label decimation; axis ticks are recomputed from the
/// inputs every time.
pub struct AxisEngine {
    pub(super) config: AxisEngineConfig,
    pub(super) aligner: CalendarAligner,
    pub(super) catalog: StrideCatalog,
    pub(super) formatter: LabelFormatter,
    pub(super) value_formatter: ValueLabelFormatterFn,
    pub(super) decimator: ValueLabelDecimator,
}

impl AxisEngine {
    /// Validates `config` and creates an engine.
    pub fn new(config: AxisEngineConfig) -> AxisResult<Self> {
        let catalog = config.validate()?;
        let aligner = config.calendar.aligner();
        debug!(
            strides = catalog.strides().len(),
            offset_minutes = config.calendar.timezone.offset_minutes(),
            week_start = %config.calendar.week_start,
            "axis engine init"
        );

        Ok(Self {
            aligner,
            catalog,
            formatter: LabelFormatter::new(aligner.offset()),
            value_formatter: default_value_formatter(),
            decimator: ValueLabelDecimator::new(config.target_visible_value_labels),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AxisEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn aligner(&self) -> CalendarAligner {
        self.aligner
    }

    #[must_use]
    pub fn stride_catalog(&self) -> &StrideCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn label_formatter(&self) -> LabelFormatter {
        self.formatter
    }

    /// Replaces the function that renders numeric value labels.
    pub fn set_value_formatter(&mut self, formatter: ValueLabelFormatterFn) {
        self.value_formatter = formatter;
    }
}

impl fmt::Debug for AxisEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisEngine")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("decimator", &self.decimator)
            .finish_non_exhaustive()
    }
}
