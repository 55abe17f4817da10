use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_STRIDES, DEFAULT_TARGET_VISIBLE_LABEL_COUNT, Stride, StrideCatalog};
use crate::error::{AxisError, AxisResult};

use super::{AxisCalendarConfig, TimeAxisTimeZone};

pub const DEFAULT_LABEL_PADDING_PX: f64 = 16.0;
pub const DEFAULT_LEFT_INSET_RATIO: f64 = 0.12;
pub const DEFAULT_RIGHT_INSET_RATIO: f64 = 0.08;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load axis setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisEngineConfig {
    #[serde(default)]
    pub calendar: AxisCalendarConfig,
    #[serde(default = "default_strides")]
    pub strides: Vec<Stride>,
    /// Horizontal space added to each measured label.
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_target_visible_value_labels")]
    pub target_visible_value_labels: usize,
    /// Blank space before the first point, as a share of the dataset span.
    #[serde(default = "default_left_inset_ratio")]
    pub left_inset_ratio: f64,
    /// Blank space after the last point, as a share of the dataset span.
    #[serde(default = "default_right_inset_ratio")]
    pub right_inset_ratio: f64,
}

impl Default for AxisEngineConfig {
    fn default() -> Self {
        Self {
            calendar: AxisCalendarConfig::default(),
            strides: default_strides(),
            label_padding_px: default_label_padding_px(),
            target_visible_value_labels: default_target_visible_value_labels(),
            left_inset_ratio: default_left_inset_ratio(),
            right_inset_ratio: default_right_inset_ratio(),
        }
    }
}

impl AxisEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeAxisTimeZone) -> Self {
        self.calendar.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: chrono::Weekday) -> Self {
        self.calendar.week_start = week_start;
        self
    }

    /// Replaces the stride catalog. Entries must be ordered finest first.
    #[must_use]
    pub fn with_strides(mut self, strides: Vec<Stride>) -> Self {
        self.strides = strides;
        self
    }

    #[must_use]
    pub fn with_label_padding_px(mut self, padding_px: f64) -> Self {
        self.label_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_target_visible_value_labels(mut self, count: usize) -> Self {
        self.target_visible_value_labels = count;
        self
    }

    #[must_use]
    pub fn with_side_inset_ratios(mut self, left: f64, right: f64) -> Self {
        self.left_inset_ratio = left;
        self.right_inset_ratio = right;
        self
    }

    /// Checks every field and builds the validated stride catalog.
    pub fn validate(&self) -> AxisResult<StrideCatalog> {
        if self.calendar.timezone.try_fixed_offset().is_none() {
            return Err(AxisError::InvalidConfig(format!(
                "timezone offset out of range: {} minutes",
                self.calendar.timezone.offset_minutes()
            )));
        }
        if !self.label_padding_px.is_finite() || self.label_padding_px < 0.0 {
            return Err(AxisError::InvalidConfig(
                "label padding must be finite and >= 0".to_owned(),
            ));
        }
        if self.target_visible_value_labels == 0 {
            return Err(AxisError::InvalidConfig(
                "target visible value labels must be >= 1".to_owned(),
            ));
        }
        if !self.left_inset_ratio.is_finite()
            || !self.right_inset_ratio.is_finite()
            || self.left_inset_ratio < 0.0
            || self.right_inset_ratio < 0.0
        {
            return Err(AxisError::InvalidConfig(
                "side inset ratios must be finite and >= 0".to_owned(),
            ));
        }
        StrideCatalog::new(self.strides.iter().copied())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AxisError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| AxisError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_strides() -> Vec<Stride> {
    DEFAULT_STRIDES.to_vec()
}

fn default_label_padding_px() -> f64 {
    DEFAULT_LABEL_PADDING_PX
}

fn default_target_visible_value_labels() -> usize {
    DEFAULT_TARGET_VISIBLE_LABEL_COUNT
}

fn default_left_inset_ratio() -> f64 {
    DEFAULT_LEFT_INSET_RATIO
}

fn default_right_inset_ratio() -> f64 {
    DEFAULT_RIGHT_INSET_RATIO
}
