use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_TARGET_VISIBLE_LABEL_COUNT: usize = 8;

/// Retained decimation result for the currently rendered point sequence.
///
/// `included` always equals `{ i < point_count : i % frequency == 0 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimationState {
    frequency: usize,
    point_count: usize,
    included: BTreeSet<usize>,
}

impl DecimationState {
    fn build(frequency: usize, point_count: usize) -> Self {
        let frequency = frequency.max(1);
        Self {
            frequency,
            point_count,
            included: (0..point_count).step_by(frequency).collect(),
        }
    }

    #[must_use]
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[must_use]
    pub fn included_indices(&self) -> &BTreeSet<usize> {
        &self.included
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.included.contains(&index)
    }
}

/// Runtime metrics of a [`ValueLabelDecimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecimationStats {
    pub rebuilds: u64,
    pub reuses: u64,
    pub frequency: usize,
    pub included: usize,
}

/// Points visible at `zoom_scale`, `round(point_count / zoom_scale)`.
///
/// Non-finite or non-positive scales are treated as fully zoomed out.
#[must_use]
pub fn visible_point_count(point_count: usize, zoom_scale: f64) -> usize {
    let zoom_scale = if zoom_scale.is_finite() && zoom_scale > 0.0 {
        zoom_scale
    } else {
        warn!(zoom_scale, "invalid zoom scale; treating as 1");
        1.0
    };
    let visible = (point_count as f64 / zoom_scale).round();
    if visible <= 0.0 { 0 } else { visible as usize }
}

/// Label decimation frequency for `visible_count` on-screen points.
///
/// Computes `floor(2^(log2(visible)) / (target / 2 + 1))` with floating-point
/// semantics kept as-is, clamped to at least one.
#[must_use]
pub fn decimation_frequency(visible_count: usize, target_visible_label_count: usize) -> usize {
    let denominator = (target_visible_label_count / 2 + 1) as f64;
    let raw = 2.0_f64.powf((visible_count as f64).log2()) / denominator;
    if raw.is_finite() && raw >= 1.0 {
        raw.floor() as usize
    } else {
        1
    }
}

/// Chooses which points carry a value label at the current zoom.
///
/// The inclusion set is rebuilt only when the frequency or the point count
/// changes, so labels stay put while the zoom moves inside one frequency band.
/// Identity is index based.
#[derive(Debug, Clone)]
pub struct ValueLabelDecimator {
    target_visible_label_count: usize,
    state: Option<DecimationState>,
    rebuilds: u64,
    reuses: u64,
}

impl Default for ValueLabelDecimator {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_VISIBLE_LABEL_COUNT)
    }
}

impl ValueLabelDecimator {
    #[must_use]
    pub fn new(target_visible_label_count: usize) -> Self {
        Self {
            target_visible_label_count,
            state: None,
            rebuilds: 0,
            reuses: 0,
        }
    }

    #[must_use]
    pub fn target_visible_label_count(&self) -> usize {
        self.target_visible_label_count
    }

    /// Recomputes the frequency and returns the (possibly reused) state.
    pub fn update(&mut self, point_count: usize, zoom_scale: f64) -> &DecimationState {
        let visible = visible_point_count(point_count, zoom_scale);
        let frequency = decimation_frequency(visible, self.target_visible_label_count);

        let state = match self.state.take() {
            Some(state) if state.frequency == frequency && state.point_count == point_count => {
                self.reuses = self.reuses.saturating_add(1);
                state
            }
            _ => {
                debug!(point_count, visible, frequency, "rebuild value label set");
                self.rebuilds = self.rebuilds.saturating_add(1);
                DecimationState::build(frequency, point_count)
            }
        };
        self.state.insert(state)
    }

    #[must_use]
    pub fn state(&self) -> Option<&DecimationState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn is_included(&self, index: usize) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.contains(index))
    }

    /// Drops retained state, e.g. after a dataset reload.
    pub fn reset(&mut self) {
        self.state = None;
    }

    #[must_use]
    pub fn stats(&self) -> DecimationStats {
        DecimationStats {
            rebuilds: self.rebuilds,
            reuses: self.reuses,
            frequency: self.state.as_ref().map_or(0, DecimationState::frequency),
            included: self.state.as_ref().map_or(0, |state| state.included.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ValueLabelDecimator, decimation_frequency, visible_point_count};

    #[test]
    fn fully_zoomed_out_thousand_points_label_every_two_hundredth() {
        assert_eq!(visible_point_count(1_000, 1.0), 1_000);
        assert_eq!(decimation_frequency(1_000, 8), 200);
    }

    #[test]
    fn frequency_keeps_float_rounding_of_the_power_of_two_form() {
        // 2^(log2 100) lands just below 100, so 100 / 5 floors to 19.
        assert_eq!(decimation_frequency(100, 8), 19);
        assert_eq!(decimation_frequency(2, 8), 1);
    }

    #[test]
    fn deep_zoom_labels_every_point() {
        assert_eq!(visible_point_count(1_000, 500.0), 2);
        assert_eq!(decimation_frequency(2, 8), 1);
        assert_eq!(decimation_frequency(0, 8), 1);
    }

    #[test]
    fn invalid_zoom_is_treated_as_one() {
        assert_eq!(visible_point_count(300, 0.0), 300);
        assert_eq!(visible_point_count(300, f64::NAN), 300);
    }

    #[test]
    fn unchanged_frequency_reuses_state() {
        let mut decimator = ValueLabelDecimator::default();
        let first = decimator.update(1_000, 1.0).clone();
        let second = decimator.update(1_000, 0.999).clone();

        assert_eq!(first, second);
        let stats = decimator.stats();
        assert_eq!(stats.rebuilds, 1);
        assert_eq!(stats.reuses, 1);
        assert_eq!(stats.frequency, first.frequency());
        assert_eq!(stats.included, 1_000_usize.div_ceil(first.frequency()));
    }

    #[test]
    fn point_count_change_rebuilds_even_with_same_frequency() {
        let mut decimator = ValueLabelDecimator::new(8);
        decimator.update(12, 1.0);
        let state = decimator.update(13, 1.0);

        assert_eq!(state.frequency(), 2);
        assert!(state.contains(12));
        assert_eq!(decimator.stats().rebuilds, 2);
    }
}
