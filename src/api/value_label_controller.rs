use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DecimationState, DecimationStats, PlotPoint};

use super::AxisEngine;

/// Value label of one plotted point; `text` is `None` for hidden labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub index: usize,
    pub text: Option<String>,
}

impl ValueLabel {
    /// Text to draw; hidden labels render as an empty string.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl AxisEngine {
    /// Decides which points show their value at `zoom_scale`.
    ///
    /// Returns one entry per point in input order.
    pub fn compute_value_labels(
        &mut self,
        points: &[PlotPoint],
        zoom_scale: f64,
    ) -> Vec<ValueLabel> {
        let state = self.decimator.update(points.len(), zoom_scale);
        trace!(
            points = points.len(),
            zoom_scale,
            frequency = state.frequency(),
            "value labels"
        );

        points
            .iter()
            .enumerate()
            .map(|(index, point)| ValueLabel {
                index,
                text: state
                    .contains(index)
                    .then(|| (self.value_formatter)(point.value)),
            })
            .collect()
    }

    /// Current decimation state, if labels were computed since the last reset.
    #[must_use]
    pub fn value_label_state(&self) -> Option<&DecimationState> {
        self.decimator.state()
    }

    #[must_use]
    pub fn value_label_stats(&self) -> DecimationStats {
        self.decimator.stats()
    }

    /// Forgets the retained label set; call when a new dataset is loaded.
    pub fn reset_value_labels(&mut self) {
        self.decimator.reset();
    }
}
