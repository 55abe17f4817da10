//! chart-axis-rs: adaptive time-axis ticks for interactive time-series charts.
//!
//! The engine decides which calendar-aligned ticks a line chart draws for the
//! visible window, how each tick is labelled, and which data points carry a
//! value label at the current zoom. Rendering, gestures and data loading stay
//! with the host chart surface.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisEngine, AxisEngineConfig};
pub use error::{AxisError, AxisResult};
