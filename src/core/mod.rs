pub mod calendar;
pub mod period;
pub mod primitives;
pub mod range_preset;
pub mod stride;
pub mod stride_selector;
pub mod tick_slicer;
pub mod types;
pub mod value_labels;

pub use calendar::{CalendarAligner, CalendarUnit};
pub use period::TimePeriod;
pub use primitives::{AxisDateTime, datetime_to_unix_seconds, unix_seconds_to_datetime};
pub use range_preset::RangePreset;
pub use stride::{DEFAULT_STRIDES, LabelStyle, Stride, StrideCatalog, StrideUnit};
pub use stride_selector::{LabelWidths, StrideSelection, max_tick_count, select_stride};
pub use tick_slicer::{MAX_AXIS_TICKS, slice_ticks, slice_ticks_from_anchor, tick_anchor};
pub use types::{AxisViewport, DatasetSpan, PlotPoint};
pub use value_labels::{
    DEFAULT_TARGET_VISIBLE_LABEL_COUNT, DecimationState, DecimationStats, ValueLabelDecimator,
    decimation_frequency, visible_point_count,
};
