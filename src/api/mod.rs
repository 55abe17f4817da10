mod axis_config;
mod axis_tick_context;
mod axis_tick_controller;
mod dataset_layout;
mod engine;
mod engine_config;
mod label_text_formatter;
mod value_label_controller;

pub use axis_config::{AxisCalendarConfig, TimeAxisTimeZone};
pub use axis_tick_context::AxisTickContext;
pub use axis_tick_controller::AxisTick;
pub use dataset_layout::{SideInsets, max_zoom_scale_for_period, side_insets_for_span};
pub use engine::AxisEngine;
pub use engine_config::{
    AxisEngineConfig, DEFAULT_LABEL_PADDING_PX, DEFAULT_LEFT_INSET_RATIO,
    DEFAULT_RIGHT_INSET_RATIO,
};
pub use label_text_formatter::{
    FontMetrics, LabelFormatter, MonospaceFontMetrics, ValueLabelFormatterFn,
    default_value_formatter,
};
pub use value_label_controller::ValueLabel;
