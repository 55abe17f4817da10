use chart_axis_rs::core::{
    CalendarAligner, LabelStyle, LabelWidths, Stride, StrideCatalog, TimePeriod, select_stride,
};
use chrono::{FixedOffset, TimeZone, TimeDelta};

fn utc(y: i32, m: u32, d: u32) -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("utc offset")
        .with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn select(focused: TimePeriod, width: f64, widths: LabelWidths) -> Stride {
    select_stride(
        focused,
        width,
        widths,
        &StrideCatalog::default(),
        CalendarAligner::default(),
    )
    .stride
}

#[test]
fn one_week_window_selects_daily_stride() {
    // Two years of daily data, one week visible, 320px with 40px short labels.
    let focused = TimePeriod::new(utc(2020, 6, 1), utc(2020, 6, 8));
    let selection = select_stride(
        focused,
        320.0,
        LabelWidths::new(40.0, 60.0),
        &StrideCatalog::default(),
        CalendarAligner::default(),
    );

    assert_eq!(selection.stride, Stride::days(1));
    assert_eq!(selection.needed_ticks, 7);
    assert_eq!(selection.budget, 8);
    assert_eq!(selection.stride.label_style(), LabelStyle::Short);
}

#[test]
fn eight_month_window_selects_two_month_stride_within_long_budget() {
    // 300px / 60px gives a long-label budget of 5 ticks: one-month needs 8,
    // two-month needs 4.
    let focused = TimePeriod::new(utc(2019, 3, 1), utc(2019, 11, 1));
    let selection = select_stride(
        focused,
        300.0,
        LabelWidths::new(40.0, 60.0),
        &StrideCatalog::default(),
        CalendarAligner::default(),
    );

    assert_eq!(selection.budget, 5);
    assert_eq!(selection.stride, Stride::months(2));
    assert_eq!(selection.needed_ticks, 4);
    assert_eq!(selection.stride.label_style(), LabelStyle::Long);
}

#[test]
fn eight_month_window_on_narrower_axis_selects_quarterly_stride() {
    let focused = TimePeriod::new(utc(2019, 3, 1), utc(2019, 11, 1));
    let stride = select(focused, 180.0, LabelWidths::new(40.0, 60.0));

    assert_eq!(stride, Stride::months(3));
}

#[test]
fn week_windows_use_short_labels_until_months_are_cheaper() {
    let widths = LabelWidths::new(40.0, 60.0);

    let month = TimePeriod::new(utc(2020, 1, 1), utc(2020, 2, 1));
    assert_eq!(select(month, 320.0, widths), Stride::days(4));

    let quarter = TimePeriod::new(utc(2020, 1, 1), utc(2020, 4, 1));
    assert_eq!(select(quarter, 320.0, widths), Stride::weeks(2));
}

#[test]
fn selection_never_gets_finer_as_the_window_widens() {
    let widths = LabelWidths::new(46.0, 58.0);
    let catalog = StrideCatalog::default();
    let position = |stride: Stride| {
        catalog
            .strides()
            .iter()
            .position(|candidate| *candidate == stride)
            .expect("stride from catalog")
    };

    let start = utc(2018, 1, 1);
    let mut previous = 0;
    for days in 1..=900 {
        let focused = TimePeriod::new(start, start + TimeDelta::days(days));
        let current = position(select(focused, 375.0, widths));
        assert!(current >= previous, "days={days} current={current} previous={previous}");
        previous = current;
    }
}

#[test]
fn custom_catalog_falls_back_to_its_own_coarsest_entry() {
    let catalog = StrideCatalog::new([Stride::days(1), Stride::weeks(1)]).expect("catalog");
    let focused = TimePeriod::new(utc(2019, 1, 1), utc(2020, 1, 1));

    let selection = select_stride(
        focused,
        300.0,
        LabelWidths::new(40.0, 60.0),
        &catalog,
        CalendarAligner::default(),
    );
    assert_eq!(selection.stride, Stride::weeks(1));
    assert!(!selection.fits);
}
