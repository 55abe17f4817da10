use tracing::{trace, warn};

use crate::core::calendar::CalendarAligner;
use crate::core::period::TimePeriod;
use crate::core::primitives::AxisDateTime;
use crate::core::stride::Stride;

/// Hard cap on emitted ticks for a single slice.
pub const MAX_AXIS_TICKS: usize = 4096;

/// Calendar boundary from which ticks of `stride` are phased.
///
/// Days are phased from the start of the week containing `full.start`,
/// weeks from the start of its month and months from the start of its year.
/// Using the full dataset span keeps the phase fixed while panning.
#[must_use]
pub fn tick_anchor(full: TimePeriod, stride: Stride, aligner: CalendarAligner) -> AxisDateTime {
    aligner.start_of(stride.unit().anchor_unit(), full.start())
}

/// Tick instants of `stride` intersecting `focused`, phased against `full`.
///
/// Returns an empty sequence for zero-length or inverted focused windows.
#[must_use]
pub fn slice_ticks(
    focused: TimePeriod,
    full: TimePeriod,
    stride: Stride,
    aligner: CalendarAligner,
) -> Vec<AxisDateTime> {
    if focused.is_degenerate() {
        trace!(
            start = %focused.start(),
            end = %focused.end(),
            "degenerate focused window; no ticks"
        );
        return Vec::new();
    }
    let anchor = tick_anchor(full, stride, aligner);
    slice_ticks_from_anchor(focused, anchor, stride, aligner)
}

/// Walks stride-long cursor periods from `anchor` and keeps the start of
/// every cursor that overlaps `focused`.
///
/// Cursors that end before the focused window are skipped arithmetically, so
/// the walk is proportional to the number of emitted ticks. The anchor may lie
/// after `focused.start`, in which case cursors are taken at negative offsets.
#[must_use]
pub fn slice_ticks_from_anchor(
    focused: TimePeriod,
    anchor: AxisDateTime,
    stride: Stride,
    aligner: CalendarAligner,
) -> Vec<AxisDateTime> {
    if focused.is_degenerate() {
        return Vec::new();
    }

    let mut index = first_cursor_index(focused, anchor, stride, aligner);
    let mut ticks = Vec::new();

    loop {
        let Some(cursor) = cursor_period(anchor, stride, index) else {
            warn!(%stride, index, "tick cursor left the supported calendar range");
            break;
        };
        if cursor.start() > focused.end() {
            break;
        }
        if cursor.overlaps(focused) {
            ticks.push(cursor.start());
            if ticks.len() >= MAX_AXIS_TICKS {
                warn!(%stride, limit = MAX_AXIS_TICKS, "tick slice truncated");
                break;
            }
        }
        index += 1;
    }

    trace!(%stride, %anchor, count = ticks.len(), "sliced ticks");
    ticks
}

fn cursor_period(anchor: AxisDateTime, stride: Stride, index: i64) -> Option<TimePeriod> {
    let start = stride.advance(anchor, index)?;
    let end = stride.advance(anchor, index.checked_add(1)?)?;
    Some(TimePeriod::new(start, end))
}

/// Index of a cursor starting at or before `focused.start`.
///
/// The estimate is stepped back by one so rounding in the whole-unit counts
/// can never skip the cursor that straddles the window start.
fn first_cursor_index(
    focused: TimePeriod,
    anchor: AxisDateTime,
    stride: Stride,
    aligner: CalendarAligner,
) -> i64 {
    let unit = stride.unit().calendar_unit();
    let count = i64::from(stride.count());
    if focused.start() >= anchor {
        let units = aligner.units_between(unit, anchor, focused.start());
        (units / count - 1).max(0)
    } else {
        let units = aligner.units_between(unit, focused.start(), anchor);
        -(units / count + 2)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, FixedOffset, TimeZone};

    use super::{MAX_AXIS_TICKS, slice_ticks, tick_anchor};
    use crate::core::calendar::CalendarAligner;
    use crate::core::period::TimePeriod;
    use crate::core::stride::Stride;

    fn at(y: i32, m: u32, d: u32) -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .unwrap()
    }

    #[test]
    fn anchor_is_one_level_coarser_than_stride_unit() {
        let aligner = CalendarAligner::default();
        // 2019-12-18 is a Wednesday.
        let full = TimePeriod::new(at(2019, 12, 18), at(2021, 12, 18));

        assert_eq!(tick_anchor(full, Stride::days(2), aligner), at(2019, 12, 16));
        assert_eq!(tick_anchor(full, Stride::weeks(1), aligner), at(2019, 12, 1));
        assert_eq!(tick_anchor(full, Stride::months(3), aligner), at(2019, 1, 1));
    }

    #[test]
    fn first_tick_is_the_cursor_straddling_the_window_start() {
        let aligner = CalendarAligner::default();
        let full = TimePeriod::new(at(2019, 1, 10), at(2021, 1, 10));
        let focused = TimePeriod::new(at(2020, 2, 15), at(2020, 9, 15));

        let ticks = slice_ticks(focused, full, Stride::months(3), aligner);
        let months: Vec<u32> = ticks.iter().map(|tick| tick.month()).collect();

        assert_eq!(months, vec![1, 4, 7]);
        assert_eq!(ticks[0], at(2020, 1, 1));
    }

    #[test]
    fn window_before_anchor_still_produces_phased_ticks() {
        let aligner = CalendarAligner::default();
        let full = TimePeriod::new(at(2020, 3, 10), at(2020, 12, 1));
        let focused = TimePeriod::new(at(2019, 11, 20), at(2020, 2, 10));

        let ticks = slice_ticks(focused, full, Stride::months(2), aligner);
        assert_eq!(
            ticks,
            vec![at(2019, 11, 1), at(2020, 1, 1)],
            "ticks keep the odd-month phase of the 2020-01-01 anchor"
        );
    }

    #[test]
    fn zero_length_window_yields_no_ticks() {
        let aligner = CalendarAligner::default();
        let full = TimePeriod::new(at(2019, 1, 1), at(2021, 1, 1));
        let focused = TimePeriod::new(at(2020, 5, 5), at(2020, 5, 5));

        assert!(slice_ticks(focused, full, Stride::days(1), aligner).is_empty());
    }

    #[test]
    fn oversized_window_is_capped() {
        let aligner = CalendarAligner::default();
        let full = TimePeriod::new(at(1900, 1, 1), at(2100, 1, 1));

        let ticks = slice_ticks(full, full, Stride::days(1), aligner);
        assert_eq!(ticks.len(), MAX_AXIS_TICKS);
    }
}
