use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::calendar::CalendarUnit;
use crate::core::primitives::AxisDateTime;
use crate::error::{AxisError, AxisResult};

/// Text class used for a tick label.
///
/// `Short` renders day precision (`dd.mm`), `Long` renders month/year
/// precision (`mm.yyyy`). Each class has its own pixel budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelStyle {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrideUnit {
    Day,
    Week,
    Month,
}

impl StrideUnit {
    #[must_use]
    pub fn calendar_unit(self) -> CalendarUnit {
        match self {
            Self::Day => CalendarUnit::Day,
            Self::Week => CalendarUnit::Week,
            Self::Month => CalendarUnit::Month,
        }
    }

    /// Boundary used to phase ticks: one level coarser than the unit itself.
    #[must_use]
    pub fn anchor_unit(self) -> CalendarUnit {
        self.calendar_unit().coarser()
    }

    #[must_use]
    pub fn label_style(self) -> LabelStyle {
        match self {
            Self::Day | Self::Week => LabelStyle::Short,
            Self::Month => LabelStyle::Long,
        }
    }

    fn nominal_seconds(self) -> f64 {
        match self {
            Self::Day => 86_400.0,
            Self::Week => 604_800.0,
            // Mean Gregorian month.
            Self::Month => 2_629_746.0,
        }
    }
}

/// Calendar distance between consecutive axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stride {
    unit: StrideUnit,
    count: u32,
}

impl Stride {
    /// Builds a stride; `count` must be at least one.
    pub fn new(unit: StrideUnit, count: u32) -> AxisResult<Self> {
        if count == 0 {
            return Err(AxisError::InvalidConfig(
                "stride count must be >= 1".to_owned(),
            ));
        }
        Ok(Self { unit, count })
    }

    #[must_use]
    pub const fn days(count: u32) -> Self {
        Self::unchecked(StrideUnit::Day, count)
    }

    #[must_use]
    pub const fn weeks(count: u32) -> Self {
        Self::unchecked(StrideUnit::Week, count)
    }

    #[must_use]
    pub const fn months(count: u32) -> Self {
        Self::unchecked(StrideUnit::Month, count)
    }

    const fn unchecked(unit: StrideUnit, count: u32) -> Self {
        let count = if count == 0 { 1 } else { count };
        Self { unit, count }
    }

    #[must_use]
    pub fn unit(self) -> StrideUnit {
        self.unit
    }

    #[must_use]
    pub fn count(self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn label_style(self) -> LabelStyle {
        self.unit.label_style()
    }

    /// Moves `instant` by `steps` strides (negative steps move back).
    #[must_use]
    pub fn advance(self, instant: AxisDateTime, steps: i64) -> Option<AxisDateTime> {
        let units = steps.checked_mul(i64::from(self.count))?;
        self.unit.calendar_unit().advance(instant, units)
    }

    /// Approximate length used only to order catalog entries.
    #[must_use]
    pub fn nominal_seconds(self) -> f64 {
        self.unit.nominal_seconds() * f64::from(self.count)
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            StrideUnit::Day => "d",
            StrideUnit::Week => "w",
            StrideUnit::Month => "mo",
        };
        write!(f, "{}{}", self.count, suffix)
    }
}

pub const DEFAULT_STRIDES: [Stride; 9] = [
    Stride::days(1),
    Stride::days(2),
    Stride::days(4),
    Stride::weeks(1),
    Stride::weeks(2),
    Stride::months(1),
    Stride::months(2),
    Stride::months(3),
    Stride::months(6),
];

/// Candidate strides ordered finest to coarsest. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrideCatalog {
    strides: SmallVec<[Stride; 12]>,
}

impl Default for StrideCatalog {
    fn default() -> Self {
        Self {
            strides: SmallVec::from_slice(&DEFAULT_STRIDES),
        }
    }
}

impl StrideCatalog {
    /// Validates ordering and builds a catalog.
    ///
    /// Entries must be non-empty, have `count >= 1` and be strictly
    /// increasing in nominal length.
    pub fn new(strides: impl IntoIterator<Item = Stride>) -> AxisResult<Self> {
        let strides: SmallVec<[Stride; 12]> = strides.into_iter().collect();
        if strides.is_empty() {
            return Err(AxisError::InvalidConfig(
                "stride catalog must contain at least one stride".to_owned(),
            ));
        }
        if strides.iter().any(|stride| stride.count == 0) {
            return Err(AxisError::InvalidConfig(
                "stride count must be >= 1".to_owned(),
            ));
        }
        for pair in strides.windows(2) {
            if pair[0].nominal_seconds() >= pair[1].nominal_seconds() {
                return Err(AxisError::InvalidConfig(format!(
                    "stride catalog must be ordered finest to coarsest: {} is not finer than {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { strides })
    }

    #[must_use]
    pub fn strides(&self) -> &[Stride] {
        &self.strides
    }

    #[must_use]
    pub fn finest(&self) -> Stride {
        self.strides[0]
    }

    #[must_use]
    pub fn coarsest(&self) -> Stride {
        self.strides[self.strides.len() - 1]
    }
}
