//! Length units and the plan-length to display-distance conversion.

use std::fmt;

/// Feet in one meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Length units the engine converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    Meters,
    Feet,
}

impl LengthUnit {
    /// Parse a unit name: "meters"/"m" or "feet"/"ft", any case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "meters" | "meter" | "m" => Some(Self::Meters),
            "feet" | "foot" | "ft" => Some(Self::Feet),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Meters => "meters",
            Self::Feet => "feet",
        }
    }

    /// Express `value` given in `self` in `to`.
    pub fn convert(self, value: f64, to: LengthUnit) -> f64 {
        match (self, to) {
            (Self::Meters, Self::Feet) => value * FEET_PER_METER,
            (Self::Feet, Self::Meters) => value / FEET_PER_METER,
            _ => value,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert `value` between named units.
///
/// A missing or empty name on either side, or two names that are equal
/// ignoring case, leave the value unchanged. Otherwise both names must
/// parse as a [`LengthUnit`]; any other pair yields `None`.
pub fn convert_distance(value: f64, from: Option<&str>, to: Option<&str>) -> Option<f64> {
    let (Some(from), Some(to)) = (from, to) else {
        return Some(value);
    };
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() || from.eq_ignore_ascii_case(to) {
        return Some(value);
    }
    let (Some(a), Some(b)) = (LengthUnit::parse(from), LengthUnit::parse(to)) else {
        return None;
    };
    Some(a.convert(value, b))
}

/// How plan-space lengths turn into displayed distances.
///
/// Plan length divided by `pixels_per_unit` gives a distance in
/// `calibration_unit`, which is then converted into `display_unit`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measure<'a> {
    pub pixels_per_unit: Option<f64>,
    pub calibration_unit: Option<&'a str>,
    pub display_unit: Option<&'a str>,
}

impl<'a> Measure<'a> {
    pub fn new(pixels_per_unit: f64, calibration_unit: &'a str, display_unit: &'a str) -> Self {
        Self {
            pixels_per_unit: Some(pixels_per_unit),
            calibration_unit: Some(calibration_unit),
            display_unit: Some(display_unit),
        }
    }

    /// Whether a usable scale is present.
    pub fn is_calibrated(&self) -> bool {
        self.pixels_per_unit
            .is_some_and(|ppu| ppu.is_finite() && ppu > 0.0)
    }

    /// Display distance for a plan-space length; `None` without a usable
    /// scale or for an unsupported unit pair.
    pub fn to_display(&self, plan_length: f64) -> Option<f64> {
        let ppu = self.pixels_per_unit.filter(|_| self.is_calibrated())?;
        convert_distance(plan_length / ppu, self.calibration_unit, self.display_unit)
    }
}
