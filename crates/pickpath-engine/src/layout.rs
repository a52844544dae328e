//! The floor-plan layout a project works on.

use pickpath_core::{Polygon, Rect, Vec2};

use crate::units::Measure;

/// Named positions in insertion order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NamedPoints {
    entries: Vec<(String, Vec2)>,
}

impl NamedPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<Vec2> {
        self.position(name).map(|i| self.entries[i].1)
    }

    /// Add a new point. Returns `false`, leaving the map untouched, if the
    /// name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, pos: Vec2) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, pos));
        true
    }

    /// Move an existing point. Returns `false` if there is no such name or
    /// it is already at `pos`.
    pub fn set(&mut self, name: &str, pos: Vec2) -> bool {
        match self.position(name) {
            Some(i) if self.entries[i].1 != pos => {
                self.entries[i].1 = pos;
                true
            }
            _ => false,
        }
    }

    /// Remove a point, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Vec2> {
        let i = self.position(name)?;
        Some(self.entries.remove(i).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec2)> + '_ {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.entries.iter().map(|(_, p)| *p)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec2)> for NamedPoints {
    /// Later duplicates of a name are dropped.
    fn from_iter<T: IntoIterator<Item = (S, Vec2)>>(iter: T) -> Self {
        let mut points = Self::new();
        for (name, pos) in iter {
            points.insert(name, pos);
        }
        points
    }
}

/// Calibration: how many plan units make one real-world unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    pub pixels_per_unit: f64,
    pub unit: String,
}

impl Scale {
    pub fn new(pixels_per_unit: f64, unit: impl Into<String>) -> Self {
        Self {
            pixels_per_unit,
            unit: unit.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0
    }
}

/// Default unit distances are reported in.
pub const DEFAULT_DISPLAY_UNIT: &str = "meters";

/// Everything drawn on the floor plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Extent of the floor plan in plan units.
    pub floor_plan: Option<Rect>,
    pub obstacles: Vec<Polygon>,
    pub staging_areas: Vec<Polygon>,
    /// Optional region to restrict pathfinding to.
    pub pathfinding_bounds: Option<Polygon>,
    /// Path sources.
    pub pick_aisles: NamedPoints,
    /// Path destinations.
    pub staging_locations: NamedPoints,
    pub scale: Option<Scale>,
    pub display_unit: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            floor_plan: None,
            obstacles: Vec::new(),
            staging_areas: Vec::new(),
            pathfinding_bounds: None,
            pick_aisles: NamedPoints::new(),
            staging_locations: NamedPoints::new(),
            scale: None,
            display_unit: DEFAULT_DISPLAY_UNIT.to_string(),
        }
    }
}

impl Layout {
    /// Empty layout over a floor plan of the given extent.
    pub fn new(floor_plan: Rect) -> Self {
        Self {
            floor_plan: Some(floor_plan),
            ..Self::default()
        }
    }

    /// Positions of every named point, pick aisles first.
    pub fn all_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.pick_aisles
            .positions()
            .chain(self.staging_locations.positions())
    }

    /// Conversion of plan lengths into display distances.
    pub fn measure(&self) -> Measure<'_> {
        Measure {
            pixels_per_unit: self.scale.as_ref().map(|s| s.pixels_per_unit),
            calibration_unit: self.scale.as_ref().map(|s| s.unit.as_str()),
            display_unit: Some(self.display_unit.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_points_keep_order_and_uniqueness() {
        let mut pts = NamedPoints::new();
        assert!(pts.insert("B", Vec2::new(1.0, 1.0)));
        assert!(pts.insert("A", Vec2::new(2.0, 2.0)));
        assert!(!pts.insert("B", Vec2::new(9.0, 9.0)));
        assert_eq!(pts.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(pts.get("B"), Some(Vec2::new(1.0, 1.0)));

        assert!(pts.set("A", Vec2::new(3.0, 3.0)));
        assert!(!pts.set("A", Vec2::new(3.0, 3.0)));
        assert!(!pts.set("C", Vec2::ZERO));

        assert_eq!(pts.remove("B"), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(pts.remove("B"), None);
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn collect_drops_duplicate_names() {
        let pts: NamedPoints = [("x", Vec2::ZERO), ("y", Vec2::ZERO), ("x", Vec2::new(1.0, 0.0))]
            .into_iter()
            .collect();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts.get("x"), Some(Vec2::ZERO));
    }

    #[test]
    fn measure_follows_scale() {
        let mut layout = Layout::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(layout.measure().to_display(10.0), None);
        layout.scale = Some(Scale::new(5.0, "feet"));
        layout.display_unit = "feet".into();
        assert_eq!(layout.measure().to_display(10.0), Some(2.0));
        assert!(!Scale::new(0.0, "m").is_valid());
    }
}
