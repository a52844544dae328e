//! Batch route evaluation and route search over a precomputed project.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};
use pickpath_core::Vec2;

use crate::error::{Error, Result};
use crate::project::Project;
use crate::query::PathOutcome;

/// One route to evaluate, e.g. a picklist from an aisle to a staging lane.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRecord {
    pub id: String,
    pub start: String,
    pub end: String,
}

impl RouteRecord {
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteStatus {
    Success,
    /// The start or end name is blank.
    MissingLocation,
    /// No pick aisle has the start name.
    MissingStart,
    /// No staging location has the end name.
    MissingEnd,
    /// The start exists but has no tree (e.g. it sits in an obstacle).
    NotPrecomputed,
    Unreachable,
    /// A path exists but the scale or unit pair gives no distance.
    DistanceUnavailable,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::MissingLocation => "missing location",
            Self::MissingStart => "missing start",
            Self::MissingEnd => "missing end",
            Self::NotPrecomputed => "not precomputed",
            Self::Unreachable => "unreachable",
            Self::DistanceUnavailable => "distance unavailable",
        })
    }
}

/// Evaluation of one [`RouteRecord`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    pub record: RouteRecord,
    pub status: RouteStatus,
    /// Distance in the display unit, for [`RouteStatus::Success`] only.
    pub distance: Option<f64>,
}

/// Results of [`analyze_routes`] with summary counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub results: Vec<RouteResult>,
    pub missing_starts: BTreeSet<String>,
    pub missing_ends: BTreeSet<String>,
    pub unreachable: usize,
    /// Records whose status is not a success, unreachable ones included.
    pub with_issues: usize,
    pub display_unit: String,
}

impl AnalysisReport {
    /// Sum of the successful distances.
    pub fn total_distance(&self) -> f64 {
        self.results.iter().filter_map(|r| r.distance).sum()
    }

    /// Human-readable summary lines.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("Routes processed: {}", self.results.len())];
        if !self.missing_starts.is_empty() {
            let names: Vec<&str> = self.missing_starts.iter().map(String::as_str).collect();
            lines.push(format!("Missing starts: {}", names.join(",")));
        }
        if !self.missing_ends.is_empty() {
            let names: Vec<&str> = self.missing_ends.iter().map(String::as_str).collect();
            lines.push(format!("Missing ends: {}", names.join(",")));
        }
        if self.unreachable > 0 {
            lines.push(format!("Unreachable routes: {}", self.unreachable));
        }
        if self.with_issues > 0 {
            lines.push(format!(
                "Routes with issues (incl. unreachable): {}",
                self.with_issues
            ));
        }
        lines
    }
}

/// Evaluate every record against the project's precomputed trees.
///
/// Fails only when nothing is precomputed; per-record problems are
/// reported through [`RouteStatus`].
pub fn analyze_routes(project: &Project, records: &[RouteRecord]) -> Result<AnalysisReport> {
    let paths = project.paths().ok_or(Error::PathDataNotReady)?;
    let layout = project.layout();
    info!("analyzing {} routes", records.len());

    let mut report = AnalysisReport {
        display_unit: layout.display_unit.clone(),
        ..AnalysisReport::default()
    };
    for record in records {
        let (start, end) = (record.start.trim(), record.end.trim());
        let mut distance = None;
        let status = if start.is_empty() || end.is_empty() {
            RouteStatus::MissingLocation
        } else if !layout.pick_aisles.contains(start) {
            report.missing_starts.insert(start.to_string());
            RouteStatus::MissingStart
        } else if !layout.staging_locations.contains(end) {
            report.missing_ends.insert(end.to_string());
            RouteStatus::MissingEnd
        } else if !paths.has_tree(start) {
            RouteStatus::NotPrecomputed
        } else {
            match project.shortest_path(start, end) {
                PathOutcome::Found(found) => match found.distance {
                    Some(d) => {
                        distance = Some(d);
                        RouteStatus::Success
                    }
                    None => RouteStatus::DistanceUnavailable,
                },
                PathOutcome::NotReady => RouteStatus::NotPrecomputed,
                PathOutcome::UnknownPoint(_) => RouteStatus::MissingLocation,
                PathOutcome::Unreachable => {
                    report.unreachable += 1;
                    RouteStatus::Unreachable
                }
            }
        };
        if status != RouteStatus::Success {
            debug!("route {}: {status}", record.id);
            report.with_issues += 1;
        }
        report.results.push(RouteResult {
            record: record.clone(),
            status,
            distance,
        });
    }
    Ok(report)
}

/// Which slice of the routes, ordered by distance, to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthFilter {
    #[default]
    Any,
    /// The shortest quarter (at least one route).
    Shortest,
    /// The middle half.
    Medium,
    /// The longest quarter (at least one route).
    Longest,
}

/// A found route between a pick aisle and a staging location.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub end: String,
    pub points: Vec<Vec2>,
    pub distance: f64,
}

/// Routes from `start` (or every pick aisle) to `end` (or every staging
/// location) that have a distance, narrowed by `filter`.
///
/// Unfiltered results come in layout order; filtered ones in ascending
/// distance.
pub fn filter_paths(
    project: &Project,
    start: Option<&str>,
    end: Option<&str>,
    filter: LengthFilter,
) -> Vec<RouteSummary> {
    if !project.is_path_data_valid() {
        return Vec::new();
    }
    let layout = project.layout();
    let mut routes = Vec::new();
    for s in layout.pick_aisles.names().filter(|n| start.is_none_or(|s| s == *n)) {
        for e in layout
            .staging_locations
            .names()
            .filter(|n| end.is_none_or(|e| e == *n))
        {
            let (Some(points), Some(distance)) = project.shortest_path(s, e).into_parts() else {
                continue;
            };
            routes.push(RouteSummary {
                start: s.to_string(),
                end: e.to_string(),
                points,
                distance,
            });
        }
    }

    if filter == LengthFilter::Any || routes.is_empty() {
        return routes;
    }
    routes.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let n = routes.len();
    let quarter = (n / 4).max(1);
    match filter {
        LengthFilter::Any => routes,
        LengthFilter::Shortest => routes.into_iter().take(quarter).collect(),
        LengthFilter::Medium => routes.into_iter().skip(n / 4).take(n / 2).collect(),
        LengthFilter::Longest => routes.into_iter().skip(n - quarter).collect(),
    }
}
