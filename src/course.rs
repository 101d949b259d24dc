//! Course data model.
//!
//! A [`Venue`] hosts one or more [`Course`]s, each an ordered list of [`Hole`]s.
//! Every hole carries at least one [`TeeMarker`]; courses mapped with a single tee
//! use one marker named [`DEFAULT_TEE_NAME`], courses with colored tee boxes carry
//! one marker per [`TeeSet`] of the same name. Resolution never branches on which
//! course it is looking at.

use crate::{Coordinate, Meters, Yards};

/// Marker name used when a hole only has one tee position.
pub const DEFAULT_TEE_NAME: &str = "default";

/// A physical club hosting one or more courses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Venue {
    pub name: String,
    pub location: String,
    pub courses: Vec<Course>,
}

/// A playable course. The name is unique across the catalog and is its key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub name: String,
    pub location: String,
    pub holes: Vec<Hole>,
    #[cfg_attr(feature = "json", serde(default))]
    pub tee_sets: Vec<TeeSet>,
    /// Whether every hole has been mapped with real tee/green positions.
    #[cfg_attr(feature = "json", serde(default))]
    pub mvp_complete: bool,
}

impl Course {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            holes: Vec::new(),
            tee_sets: Vec::new(),
            mvp_complete: false,
        }
    }

    pub fn with_hole(mut self, hole: Hole) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn with_tee_set(mut self, tee_set: TeeSet) -> Self {
        self.tee_sets.push(tee_set);
        self
    }

    /// Find a hole by its number (not its index).
    pub fn hole(&self, number: u32) -> Option<&Hole> {
        self.holes.iter().find(|h| h.number == number)
    }

    pub fn tee_set(&self, name: &str) -> Option<&TeeSet> {
        self.tee_sets.iter().find(|t| t.name == name)
    }
}

/// A single hole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Hole {
    /// 1-based hole number
    pub number: u32,
    pub par: u32,
    /// Handicap ranking, 1 = hardest. Not validated here, see
    /// [`crate::catalog::validate_stroke_indices`].
    #[cfg_attr(feature = "json", serde(default))]
    pub stroke_index: Option<u32>,
    /// Tee positions, first one is the default.
    pub tees: Vec<TeeMarker>,
    pub green: Coordinate,
    /// Scorecard yardage when no per-marker yardage is known
    #[cfg_attr(feature = "json", serde(default))]
    pub yardage: Option<Yards>,
    #[cfg_attr(feature = "json", serde(default))]
    pub features: Vec<Feature>,
}

impl Hole {
    /// Create a hole with a single default tee marker.
    pub fn new(number: u32, par: u32, tee: Coordinate, green: Coordinate) -> Self {
        Self {
            number,
            par,
            stroke_index: None,
            tees: vec![TeeMarker::new(DEFAULT_TEE_NAME, tee)],
            green,
            yardage: None,
            features: Vec::new(),
        }
    }

    pub fn with_stroke_index(mut self, stroke_index: u32) -> Self {
        self.stroke_index = Some(stroke_index);
        self
    }

    pub fn with_yardage(mut self, yardage: Yards) -> Self {
        self.yardage = Some(yardage);
        self
    }

    /// Replace the tee markers. An empty list leaves the hole unresolvable.
    pub fn with_tees(mut self, tees: Vec<TeeMarker>) -> Self {
        self.tees = tees;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Pick a tee marker: the named one, else the first.
    pub fn tee_marker(&self, tee_set: Option<&str>) -> Option<&TeeMarker> {
        tee_set
            .and_then(|name| self.tees.iter().find(|t| t.name == name))
            .or_else(|| self.tees.first())
    }

    pub fn features_of(&self, kind: FeatureKind) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.kind == kind)
    }
}

/// A named tee box position on one hole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct TeeMarker {
    pub name: String,
    pub position: Coordinate,
    #[cfg_attr(feature = "json", serde(default))]
    pub yardage: Option<Yards>,
}

impl TeeMarker {
    pub fn new(name: impl Into<String>, position: Coordinate) -> Self {
        Self { name: name.into(), position, yardage: None }
    }

    pub fn with_yardage(mut self, yardage: Yards) -> Self {
        self.yardage = Some(yardage);
        self
    }
}

/// Scorecard summary for one set of tees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct TeeSet {
    pub name: String,
    pub total_yardage: Yards,
    pub course_rating: f64,
    pub slope_rating: u32,
}

/// Kind of a mapped hole feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum FeatureKind {
    Tee,
    Fairway,
    Green,
    Bunker,
    Water,
    Rough,
    Tree,
}

/// A hazard or landmark on a hole.
///
/// Radii come from scorecard-style mapping data and are stored in yards. Tree
/// heights are in meters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    pub kind: FeatureKind,
    pub position: Coordinate,
    #[cfg_attr(feature = "json", serde(default))]
    pub radius: Option<Yards>,
    #[cfg_attr(feature = "json", serde(default))]
    pub height: Option<Meters>,
    /// Canopy outline for tree clusters
    #[cfg_attr(feature = "json", serde(default))]
    pub outline: Option<Vec<Coordinate>>,
}

impl Feature {
    pub fn new(kind: FeatureKind, position: Coordinate) -> Self {
        Self { kind, position, radius: None, height: None, outline: None }
    }

    pub fn with_radius(mut self, radius: Yards) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_height(mut self, height: Meters) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_outline(mut self, outline: Vec<Coordinate>) -> Self {
        self.outline = Some(outline);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tee_hole() -> Hole {
        Hole::new(1, 4, Coordinate::new(10.0, 20.0), Coordinate::new(10.003, 20.0)).with_tees(vec![
            TeeMarker::new("Blue", Coordinate::new(10.0, 20.0)).with_yardage(Yards(365.0)),
            TeeMarker::new("White", Coordinate::new(10.0003, 20.0)).with_yardage(Yards(340.0)),
            TeeMarker::new("Red", Coordinate::new(10.0007, 20.0)),
        ])
    }

    #[test]
    fn test_new_hole_has_default_marker() {
        let hole = Hole::new(3, 3, Coordinate::new(1.0, 2.0), Coordinate::new(1.001, 2.0));
        assert_eq!(hole.tees.len(), 1);
        assert_eq!(hole.tees[0].name, DEFAULT_TEE_NAME);
    }

    #[test]
    fn test_tee_marker_by_name() {
        let hole = three_tee_hole();
        assert_eq!(hole.tee_marker(Some("White")).unwrap().name, "White");
        assert_eq!(hole.tee_marker(Some("Gold")).unwrap().name, "Blue");
        assert_eq!(hole.tee_marker(None).unwrap().name, "Blue");
    }

    #[test]
    fn test_tee_marker_empty() {
        let hole = three_tee_hole().with_tees(vec![]);
        assert!(hole.tee_marker(Some("Blue")).is_none());
    }

    #[test]
    fn test_course_hole_by_number() {
        let course = Course::new("X", "Somewhere")
            .with_hole(Hole::new(2, 5, Coordinate::new(0.0, 0.0), Coordinate::new(0.004, 0.0)))
            .with_hole(Hole::new(1, 4, Coordinate::new(0.0, 0.0), Coordinate::new(0.003, 0.0)));
        assert_eq!(course.hole(1).unwrap().par, 4);
        assert_eq!(course.hole(2).unwrap().par, 5);
        assert!(course.hole(3).is_none());
    }

    #[test]
    fn test_features_of() {
        let hole = three_tee_hole()
            .with_feature(Feature::new(FeatureKind::Bunker, Coordinate::new(10.002, 20.0)))
            .with_feature(Feature::new(FeatureKind::Water, Coordinate::new(10.001, 20.0)))
            .with_feature(Feature::new(FeatureKind::Bunker, Coordinate::new(10.0025, 20.0)));
        assert_eq!(hole.features_of(FeatureKind::Bunker).count(), 2);
        assert_eq!(hole.features_of(FeatureKind::Tree).count(), 0);
    }
}
