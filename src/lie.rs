//! Lie classification.
//!
//! Decides what a ball is sitting on from a hole's mapped features. Features are
//! mostly circles, which overlap freely in the source data (a greenside bunker
//! circle usually clips the fairway circle in front of it), so the lie is decided
//! by a fixed precedence rather than by which shape is "closest":
//!
//! 1. water
//! 2. this hole's green, or any other hole's green (shared greens)
//! 3. bunker
//! 4. hand-drawn fairway polygon
//! 5. fairway circle
//! 6. rough

use std::fmt;

use crate::geo_utils::{is_in_circle, point_in_polygon};
use crate::{Coordinate, FeatureKind, Hole, Meters, Yards};

/// Terrain under the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Lie {
    Green,
    Water,
    Bunker,
    Fairway,
    Rough,
}

impl Lie {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lie::Green => "green",
            Lie::Water => "water",
            Lie::Bunker => "bunker",
            Lie::Fairway => "fairway",
            Lie::Rough => "rough",
        }
    }
}

impl fmt::Display for Lie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radii used for features mapped without one.
#[derive(Debug, Clone)]
pub struct FeatureDefaults {
    /// Default: 15 yards
    pub green_radius: Yards,
    /// Default: 10 yards
    pub bunker_radius: Yards,
    /// Default: 20 yards
    pub water_radius: Yards,
    /// Default: 25 yards
    pub fairway_radius: Yards,
    /// Default: 5 meters
    pub tree_radius: Meters,
    /// Default: 10 meters
    pub tree_height: Meters,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            green_radius: Yards(15.0),
            bunker_radius: Yards(10.0),
            water_radius: Yards(20.0),
            fairway_radius: Yards(25.0),
            tree_radius: Meters(5.0),
            tree_height: Meters(10.0),
        }
    }
}

/// A circular feature with its radius already in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFeature {
    pub center: Coordinate,
    pub radius: Meters,
}

impl CircleFeature {
    pub fn new(center: Coordinate, radius: Meters) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn contains(&self, point: &Coordinate) -> bool {
        is_in_circle(point, &self.center, self.radius)
    }
}

/// A tree or tree cluster that can block a shot.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeObstacle {
    pub position: Coordinate,
    pub radius: Meters,
    pub height: Meters,
    /// Canopy outline, when mapped as a polygon
    pub vertices: Option<Vec<Coordinate>>,
}

impl TreeObstacle {
    /// Whether a point is under the canopy.
    ///
    /// Uses the outline when one with at least three vertices exists, the radius
    /// circle otherwise.
    pub fn contains(&self, point: &Coordinate) -> bool {
        match &self.vertices {
            Some(ring) if ring.len() >= 3 => point_in_polygon(point, ring),
            _ => is_in_circle(point, &self.position, self.radius),
        }
    }
}

/// Read-only view of one hole's features, in meters, ready for classification
/// and shot simulation. Built on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoleFeatures {
    pub green: Option<CircleFeature>,
    /// Greens of the course's other holes
    pub other_greens: Vec<CircleFeature>,
    pub water: Vec<CircleFeature>,
    pub bunkers: Vec<CircleFeature>,
    pub fairways: Vec<CircleFeature>,
    /// Editor-drawn fairway outlines; outrank fairway circles
    pub fairway_polygons: Vec<Vec<Coordinate>>,
    pub trees: Vec<TreeObstacle>,
}

impl HoleFeatures {
    /// Convert a hole's raw features, normalizing every radius to meters.
    ///
    /// When no green feature is mapped the hole's green position gets a circle
    /// of the default radius, so every hole has a putting surface.
    pub fn from_hole(hole: &Hole, defaults: &FeatureDefaults) -> Self {
        let circles = |kind: FeatureKind, fallback: Yards| -> Vec<CircleFeature> {
            hole.features_of(kind)
                .map(|f| CircleFeature::new(f.position, f.radius.unwrap_or(fallback).to_meters()))
                .collect()
        };

        let green = circles(FeatureKind::Green, defaults.green_radius)
            .into_iter()
            .next()
            .unwrap_or_else(|| CircleFeature::new(hole.green, defaults.green_radius.to_meters()));

        let trees = hole
            .features_of(FeatureKind::Tree)
            .map(|f| TreeObstacle {
                position: f.position,
                radius: f.radius.map(Yards::to_meters).unwrap_or(defaults.tree_radius),
                height: f.height.unwrap_or(defaults.tree_height),
                vertices: f.outline.clone(),
            })
            .collect();

        Self {
            green: Some(green),
            other_greens: Vec::new(),
            water: circles(FeatureKind::Water, defaults.water_radius),
            bunkers: circles(FeatureKind::Bunker, defaults.bunker_radius),
            fairways: circles(FeatureKind::Fairway, defaults.fairway_radius),
            fairway_polygons: Vec::new(),
            trees,
        }
    }
}

/// Classify the lie at `position`. First match in precedence order wins.
///
/// # Example
///
/// ```rust
/// use course_geometry::{Coordinate, Meters};
/// use course_geometry::lie::{classify_lie, CircleFeature, HoleFeatures, Lie};
///
/// let spot = Coordinate::new(10.0, 20.0);
/// let features = HoleFeatures {
///     water: vec![CircleFeature::new(spot, Meters(15.0))],
///     fairways: vec![CircleFeature::new(spot, Meters(40.0))],
///     ..HoleFeatures::default()
/// };
///
/// assert_eq!(classify_lie(&spot, &features), Lie::Water);
/// ```
pub fn classify_lie(position: &Coordinate, features: &HoleFeatures) -> Lie {
    if features.water.iter().any(|w| w.contains(position)) {
        return Lie::Water;
    }

    let on_green = features.green.iter().any(|g| g.contains(position))
        || features.other_greens.iter().any(|g| g.contains(position));
    if on_green {
        return Lie::Green;
    }

    if features.bunkers.iter().any(|b| b.contains(position)) {
        return Lie::Bunker;
    }

    if features
        .fairway_polygons
        .iter()
        .any(|ring| point_in_polygon(position, ring))
    {
        return Lie::Fairway;
    }

    if features.fairways.iter().any(|f| f.contains(position)) {
        return Lie::Fairway;
    }

    Lie::Rough
}
