//! Map layout geometry: hole corridors and boundary-section labels.
//!
//! A corridor is the rectangle between a hole's tee and green. The map draws
//! it as the hole's outline and the editor uses it as the tap target for
//! "select this hole", so [`CorridorIndex`] keeps corridors in an R-tree for
//! point queries.
//!
//! Boundary-section labels start at each section's centroid and are nudged
//! away from hole midpoints and earlier labels. Placement is best effort: after
//! [`LabelConfig::max_passes`] nudges a label stays where it is even if it still
//! overlaps something.

use rstar::{RTree, RTreeObject, AABB};

use crate::geo_utils::{midpoint, point_in_polygon, polygon_centroid, squared_degree_distance};
use crate::overrides::BoundarySection;
use crate::{Coordinate, TeeGreen};

/// Configuration for section label placement. All distances are in degrees.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Labels closer than this to a hole midpoint or another label get nudged.
    /// Default: 0.0008 (~90m)
    pub min_separation_deg: f64,
    /// Distance moved per nudge. Default: 0.0002 (~22m)
    pub step_deg: f64,
    /// Maximum nudges per label. Default: 8
    pub max_passes: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_separation_deg: 0.0008,
            step_deg: 0.0002,
            max_passes: 8,
        }
    }
}

// ============================================================================
// Corridors
// ============================================================================

/// Build the corridor rectangle between tee and green.
///
/// Corners are returned in ring order: tee left, green left, green right,
/// tee right. When tee and green coincide the axis length is taken as 1 to
/// avoid dividing by zero; the corridor collapses onto the tee but every
/// coordinate stays finite.
///
/// # Example
///
/// ```rust
/// use course_geometry::Coordinate;
/// use course_geometry::layout::corridor_polygon;
///
/// let tee = Coordinate::new(10.0, 20.0);
/// let corridor = corridor_polygon(&tee, &tee, 0.0003);
/// assert!(corridor.iter().all(|c| c.is_finite()));
/// ```
pub fn corridor_polygon(tee: &Coordinate, green: &Coordinate, half_width_deg: f64) -> [Coordinate; 4] {
    let d_lat = green.latitude - tee.latitude;
    let d_lng = green.longitude - tee.longitude;

    let mut len = (d_lat * d_lat + d_lng * d_lng).sqrt();
    if !(len.is_finite() && len > 0.0) {
        len = 1.0;
    }

    // Unit perpendicular to the tee->green axis, scaled to the half width
    let off_lat = d_lng / len * half_width_deg;
    let off_lng = -d_lat / len * half_width_deg;

    let shift = |c: &Coordinate, sign: f64| {
        Coordinate::new(c.latitude + sign * off_lat, c.longitude + sign * off_lng)
    };

    [shift(tee, 1.0), shift(green, 1.0), shift(green, -1.0), shift(tee, -1.0)]
}

/// One hole's corridor, indexable by envelope.
#[derive(Debug, Clone)]
pub struct HoleCorridor {
    pub hole: u32,
    pub ring: [Coordinate; 4],
    /// Tee/green midpoint, used to break ties between overlapping corridors
    pub center: Coordinate,
}

impl HoleCorridor {
    pub fn new(hole: u32, tee_green: &TeeGreen, half_width_deg: f64) -> Self {
        Self {
            hole,
            ring: corridor_polygon(&tee_green.tee, &tee_green.green, half_width_deg),
            center: midpoint(&tee_green.tee, &tee_green.green),
        }
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        point_in_polygon(point, &self.ring)
    }
}

impl RTreeObject for HoleCorridor {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let mut min = [f64::MAX, f64::MAX];
        let mut max = [f64::MIN, f64::MIN];
        for c in &self.ring {
            min[0] = min[0].min(c.longitude);
            min[1] = min[1].min(c.latitude);
            max[0] = max[0].max(c.longitude);
            max[1] = max[1].max(c.latitude);
        }
        AABB::from_corners(min, max)
    }
}

/// Spatial index over a course's hole corridors.
pub struct CorridorIndex {
    tree: RTree<HoleCorridor>,
}

impl CorridorIndex {
    /// Index the corridors. Corridors with a non-finite corner are skipped.
    pub fn new(corridors: Vec<HoleCorridor>) -> Self {
        let corridors: Vec<HoleCorridor> = corridors
            .into_iter()
            .filter(|c| c.ring.iter().all(Coordinate::is_finite))
            .collect();
        Self { tree: RTree::bulk_load(corridors) }
    }

    /// Hole whose corridor contains the point. Where corridors overlap (dogleg
    /// pairs, parallel fairways) the one with the nearest midpoint wins.
    pub fn hole_at(&self, point: &Coordinate) -> Option<u32> {
        if !point.is_finite() {
            return None;
        }
        let probe = AABB::from_point([point.longitude, point.latitude]);
        self.tree
            .locate_in_envelope_intersecting(&probe)
            .filter(|c| c.contains(point))
            .min_by(|a, b| {
                squared_degree_distance(point, &a.center)
                    .total_cmp(&squared_degree_distance(point, &b.center))
            })
            .map(|c| c.hole)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

// ============================================================================
// Section Labels
// ============================================================================

/// Place one label per boundary section, in section order.
///
/// Each label starts at its section's vertex centroid. While the nearest hole
/// midpoint or already-placed label is within `min_separation_deg`, the label
/// moves `step_deg` directly away from it, up to `max_passes` times.
pub fn section_label_positions(
    sections: &[BoundarySection],
    holes: &[TeeGreen],
    config: &LabelConfig,
) -> Vec<Coordinate> {
    let hole_midpoints: Vec<Coordinate> = holes.iter().map(|h| midpoint(&h.tee, &h.green)).collect();
    let min_sq = config.min_separation_deg * config.min_separation_deg;
    let mut placed: Vec<Coordinate> = Vec::with_capacity(sections.len());

    for section in sections {
        let mut pos = polygon_centroid(&section.points);

        for _ in 0..config.max_passes {
            let nearest = hole_midpoints
                .iter()
                .chain(placed.iter())
                .map(|c| (*c, squared_degree_distance(&pos, c)))
                .filter(|(_, d2)| *d2 < min_sq)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            let Some((conflict, d2)) = nearest else {
                break;
            };

            // Coincident points have no direction to move away along; go north.
            let (dir_lat, dir_lng) = if d2 > 0.0 {
                let d = d2.sqrt();
                (
                    (pos.latitude - conflict.latitude) / d,
                    (pos.longitude - conflict.longitude) / d,
                )
            } else {
                (1.0, 0.0)
            };

            pos = Coordinate::new(
                pos.latitude + dir_lat * config.step_deg,
                pos.longitude + dir_lng * config.step_deg,
            );
        }

        placed.push(pos);
    }

    placed
}
