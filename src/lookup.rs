//! Course lookup service.
//!
//! [`CourseService`] is the single entry point for map, scorecard, editor and
//! shot-simulation code. Every course goes through the same resolution path:
//!
//! 1. an editor override for `(course, hole)`, if the store has one
//! 2. the tee marker named by the requested tee set
//! 3. the hole's first tee marker
//!
//! Unknown courses and holes resolve to `None`; nothing here panics or errors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::catalog::{CourseCatalog, IntegrityIssue, IntegrityReport};
use crate::geo_utils::{compute_bounds, haversine_distance};
use crate::layout::{self, CorridorIndex, HoleCorridor, LabelConfig};
use crate::lie::{self, CircleFeature, FeatureDefaults, HoleFeatures, Lie, TreeObstacle};
use crate::overrides::{BoundarySection, InMemoryOverrideStore, OverrideStore};
use crate::scoring;
use crate::{Bounds, Coordinate, Course, FeatureKind, Hole, Meters, TeeGreen, TeeSet};

/// Configuration for the lookup service.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Half width of hole corridors in degrees. Default: 0.0003 (~33m)
    pub corridor_half_width_deg: f64,
    /// Section label placement
    pub labels: LabelConfig,
    /// Radii for features mapped without one
    pub features: FeatureDefaults,
    /// Box returned by [`CourseService::bounds_or_default`] when a course has
    /// nothing to show. Default: the whole Web Mercator world.
    pub fallback_bounds: Bounds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corridor_half_width_deg: 0.0003,
            labels: LabelConfig::default(),
            features: FeatureDefaults::default(),
            fallback_bounds: Bounds {
                north: 85.0,
                south: -85.0,
                east: 180.0,
                west: -180.0,
            },
        }
    }
}

/// Where a hole's displayed yardage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum YardageSource {
    /// Printed scorecard value for the tee marker or hole
    Scorecard,
    /// Straight-line tee to green distance
    Measured,
}

/// Scorecard metadata for one hole.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HoleInfo {
    pub number: u32,
    pub par: u32,
    /// Whole yards. `None` only when the hole has neither a scorecard
    /// yardage nor a resolvable tee and green.
    pub yardage: Option<u32>,
    pub yardage_source: Option<YardageSource>,
    pub stroke_index: Option<u32>,
}

/// Resolved positions for one hole, as drawn on the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct HoleSummary {
    pub number: u32,
    pub tee: Coordinate,
    pub green: Coordinate,
    /// Whether an editor override moved the tee or green
    pub customized: bool,
}

/// Scorecard totals for a course played from one tee set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct CourseTotals {
    pub holes: u32,
    pub par: u32,
    /// Sum of per-hole yardages (scorecard or measured)
    pub yardage: u32,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<u32>,
}

/// Course resolution over a static catalog and an override store.
pub struct CourseService<S: OverrideStore = InMemoryOverrideStore> {
    catalog: Arc<CourseCatalog>,
    store: S,
    config: EngineConfig,
    /// Memoized bounds per course; cleared for a course on override writes
    bounds_cache: Mutex<HashMap<String, Option<Bounds>>>,
}

impl<S: OverrideStore> CourseService<S> {
    /// Create the service and run the startup integrity check.
    ///
    /// Integrity problems are logged, never fatal: other courses keep working.
    pub fn new(catalog: Arc<CourseCatalog>, store: S, config: EngineConfig) -> Self {
        let service = Self {
            catalog,
            store,
            config,
            bounds_cache: Mutex::new(HashMap::new()),
        };

        let report = service.verify_integrity();
        for issue in &report.issues {
            warn!("[CourseService] Data integrity: {}", issue);
        }
        info!(
            "[CourseService] Ready with {} courses ({} integrity issues)",
            report.courses_checked,
            report.issues.len()
        );

        service
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Give back the override store, e.g. to persist it.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Check the catalog. Hole 1 counts as resolvable if an override places it
    /// and the catalog has a hole 1 for the override to apply to.
    pub fn verify_integrity(&self) -> IntegrityReport {
        let mut report = self.catalog.verify_integrity();
        report.issues.retain(|issue| match issue {
            IntegrityIssue::HoleOneUnresolvable { course } => {
                self.resolve_tee_green(course, 1, None).is_none()
            }
            _ => true,
        });
        report
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Number of holes on a course, 0 if the course is unknown.
    pub fn hole_count(&self, course: &str) -> u32 {
        self.catalog.course(course).map_or(0, |c| c.holes.len() as u32)
    }

    /// Resolve tee and green positions for a hole.
    ///
    /// When `tee_set` names no marker on this hole the first marker is used.
    pub fn resolve_tee_green(&self, course: &str, hole: u32, tee_set: Option<&str>) -> Option<TeeGreen> {
        let (_, h) = self.hole(course, hole)?;
        self.resolve_hole(course, h, tee_set)
    }

    fn resolve_hole(&self, course: &str, hole: &Hole, tee_set: Option<&str>) -> Option<TeeGreen> {
        if let Some(tg) = self.store.tee_green(course, hole.number) {
            return Some(tg);
        }

        let marker = hole.tee_marker(tee_set);
        if let (Some(name), Some(m)) = (tee_set, marker) {
            if m.name != name {
                debug!(
                    "[CourseService] {} hole {}: no `{}` tee, using `{}`",
                    course, hole.number, name, m.name
                );
            }
        }

        match marker {
            Some(m) => Some(TeeGreen { tee: m.position, green: hole.green }),
            None => {
                debug!("[CourseService] {} hole {} has no tee markers", course, hole.number);
                None
            }
        }
    }

    fn hole(&self, course: &str, hole: u32) -> Option<(&Course, &Hole)> {
        let c = self.catalog.course(course)?;
        match c.hole(hole) {
            Some(h) => Some((c, h)),
            None => {
                debug!("[CourseService] {} has no hole {}", course, hole);
                None
            }
        }
    }

    /// Par, yardage and stroke index for a hole.
    ///
    /// Yardage comes from the scorecard (tee marker, then hole) when recorded,
    /// otherwise it is measured between the resolved tee and green. Par and
    /// stroke index always come from static data.
    pub fn resolve_hole_info(&self, course: &str, hole: u32, tee_set: Option<&str>) -> Option<HoleInfo> {
        let (_, h) = self.hole(course, hole)?;

        let scorecard = h
            .tee_marker(tee_set)
            .and_then(|m| m.yardage)
            .or(h.yardage);

        let (yardage, yardage_source) = match scorecard {
            Some(y) => (Some(y.rounded()), Some(YardageSource::Scorecard)),
            None => match self.resolve_hole(course, h, tee_set) {
                Some(tg) => {
                    let measured = Meters(haversine_distance(&tg.tee, &tg.green)).to_yards();
                    (Some(measured.rounded()), Some(YardageSource::Measured))
                }
                None => (None, None),
            },
        };

        Some(HoleInfo {
            number: h.number,
            par: h.par,
            yardage,
            yardage_source,
            stroke_index: h.stroke_index,
        })
    }

    /// Resolved tee and green for every hole, ordered by hole number.
    /// Holes that cannot be resolved are skipped.
    pub fn holes_for_course(&self, course: &str) -> Vec<HoleSummary> {
        let Some(c) = self.catalog.course(course) else {
            return Vec::new();
        };

        let mut holes: Vec<&Hole> = c.holes.iter().collect();
        holes.sort_by_key(|h| h.number);

        holes
            .into_iter()
            .filter_map(|h| {
                let tg = self.resolve_hole(course, h, None)?;
                Some(HoleSummary {
                    number: h.number,
                    tee: tg.tee,
                    green: tg.green,
                    customized: self.store.tee_green(course, h.number).is_some(),
                })
            })
            .collect()
    }

    /// Bounding box over every hole's tees and green.
    ///
    /// All tee markers count, not only the default one. A hole with an override
    /// contributes its overridden tee and green instead. `None` if the course
    /// is unknown or has nothing resolvable.
    pub fn bounds(&self, course: &str) -> Option<Bounds> {
        if let Ok(cache) = self.bounds_cache.lock() {
            if let Some(cached) = cache.get(course) {
                return *cached;
            }
        }

        let bounds = self.compute_course_bounds(course);

        if self.catalog.contains(course) {
            if let Ok(mut cache) = self.bounds_cache.lock() {
                cache.insert(course.to_string(), bounds);
            }
        }
        bounds
    }

    fn compute_course_bounds(&self, course: &str) -> Option<Bounds> {
        let c = self.catalog.course(course)?;
        let mut points = Vec::with_capacity(c.holes.len() * 3);

        for hole in &c.holes {
            match self.store.tee_green(course, hole.number) {
                Some(tg) => {
                    points.push(tg.tee);
                    points.push(tg.green);
                }
                None if !hole.tees.is_empty() => {
                    points.extend(hole.tees.iter().map(|t| t.position));
                    points.push(hole.green);
                }
                None => {}
            }
        }

        compute_bounds(&points)
    }

    /// [`Self::bounds`], or the configured fallback box.
    pub fn bounds_or_default(&self, course: &str) -> Bounds {
        self.bounds(course).unwrap_or(self.config.fallback_bounds)
    }

    fn invalidate_bounds(&self, course: &str) {
        if let Ok(mut cache) = self.bounds_cache.lock() {
            cache.remove(course);
        }
    }

    pub fn tee_set(&self, course: &str, name: &str) -> Option<&TeeSet> {
        self.catalog.course(course)?.tee_set(name)
    }

    /// Par and yardage totals for a course from the given tee set.
    pub fn course_totals(&self, course: &str, tee_set: Option<&str>) -> Option<CourseTotals> {
        let c = self.catalog.course(course)?;
        let infos: Vec<HoleInfo> = c
            .holes
            .iter()
            .filter_map(|h| self.resolve_hole_info(course, h.number, tee_set))
            .collect();
        let set = tee_set.and_then(|name| c.tee_set(name));

        Some(CourseTotals {
            holes: infos.len() as u32,
            par: infos.iter().map(|i| i.par).sum(),
            yardage: infos.iter().filter_map(|i| i.yardage).sum(),
            course_rating: set.map(|s| s.course_rating),
            slope_rating: set.map(|s| s.slope_rating),
        })
    }

    /// Handicap strokes received on each hole, ordered by hole number.
    ///
    /// Holes without a stroke index receive none.
    pub fn stroke_allocation(&self, course: &str, course_handicap: u32) -> Vec<(u32, u32)> {
        let Some(c) = self.catalog.course(course) else {
            return Vec::new();
        };
        let hole_count = c.holes.len() as u32;

        let mut allocation: Vec<(u32, u32)> = c
            .holes
            .iter()
            .map(|h| {
                let strokes = h
                    .stroke_index
                    .map_or(0, |si| scoring::handicap_strokes(course_handicap, si, hole_count));
                (h.number, strokes)
            })
            .collect();
        allocation.sort_by_key(|(n, _)| *n);
        allocation
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Corridor rectangle for one hole.
    pub fn hole_corridor(&self, course: &str, hole: u32) -> Option<[Coordinate; 4]> {
        let tg = self.resolve_tee_green(course, hole, None)?;
        Some(layout::corridor_polygon(&tg.tee, &tg.green, self.config.corridor_half_width_deg))
    }

    /// Hole whose corridor contains the point, for tap-to-select.
    pub fn hole_at_point(&self, course: &str, point: &Coordinate) -> Option<u32> {
        let corridors: Vec<HoleCorridor> = self
            .holes_for_course(course)
            .iter()
            .map(|h| {
                HoleCorridor::new(
                    h.number,
                    &TeeGreen { tee: h.tee, green: h.green },
                    self.config.corridor_half_width_deg,
                )
            })
            .collect();
        if corridors.is_empty() {
            return None;
        }
        CorridorIndex::new(corridors).hole_at(point)
    }

    /// Label anchor for each of the course's boundary sections, in order.
    pub fn section_label_positions(&self, course: &str) -> Vec<Coordinate> {
        let sections = self.store.boundary_sections(course);
        if sections.is_empty() {
            return Vec::new();
        }
        let holes: Vec<TeeGreen> = self
            .holes_for_course(course)
            .iter()
            .map(|h| TeeGreen { tee: h.tee, green: h.green })
            .collect();
        layout::section_label_positions(&sections, &holes, &self.config.labels)
    }

    // ========================================================================
    // Editor
    // ========================================================================

    /// Move a hole's tee and green. Returns `false` for unknown courses/holes.
    pub fn set_tee_green_override(&mut self, course: &str, hole: u32, tee: Coordinate, green: Coordinate) -> bool {
        if self.hole(course, hole).is_none() {
            return false;
        }
        self.store.set_tee_green(course, hole, TeeGreen { tee, green });
        self.invalidate_bounds(course);
        debug!("[CourseService] Override set for {} hole {}", course, hole);
        true
    }

    /// Drop a hole's override so it resolves from static data again.
    pub fn clear_tee_green_override(&mut self, course: &str, hole: u32) -> Option<TeeGreen> {
        let removed = self.store.clear_tee_green(course, hole);
        if removed.is_some() {
            self.invalidate_bounds(course);
        }
        removed
    }

    pub fn tee_green_override(&self, course: &str, hole: u32) -> Option<TeeGreen> {
        self.store.tee_green(course, hole)
    }

    /// Holes the editor has customized.
    pub fn customized_holes(&self, course: &str) -> Vec<u32> {
        self.store.overridden_holes(course)
    }

    /// Add a boundary section, returning its index. `None` for unknown courses.
    pub fn add_boundary_section(&mut self, course: &str, points: Vec<Coordinate>) -> Option<usize> {
        if !self.catalog.contains(course) {
            debug!("[CourseService] Boundary for unknown course `{}` ignored", course);
            return None;
        }
        Some(self.store.add_boundary_section(course, BoundarySection::new(points)))
    }

    pub fn remove_boundary_section(&mut self, course: &str, index: usize) -> Option<BoundarySection> {
        self.store.remove_boundary_section(course, index)
    }

    pub fn course_boundary(&self, course: &str) -> Vec<BoundarySection> {
        self.store.boundary_sections(course)
    }

    /// Replace the hand-drawn fairway outlines for a hole.
    pub fn set_fairway_polygons(&mut self, course: &str, hole: u32, polygons: Vec<Vec<Coordinate>>) -> bool {
        if self.hole(course, hole).is_none() {
            return false;
        }
        self.store.set_fairway_polygons(course, hole, polygons);
        true
    }

    // ========================================================================
    // Lie & Obstacles
    // ========================================================================

    /// Features for lie classification and shot simulation.
    ///
    /// Includes editor-drawn fairway polygons and every other hole's green, so
    /// a ball on a neighbouring or shared green reads as on the green.
    pub fn hole_features(&self, course: &str, hole: u32) -> Option<HoleFeatures> {
        let (c, h) = self.hole(course, hole)?;

        let mut features = HoleFeatures::from_hole(h, &self.config.features);
        features.green = Some(self.green_circle(course, h));
        features.fairway_polygons = self.store.fairway_polygons(course, hole);
        features.other_greens = c
            .holes
            .iter()
            .filter(|other| other.number != h.number)
            .map(|other| self.green_circle(course, other))
            .collect();

        Some(features)
    }

    /// Green circle for a hole. An overridden green moves the circle; a mapped
    /// green feature supplies its radius.
    fn green_circle(&self, course: &str, hole: &Hole) -> CircleFeature {
        let defaults = &self.config.features;
        let mapped = hole.features_of(FeatureKind::Green).next();

        let radius = mapped
            .and_then(|f| f.radius)
            .unwrap_or(defaults.green_radius)
            .to_meters();
        let center = match self.store.tee_green(course, hole.number) {
            Some(tg) => tg.green,
            None => mapped.map_or(hole.green, |f| f.position),
        };

        CircleFeature::new(center, radius)
    }

    /// Lie at a position on a hole. `None` if the hole is unknown.
    pub fn classify_lie(&self, course: &str, hole: u32, position: &Coordinate) -> Option<Lie> {
        self.hole_features(course, hole)
            .map(|f| lie::classify_lie(position, &f))
    }

    /// Trees that can block shots on a hole.
    pub fn tree_obstacles(&self, course: &str, hole: u32) -> Vec<TreeObstacle> {
        self.hole_features(course, hole)
            .map(|f| f.trees)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Feature, TeeMarker, Yards};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn course_x() -> Course {
        Course::new("X", "Testville")
            .with_hole(
                Hole::new(1, 4, Coordinate::new(10.0, 20.0), Coordinate::new(10.001, 20.001))
                    .with_stroke_index(5),
            )
            .with_hole(
                Hole::new(2, 3, Coordinate::new(10.002, 20.001), Coordinate::new(10.0025, 20.002))
                    .with_stroke_index(1)
                    .with_yardage(Yards(165.0)),
            )
    }

    fn course_tees() -> Course {
        let tees = vec![
            TeeMarker::new("Blue", Coordinate::new(45.000, 7.000)).with_yardage(Yards(410.0)),
            TeeMarker::new("White", Coordinate::new(45.0004, 6.9995)).with_yardage(Yards(380.0)),
            TeeMarker::new("Red", Coordinate::new(44.9990, 7.0008)),
        ];
        Course::new("Tees", "Alps")
            .with_hole(
                Hole::new(1, 4, Coordinate::new(0.0, 0.0), Coordinate::new(45.0035, 7.0002))
                    .with_tees(tees)
                    .with_stroke_index(1),
            )
            .with_tee_set(TeeSet {
                name: "Blue".to_string(),
                total_yardage: Yards(410.0),
                course_rating: 71.2,
                slope_rating: 128,
            })
    }

    fn service() -> CourseService {
        let catalog = CourseCatalog::from_courses(vec![course_x(), course_tees()]).unwrap();
        CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default())
    }

    #[test]
    fn test_hole_count() {
        let s = service();
        assert_eq!(s.hole_count("X"), 2);
        assert_eq!(s.hole_count("Nope"), 0);
    }

    #[test]
    fn test_resolve_tee_green_unknown() {
        let s = service();
        assert!(s.resolve_tee_green("Nope", 1, None).is_none());
        assert!(s.resolve_tee_green("X", 9, None).is_none());
    }

    #[test]
    fn test_resolve_tee_green_tee_set_fallback() {
        let s = service();
        let white = s.resolve_tee_green("Tees", 1, Some("White")).unwrap();
        assert_eq!(white.tee, Coordinate::new(45.0004, 6.9995));

        let gold = s.resolve_tee_green("Tees", 1, Some("Gold")).unwrap();
        assert_eq!(gold.tee, Coordinate::new(45.000, 7.000));

        let default = s.resolve_tee_green("Tees", 1, None).unwrap();
        assert_eq!(default.tee, Coordinate::new(45.000, 7.000));
    }

    #[test]
    fn test_every_course_resolves_hole_one() {
        let s = service();
        for name in s.catalog().course_names() {
            if s.hole_count(name) > 0 {
                assert!(s.resolve_tee_green(name, 1, None).is_some(), "{}", name);
            }
        }
        assert!(s.verify_integrity().issues.iter().all(|i| !matches!(i, IntegrityIssue::HoleOneUnresolvable { .. })));
    }

    #[test]
    fn test_hole_info_measured_yardage() {
        let s = service();
        let info = s.resolve_hole_info("X", 1, None).unwrap();
        assert_eq!(info.par, 4);
        assert_eq!(info.stroke_index, Some(5));
        assert_eq!(info.yardage_source, Some(YardageSource::Measured));

        let meters = haversine_distance(&Coordinate::new(10.0, 20.0), &Coordinate::new(10.001, 20.001));
        let expected = (meters / crate::YARDS_TO_METERS).round() as u32;
        assert_eq!(info.yardage, Some(expected));
        assert!(expected > 150 && expected < 180);
    }

    #[test]
    fn test_hole_info_scorecard_yardage() {
        let s = service();
        let hole2 = s.resolve_hole_info("X", 2, None).unwrap();
        assert_eq!(hole2.yardage, Some(165));
        assert_eq!(hole2.yardage_source, Some(YardageSource::Scorecard));

        let white = s.resolve_hole_info("Tees", 1, Some("White")).unwrap();
        assert_eq!(white.yardage, Some(380));

        // Red has no printed yardage: measured from the red tee
        let red = s.resolve_hole_info("Tees", 1, Some("Red")).unwrap();
        assert_eq!(red.yardage_source, Some(YardageSource::Measured));
    }

    #[test]
    fn test_override_precedence_and_revert() {
        let mut s = service();
        let static_tg = s.resolve_tee_green("X", 1, None).unwrap();
        let t = Coordinate::new(10.00045, 20.0);
        let g = Coordinate::new(10.0012, 20.0011);

        assert!(s.set_tee_green_override("X", 1, t, g));
        assert_eq!(s.resolve_tee_green("X", 1, None), Some(TeeGreen { tee: t, green: g }));
        assert_eq!(s.resolve_tee_green("X", 1, Some("Blue")), Some(TeeGreen { tee: t, green: g }));
        assert_eq!(s.customized_holes("X"), vec![1]);

        // Par and stroke index stay static
        let info = s.resolve_hole_info("X", 1, None).unwrap();
        assert_eq!(info.par, 4);
        assert_eq!(info.stroke_index, Some(5));

        assert!(s.clear_tee_green_override("X", 1).is_some());
        assert_eq!(s.resolve_tee_green("X", 1, None), Some(static_tg));
        assert!(s.customized_holes("X").is_empty());
    }

    #[test]
    fn test_override_rejected_for_unknown_hole() {
        let mut s = service();
        let p = Coordinate::new(1.0, 1.0);
        assert!(!s.set_tee_green_override("X", 42, p, p));
        assert!(!s.set_tee_green_override("Nope", 1, p, p));
        assert!(s.tee_green_override("X", 42).is_none());
    }

    #[test]
    fn test_bounds_include_every_tee_marker() {
        let s = service();
        let b = s.bounds("Tees").unwrap();
        assert_eq!(b.north, 45.0035);
        assert_eq!(b.south, 44.9990);
        assert_eq!(b.east, 7.0008);
        assert_eq!(b.west, 6.9995);
    }

    #[test]
    fn test_bounds_unknown_and_empty() {
        let catalog = CourseCatalog::from_courses(vec![Course::new("Empty", "Nowhere")]).unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());
        assert!(s.bounds("Empty").is_none());
        assert!(s.bounds("Nope").is_none());
        assert_eq!(s.bounds_or_default("Nope"), EngineConfig::default().fallback_bounds);
    }

    #[test]
    fn test_bounds_follow_override_writes() {
        let mut s = service();
        let before = s.bounds("X").unwrap();
        assert_eq!(before.north, 10.0025);

        let far = Coordinate::new(10.01, 20.0);
        s.set_tee_green_override("X", 1, Coordinate::new(10.0, 20.0), far);
        assert_eq!(s.bounds("X").unwrap().north, 10.01);

        s.clear_tee_green_override("X", 1);
        assert_eq!(s.bounds("X").unwrap(), before);
    }

    #[test]
    fn test_holes_for_course_sorted() {
        let catalog = CourseCatalog::from_courses(vec![Course::new("Rev", "Here")
            .with_hole(Hole::new(2, 4, Coordinate::new(1.0, 1.0), Coordinate::new(1.003, 1.0)))
            .with_hole(Hole::new(1, 4, Coordinate::new(2.0, 1.0), Coordinate::new(2.003, 1.0)))])
        .unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());
        let holes = s.holes_for_course("Rev");
        assert_eq!(holes.iter().map(|h| h.number).collect::<Vec<_>>(), vec![1, 2]);
        assert!(holes.iter().all(|h| !h.customized));
        assert!(s.holes_for_course("Nope").is_empty());
    }

    #[test]
    fn test_course_totals() {
        let s = service();
        let totals = s.course_totals("X", None).unwrap();
        assert_eq!(totals.holes, 2);
        assert_eq!(totals.par, 7);
        assert!(totals.yardage > 165);
        assert!(totals.course_rating.is_none());

        let blue = s.course_totals("Tees", Some("Blue")).unwrap();
        assert_eq!(blue.yardage, 410);
        assert_eq!(blue.slope_rating, Some(128));
        assert_eq!(s.tee_set("Tees", "Blue").unwrap().course_rating, 71.2);
    }

    #[test]
    fn test_stroke_allocation() {
        let s = service();
        // Hole 1 has SI 5, hole 2 has SI 1, two-hole course
        assert_eq!(s.stroke_allocation("X", 1), vec![(1, 0), (2, 1)]);
        assert_eq!(s.stroke_allocation("X", 3), vec![(1, 1), (2, 2)]);
        assert!(s.stroke_allocation("Nope", 10).is_empty());
    }

    #[test]
    fn test_hole_at_point() {
        let s = service();
        let mid = crate::geo_utils::midpoint(&Coordinate::new(10.0, 20.0), &Coordinate::new(10.001, 20.001));
        assert_eq!(s.hole_at_point("X", &mid), Some(1));
        assert_eq!(s.hole_at_point("X", &Coordinate::new(11.0, 21.0)), None);
        assert_eq!(s.hole_at_point("Nope", &mid), None);
    }

    #[test]
    fn test_hole_corridor() {
        let s = service();
        let ring = s.hole_corridor("X", 1).unwrap();
        assert!(ring.iter().all(|c| c.is_finite()));
        assert!(s.hole_corridor("X", 3).is_none());
    }

    #[test]
    fn test_boundary_sections_and_labels() {
        let mut s = service();
        let ring = vec![
            Coordinate::new(10.01, 20.01),
            Coordinate::new(10.01, 20.02),
            Coordinate::new(10.02, 20.02),
            Coordinate::new(10.02, 20.01),
        ];
        assert_eq!(s.add_boundary_section("X", ring.clone()), Some(0));
        assert_eq!(s.add_boundary_section("Nope", ring.clone()), None);
        assert_eq!(s.course_boundary("X").len(), 1);

        let labels = s.section_label_positions("X");
        assert_eq!(labels.len(), 1);
        assert!(approx_eq(labels[0].latitude, 10.015, 1e-9));
        assert!(approx_eq(labels[0].longitude, 20.015, 1e-9));

        assert_eq!(s.remove_boundary_section("X", 0).map(|b| b.points), Some(ring));
        assert!(s.section_label_positions("X").is_empty());
    }

    #[test]
    fn test_classify_lie_through_service() {
        let mut course = course_x();
        let green = Coordinate::new(10.001, 20.001);
        let pond = Coordinate::new(10.0005, 20.0005);
        course.holes[0].features = vec![
            Feature::new(FeatureKind::Water, pond).with_radius(Yards(10.0)),
            Feature::new(FeatureKind::Fairway, pond).with_radius(Yards(40.0)),
        ];
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());

        assert_eq!(s.classify_lie("X", 1, &pond), Some(Lie::Water));
        assert_eq!(s.classify_lie("X", 1, &green), Some(Lie::Green));
        assert_eq!(s.classify_lie("X", 1, &Coordinate::new(10.0, 20.002)), Some(Lie::Rough));
        assert_eq!(s.classify_lie("X", 9, &green), None);
    }

    #[test]
    fn test_editor_fairway_polygon_used_for_lie() {
        let mut s = service();
        let spot = Coordinate::new(10.0003, 20.0003);
        assert_eq!(s.classify_lie("X", 1, &spot), Some(Lie::Rough));

        let ring = vec![
            Coordinate::new(10.0002, 20.0002),
            Coordinate::new(10.0002, 20.0004),
            Coordinate::new(10.0004, 20.0004),
            Coordinate::new(10.0004, 20.0002),
        ];
        assert!(s.set_fairway_polygons("X", 1, vec![ring]));
        assert_eq!(s.classify_lie("X", 1, &spot), Some(Lie::Fairway));
    }

    #[test]
    fn test_other_holes_greens_included() {
        let course = Course::new("Shared", "Links")
            .with_hole(Hole::new(1, 4, Coordinate::new(29.997, 30.0), Coordinate::new(30.0, 30.0)))
            .with_hole(Hole::new(2, 4, Coordinate::new(29.997, 30.002), Coordinate::new(30.0001, 30.0002)))
            .with_hole(Hole::new(3, 4, Coordinate::new(29.99, 30.0), Coordinate::new(29.993, 30.0)));
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());

        let features = s.hole_features("Shared", 1).unwrap();
        let centers: Vec<Coordinate> = features.other_greens.iter().map(|g| g.center).collect();
        assert_eq!(centers, vec![Coordinate::new(30.0001, 30.0002), Coordinate::new(29.993, 30.0)]);
    }

    #[test]
    fn test_ball_on_neighbouring_green() {
        // Hole 2's green sits ~60m from hole 1's
        let neighbour = Coordinate::new(30.00054, 30.0);
        let course = Course::new("P", "Links")
            .with_hole(Hole::new(1, 4, Coordinate::new(29.997, 30.0), Coordinate::new(30.0, 30.0)))
            .with_hole(Hole::new(2, 3, Coordinate::new(30.002, 30.001), neighbour));
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());

        let gap = haversine_distance(&Coordinate::new(30.0, 30.0), &neighbour);
        assert!(gap > 55.0 && gap < 65.0);
        assert_eq!(s.classify_lie("P", 1, &neighbour), Some(Lie::Green));
    }

    #[test]
    fn test_mapped_green_follows_override() {
        let mapped = Coordinate::new(10.003, 20.0);
        let course = Course::new("M", "Here").with_hole(
            Hole::new(1, 4, Coordinate::new(10.0, 20.0), mapped)
                .with_feature(Feature::new(FeatureKind::Green, mapped).with_radius(Yards(12.0))),
        );
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
        let mut s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());
        assert_eq!(s.classify_lie("M", 1, &mapped), Some(Lie::Green));

        let moved = Coordinate::new(10.006, 20.0);
        assert!(s.set_tee_green_override("M", 1, Coordinate::new(10.0, 20.0), moved));
        assert_eq!(s.resolve_tee_green("M", 1, None).unwrap().green, moved);
        assert_eq!(s.classify_lie("M", 1, &moved), Some(Lie::Green));
        assert_eq!(s.classify_lie("M", 1, &mapped), Some(Lie::Rough));

        let green = s.hole_features("M", 1).unwrap().green.unwrap();
        assert!(approx_eq(green.radius.0, 12.0 * crate::YARDS_TO_METERS, 1e-9));
    }

    #[test]
    fn test_green_follows_override() {
        let mut s = service();
        let moved = Coordinate::new(10.004, 20.004);
        s.set_tee_green_override("X", 1, Coordinate::new(10.0, 20.0), moved);
        assert_eq!(s.classify_lie("X", 1, &moved), Some(Lie::Green));
    }

    #[test]
    fn test_tree_obstacles() {
        let mut course = course_x();
        course.holes[0].features.push(
            Feature::new(FeatureKind::Tree, Coordinate::new(10.0005, 20.0))
                .with_radius(Yards(6.0))
                .with_height(Meters(15.0)),
        );
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
        let s = CourseService::new(Arc::new(catalog), InMemoryOverrideStore::new(), EngineConfig::default());

        let trees = s.tree_obstacles("X", 1);
        assert_eq!(trees.len(), 1);
        assert!(approx_eq(trees[0].radius.0, 5.4864, 1e-9));
        assert_eq!(trees[0].height, Meters(15.0));
        assert!(s.tree_obstacles("X", 2).is_empty());
        assert!(s.tree_obstacles("Nope", 1).is_empty());
    }

    #[test]
    fn test_integrity_override_without_hole_one() {
        let course = Course::new("NoOne", "Here")
            .with_hole(Hole::new(2, 4, Coordinate::new(1.0, 1.0), Coordinate::new(1.003, 1.0)))
            .with_hole(Hole::new(3, 4, Coordinate::new(2.0, 1.0), Coordinate::new(2.003, 1.0)));
        let catalog = CourseCatalog::from_courses(vec![course]).unwrap();

        let mut store = InMemoryOverrideStore::new();
        store.set_tee_green("NoOne", 1, TeeGreen {
            tee: Coordinate::new(0.0, 1.0),
            green: Coordinate::new(0.003, 1.0),
        });
        let s = CourseService::new(Arc::new(catalog), store, EngineConfig::default());

        assert_eq!(s.hole_count("NoOne"), 2);
        assert!(s.resolve_tee_green("NoOne", 1, None).is_none());
        assert!(s
            .verify_integrity()
            .issues
            .contains(&IntegrityIssue::HoleOneUnresolvable { course: "NoOne".to_string() }));
    }

    #[test]
    fn test_integrity_override_rescues_hole_one() {
        let mut broken = course_x();
        broken.holes[0].tees.clear();
        let catalog = CourseCatalog::from_courses(vec![broken]).unwrap();

        let mut store = InMemoryOverrideStore::new();
        let s = CourseService::new(Arc::new(catalog.clone()), store.clone(), EngineConfig::default());
        assert!(s.resolve_tee_green("X", 1, None).is_none());
        assert!(s
            .verify_integrity()
            .issues
            .contains(&IntegrityIssue::HoleOneUnresolvable { course: "X".to_string() }));

        store.set_tee_green("X", 1, TeeGreen {
            tee: Coordinate::new(10.0, 20.0),
            green: Coordinate::new(10.001, 20.001),
        });
        let s = CourseService::new(Arc::new(catalog), store, EngineConfig::default());
        assert!(s.resolve_tee_green("X", 1, None).is_some());
        assert!(!s
            .verify_integrity()
            .issues
            .contains(&IntegrityIssue::HoleOneUnresolvable { course: "X".to_string() }));
    }
}
