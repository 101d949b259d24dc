//! # Course Geometry
//!
//! Golf course geometry and lie classification for course maps, scorecards,
//! the course editor and shot simulation.
//!
//! This library provides:
//! - A static course catalog (venues, courses, holes, tee markers, features)
//! - Tee/green resolution layered over editor overrides
//! - Course bounds, hole corridors and boundary-section label placement
//! - Lie classification (green, water, bunker, fairway, rough) and tree obstacles
//!
//! ## Features
//!
//! - **`json`** - Load catalogs and persist overrides as JSON
//! - **`parallel`** - Run catalog integrity checks with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! Catalog loading and override snapshot tests only build with the `json`
//! feature: run `cargo test --features json` (or `--all-features`) to cover them.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use course_geometry::{
//!     Coordinate, Course, CourseCatalog, CourseService, EngineConfig, Hole,
//!     InMemoryOverrideStore, Lie,
//! };
//!
//! let course = Course::new("Riverside", "Springfield").with_hole(
//!     Hole::new(1, 4, Coordinate::new(10.0, 20.0), Coordinate::new(10.001, 20.001)),
//! );
//! let catalog = CourseCatalog::from_courses(vec![course]).unwrap();
//! let service = CourseService::new(
//!     Arc::new(catalog),
//!     InMemoryOverrideStore::new(),
//!     EngineConfig::default(),
//! );
//!
//! let tee_green = service.resolve_tee_green("Riverside", 1, None).unwrap();
//! assert_eq!(tee_green.tee, Coordinate::new(10.0, 20.0));
//!
//! let info = service.resolve_hole_info("Riverside", 1, None).unwrap();
//! assert_eq!(info.par, 4);
//!
//! let lie = service.classify_lie("Riverside", 1, &tee_green.green);
//! assert_eq!(lie, Some(Lie::Green));
//! ```

pub mod error;
pub use error::{CatalogError, StoreError};

pub mod units;
pub use units::{Meters, Yards, YARDS_TO_METERS};

pub mod geo_utils;

pub mod course;
pub use course::{Course, Feature, FeatureKind, Hole, TeeMarker, TeeSet, Venue, DEFAULT_TEE_NAME};

pub mod catalog;
pub use catalog::{
    validate_stroke_indices, CourseCatalog, IntegrityIssue, IntegrityReport, StrokeIndexReport,
};

pub mod overrides;
pub use overrides::{BoundarySection, InMemoryOverrideStore, OverrideStore};

pub mod layout;
pub use layout::{corridor_polygon, section_label_positions, CorridorIndex, HoleCorridor, LabelConfig};

pub mod lie;
pub use lie::{classify_lie, CircleFeature, FeatureDefaults, HoleFeatures, Lie, TreeObstacle};

pub mod scoring;
pub use scoring::{handicap_strokes, net_score};

pub mod lookup;
pub use lookup::{CourseService, CourseTotals, EngineConfig, HoleInfo, HoleSummary, YardageSource};

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("CourseGeometryRust")
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate in decimal degrees.
///
/// # Example
/// ```
/// use course_geometry::Coordinate;
/// let point = Coordinate::new(56.3433, -2.8021); // St Andrews
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the coordinate is finite and within WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Center of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }

    /// Whether the point lies inside the box, edges included.
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }
}

/// Resolved tee and green positions for a hole.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct TeeGreen {
    pub tee: Coordinate,
    pub green: Coordinate,
}

// ============================================================================
// FFI Exports (only when feature enabled)
// ============================================================================

#[cfg(feature = "ffi")]
pub use ffi::*;

#[cfg(feature = "ffi")]
mod ffi {
    use super::*;
    use log::{debug, info, warn};
    use std::sync::{Arc, Mutex};

    /// Flat lie result for mobile: the lie plus whether the position is under
    /// a tree canopy.
    #[derive(Debug, Clone, PartialEq, uniffi::Record)]
    pub struct FfiLieResult {
        pub lie: Lie,
        pub under_tree: bool,
    }

    /// Course engine handle shared with Kotlin/Swift.
    #[derive(uniffi::Object)]
    pub struct FfiCourseEngine {
        inner: Mutex<CourseService>,
    }

    /// Create an engine from a JSON array of venues.
    ///
    /// `overrides_json` is a snapshot previously returned by
    /// [`FfiCourseEngine::export_overrides`]. Returns `None` if either document
    /// fails to parse.
    #[uniffi::export]
    pub fn create_course_engine(
        catalog_json: String,
        overrides_json: Option<String>,
    ) -> Option<Arc<FfiCourseEngine>> {
        init_logging();

        let catalog = match CourseCatalog::from_json(&catalog_json) {
            Ok(c) => c,
            Err(e) => {
                warn!("[CourseGeometryRust] Failed to load catalog: {}", e);
                return None;
            }
        };

        let store = match overrides_json {
            Some(json) => match InMemoryOverrideStore::from_json(&json) {
                Ok(s) => s,
                Err(e) => {
                    warn!("[CourseGeometryRust] Failed to load overrides: {}", e);
                    return None;
                }
            },
            None => InMemoryOverrideStore::new(),
        };

        info!("[CourseGeometryRust] Engine created with {} courses", catalog.len());
        let service = CourseService::new(Arc::new(catalog), store, EngineConfig::default());
        Some(Arc::new(FfiCourseEngine { inner: Mutex::new(service) }))
    }

    impl FfiCourseEngine {
        fn with<T>(&self, default: T, f: impl FnOnce(&mut CourseService) -> T) -> T {
            match self.inner.lock() {
                Ok(mut service) => f(&mut service),
                Err(_) => {
                    warn!("[CourseGeometryRust] Engine lock poisoned");
                    default
                }
            }
        }
    }

    #[uniffi::export]
    impl FfiCourseEngine {
        pub fn course_names(&self) -> Vec<String> {
            self.with(Vec::new(), |s| s.catalog().course_names().map(str::to_string).collect())
        }

        pub fn hole_count(&self, course: String) -> u32 {
            self.with(0, |s| s.hole_count(&course))
        }

        pub fn resolve_tee_green(&self, course: String, hole: u32, tee_set: Option<String>) -> Option<TeeGreen> {
            self.with(None, |s| s.resolve_tee_green(&course, hole, tee_set.as_deref()))
        }

        pub fn resolve_hole_info(&self, course: String, hole: u32, tee_set: Option<String>) -> Option<HoleInfo> {
            self.with(None, |s| s.resolve_hole_info(&course, hole, tee_set.as_deref()))
        }

        pub fn holes_for_course(&self, course: String) -> Vec<HoleSummary> {
            self.with(Vec::new(), |s| s.holes_for_course(&course))
        }

        pub fn bounds(&self, course: String) -> Option<Bounds> {
            self.with(None, |s| s.bounds(&course))
        }

        pub fn hole_corridor(&self, course: String, hole: u32) -> Vec<Coordinate> {
            self.with(Vec::new(), |s| {
                s.hole_corridor(&course, hole).map(|r| r.to_vec()).unwrap_or_default()
            })
        }

        pub fn hole_at_point(&self, course: String, point: Coordinate) -> Option<u32> {
            self.with(None, |s| s.hole_at_point(&course, &point))
        }

        pub fn section_label_positions(&self, course: String) -> Vec<Coordinate> {
            self.with(Vec::new(), |s| s.section_label_positions(&course))
        }

        pub fn classify_lie(&self, course: String, hole: u32, position: Coordinate) -> Option<FfiLieResult> {
            self.with(None, |s| {
                let features = s.hole_features(&course, hole)?;
                Some(FfiLieResult {
                    lie: classify_lie(&position, &features),
                    under_tree: features.trees.iter().any(|t| t.contains(&position)),
                })
            })
        }

        pub fn set_tee_green_override(&self, course: String, hole: u32, tee: Coordinate, green: Coordinate) -> bool {
            debug!("[CourseGeometryRust] Override {} hole {}", course, hole);
            self.with(false, |s| s.set_tee_green_override(&course, hole, tee, green))
        }

        pub fn clear_tee_green_override(&self, course: String, hole: u32) -> bool {
            self.with(false, |s| s.clear_tee_green_override(&course, hole).is_some())
        }

        pub fn add_boundary_section(&self, course: String, points: Vec<Coordinate>) -> Option<u32> {
            self.with(None, |s| s.add_boundary_section(&course, points).map(|i| i as u32))
        }

        pub fn remove_boundary_section(&self, course: String, index: u32) -> bool {
            self.with(false, |s| s.remove_boundary_section(&course, index as usize).is_some())
        }

        pub fn course_boundary(&self, course: String) -> Vec<Vec<Coordinate>> {
            self.with(Vec::new(), |s| {
                s.course_boundary(&course).into_iter().map(|b| b.points).collect()
            })
        }

        /// Snapshot of every override, for the app to persist.
        pub fn export_overrides(&self) -> Option<String> {
            self.with(None, |s| match s.store().to_json() {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!("[CourseGeometryRust] Failed to export overrides: {}", e);
                    None
                }
            })
        }
    }
}
