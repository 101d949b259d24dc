//! Editor overrides layered over the static catalog.
//!
//! The course editor can move a hole's tee and green, draw boundary sections
//! around the playable area and draw precise fairway outlines. None of that
//! touches the catalog: it lives in an [`OverrideStore`] that the lookup service
//! consults first and falls through when empty.

use std::collections::{BTreeMap, HashMap};

use crate::{Coordinate, TeeGreen};
#[cfg(feature = "json")]
use crate::error::StoreError;

/// A user-drawn polygon marking an in-bounds area of a course.
///
/// The ring may be open or closed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundarySection {
    pub points: Vec<Coordinate>,
}

impl BoundarySection {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

/// Storage for editor overrides.
///
/// Implementations decide where overrides live (memory, a key-value file, a
/// remote table); the lookup service only needs these operations.
pub trait OverrideStore {
    /// Tee/green override for one hole.
    fn tee_green(&self, course: &str, hole: u32) -> Option<TeeGreen>;

    fn set_tee_green(&mut self, course: &str, hole: u32, tee_green: TeeGreen);

    /// Remove an override, returning it if one existed.
    fn clear_tee_green(&mut self, course: &str, hole: u32) -> Option<TeeGreen>;

    /// Hole numbers with a tee/green override, ascending.
    fn overridden_holes(&self, course: &str) -> Vec<u32>;

    /// Boundary sections for a course in drawing order.
    fn boundary_sections(&self, course: &str) -> Vec<BoundarySection>;

    /// Append a section, returning its index.
    fn add_boundary_section(&mut self, course: &str, section: BoundarySection) -> usize;

    /// Remove a section by index. Later sections shift down.
    fn remove_boundary_section(&mut self, course: &str, index: usize) -> Option<BoundarySection>;

    /// Hand-drawn fairway outlines for one hole.
    fn fairway_polygons(&self, course: &str, hole: u32) -> Vec<Vec<Coordinate>>;

    /// Replace the fairway outlines for one hole. An empty list clears them.
    fn set_fairway_polygons(&mut self, course: &str, hole: u32, polygons: Vec<Vec<Coordinate>>);
}

/// Overrides for a single course.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
struct CourseOverrides {
    #[cfg_attr(feature = "json", serde(default))]
    tee_green: BTreeMap<u32, TeeGreen>,
    #[cfg_attr(feature = "json", serde(default))]
    boundary: Vec<BoundarySection>,
    #[cfg_attr(feature = "json", serde(default))]
    fairways: BTreeMap<u32, Vec<Vec<Coordinate>>>,
}

impl CourseOverrides {
    fn is_empty(&self) -> bool {
        self.tee_green.is_empty() && self.boundary.is_empty() && self.fairways.is_empty()
    }
}

/// Process-local override store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryOverrideStore {
    courses: HashMap<String, CourseOverrides>,
}

#[cfg(feature = "json")]
const SNAPSHOT_VERSION: u32 = 1;

#[cfg(feature = "json")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot {
    version: u32,
    courses: BTreeMap<String, CourseOverrides>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no course has any override.
    pub fn is_empty(&self) -> bool {
        self.courses.values().all(CourseOverrides::is_empty)
    }

    /// Serialize every override into a versioned JSON snapshot.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, StoreError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            courses: self
                .courses
                .iter()
                .filter(|(_, o)| !o.is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Restore a store from a snapshot produced by [`Self::to_json`].
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion(snapshot.version));
        }
        Ok(Self { courses: snapshot.courses.into_iter().collect() })
    }

    fn course_mut(&mut self, course: &str) -> &mut CourseOverrides {
        self.courses.entry(course.to_string()).or_default()
    }
}

impl OverrideStore for InMemoryOverrideStore {
    fn tee_green(&self, course: &str, hole: u32) -> Option<TeeGreen> {
        self.courses.get(course)?.tee_green.get(&hole).copied()
    }

    fn set_tee_green(&mut self, course: &str, hole: u32, tee_green: TeeGreen) {
        self.course_mut(course).tee_green.insert(hole, tee_green);
    }

    fn clear_tee_green(&mut self, course: &str, hole: u32) -> Option<TeeGreen> {
        self.courses.get_mut(course)?.tee_green.remove(&hole)
    }

    fn overridden_holes(&self, course: &str) -> Vec<u32> {
        self.courses
            .get(course)
            .map(|o| o.tee_green.keys().copied().collect())
            .unwrap_or_default()
    }

    fn boundary_sections(&self, course: &str) -> Vec<BoundarySection> {
        self.courses
            .get(course)
            .map(|o| o.boundary.clone())
            .unwrap_or_default()
    }

    fn add_boundary_section(&mut self, course: &str, section: BoundarySection) -> usize {
        let boundary = &mut self.course_mut(course).boundary;
        boundary.push(section);
        boundary.len() - 1
    }

    fn remove_boundary_section(&mut self, course: &str, index: usize) -> Option<BoundarySection> {
        let boundary = &mut self.courses.get_mut(course)?.boundary;
        if index < boundary.len() {
            Some(boundary.remove(index))
        } else {
            None
        }
    }

    fn fairway_polygons(&self, course: &str, hole: u32) -> Vec<Vec<Coordinate>> {
        self.courses
            .get(course)
            .and_then(|o| o.fairways.get(&hole).cloned())
            .unwrap_or_default()
    }

    fn set_fairway_polygons(&mut self, course: &str, hole: u32, polygons: Vec<Vec<Coordinate>>) {
        if polygons.is_empty() {
            if let Some(o) = self.courses.get_mut(course) {
                o.fairways.remove(&hole);
            }
        } else {
            self.course_mut(course).fairways.insert(hole, polygons);
        }
    }
}
