//! Name-keyed course registry.
//!
//! Courses are addressed by name everywhere (saved rounds, editor overrides, UI),
//! so the catalog is built once, rejects duplicate names up front and answers
//! every name lookup through a single index instead of scattered string matches.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use log::{debug, info};

use crate::error::CatalogError;
use crate::{Course, Venue};

/// Immutable registry of every known course.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    /// Venue name for each course, parallel to `courses`
    venues: Vec<Option<String>>,
    index: HashMap<String, usize>,
}

impl CourseCatalog {
    /// Build a catalog from venues. Course names must be unique across venues.
    pub fn from_venues(venues: Vec<Venue>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for venue in venues {
            for course in venue.courses {
                catalog.insert(course, Some(venue.name.clone()))?;
            }
        }
        info!(
            "[CourseCatalog] Loaded {} courses",
            catalog.courses.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from courses that do not belong to a venue.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for course in courses {
            catalog.insert(course, None)?;
        }
        info!(
            "[CourseCatalog] Loaded {} courses",
            catalog.courses.len()
        );
        Ok(catalog)
    }

    /// Parse a JSON array of venues.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let venues: Vec<Venue> = serde_json::from_str(json)?;
        Self::from_venues(venues)
    }

    fn insert(&mut self, course: Course, venue: Option<String>) -> Result<(), CatalogError> {
        if self.index.contains_key(&course.name) {
            return Err(CatalogError::DuplicateCourse(course.name));
        }

        let mut seen = BTreeSet::new();
        for hole in &course.holes {
            if !seen.insert(hole.number) {
                return Err(CatalogError::DuplicateHole {
                    course: course.name.clone(),
                    hole: hole.number,
                });
            }
        }

        self.index.insert(course.name.clone(), self.courses.len());
        self.courses.push(course);
        self.venues.push(venue);
        Ok(())
    }

    pub fn course(&self, name: &str) -> Option<&Course> {
        let course = self.index.get(name).map(|&i| &self.courses[i]);
        if course.is_none() {
            debug!("[CourseCatalog] Unknown course `{}`", name);
        }
        course
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Venue hosting the course, if it was registered through one.
    pub fn venue_of(&self, name: &str) -> Option<&str> {
        self.index.get(name).and_then(|&i| self.venues[i].as_deref())
    }

    /// Course names in registration order.
    pub fn course_names(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.name.as_str())
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

// ============================================================================
// Stroke Index Validation
// ============================================================================

/// Problems with a course's stroke indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeIndexReport {
    /// Indices used by more than one hole
    pub duplicates: Vec<u32>,
    /// Indices in 1..=N used by no hole
    pub missing: Vec<u32>,
    /// Indices outside 1..=N
    pub out_of_range: Vec<u32>,
    /// Holes that have no stroke index at all
    pub unassigned_holes: Vec<u32>,
}

impl StrokeIndexReport {
    pub fn is_valid(&self) -> bool {
        self.duplicates.is_empty()
            && self.missing.is_empty()
            && self.out_of_range.is_empty()
            && self.unassigned_holes.is_empty()
    }
}

/// Check that the course's stroke indices form a permutation of 1..=N.
///
/// Net scoring allocates handicap strokes by stroke index, so a duplicate or
/// gap silently gives a player too many or too few strokes.
pub fn validate_stroke_indices(course: &Course) -> StrokeIndexReport {
    let n = course.holes.len() as u32;
    let mut counts: HashMap<u32, u32> = HashMap::new();
    let mut report = StrokeIndexReport::default();

    for hole in &course.holes {
        match hole.stroke_index {
            Some(si) if si >= 1 && si <= n => *counts.entry(si).or_insert(0) += 1,
            Some(si) => report.out_of_range.push(si),
            None => report.unassigned_holes.push(hole.number),
        }
    }

    report.duplicates = counts
        .iter()
        .filter(|(_, c)| **c > 1)
        .map(|(&si, _)| si)
        .collect();
    report.duplicates.sort_unstable();
    report.missing = (1..=n).filter(|si| !counts.contains_key(si)).collect();
    report.out_of_range.sort_unstable();

    report
}

// ============================================================================
// Integrity
// ============================================================================

/// A data problem found in a cataloged course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// The course has holes but hole 1 cannot be placed on a map.
    HoleOneUnresolvable { course: String },
    /// A hole has no tee marker to resolve a tee position from.
    HoleWithoutTees { course: String, hole: u32 },
    /// Hole numbers are not exactly 1..=N.
    HoleNumbersNotContiguous { course: String, missing: Vec<u32> },
    /// Stroke indices are not a permutation of 1..=N.
    StrokeIndices { course: String, report: StrokeIndexReport },
}

impl IntegrityIssue {
    pub fn course(&self) -> &str {
        match self {
            IntegrityIssue::HoleOneUnresolvable { course }
            | IntegrityIssue::HoleWithoutTees { course, .. }
            | IntegrityIssue::HoleNumbersNotContiguous { course, .. }
            | IntegrityIssue::StrokeIndices { course, .. } => course,
        }
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::HoleOneUnresolvable { course } => {
                write!(f, "{}: hole 1 cannot be resolved", course)
            }
            IntegrityIssue::HoleWithoutTees { course, hole } => {
                write!(f, "{}: hole {} has no tee markers", course, hole)
            }
            IntegrityIssue::HoleNumbersNotContiguous { course, missing } => {
                write!(f, "{}: missing hole numbers {:?}", course, missing)
            }
            IntegrityIssue::StrokeIndices { course, report } => write!(
                f,
                "{}: stroke indices duplicated {:?}, missing {:?}, out of range {:?}, unassigned holes {:?}",
                course, report.duplicates, report.missing, report.out_of_range, report.unassigned_holes
            ),
        }
    }
}

/// Result of checking every course in a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub courses_checked: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_for<'a>(&'a self, course: &'a str) -> impl Iterator<Item = &'a IntegrityIssue> {
        self.issues.iter().filter(move |i| i.course() == course)
    }
}

impl CourseCatalog {
    /// Check every course's static data.
    pub fn verify_integrity(&self) -> IntegrityReport {
        #[cfg(feature = "parallel")]
        let issues: Vec<IntegrityIssue> = {
            use rayon::prelude::*;
            self.courses
                .par_iter()
                .flat_map_iter(|c| course_issues(c))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let issues: Vec<IntegrityIssue> = self.courses.iter().flat_map(course_issues).collect();

        IntegrityReport {
            courses_checked: self.courses.len(),
            issues,
        }
    }
}

fn course_issues(course: &Course) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    if course.holes.is_empty() {
        return issues;
    }

    let hole_one_resolves = course
        .hole(1)
        .map_or(false, |h| h.tee_marker(None).is_some());
    if !hole_one_resolves {
        issues.push(IntegrityIssue::HoleOneUnresolvable { course: course.name.clone() });
    }

    for hole in course.holes.iter().filter(|h| h.tees.is_empty()) {
        issues.push(IntegrityIssue::HoleWithoutTees {
            course: course.name.clone(),
            hole: hole.number,
        });
    }

    let n = course.holes.len() as u32;
    let missing: Vec<u32> = (1..=n).filter(|&num| course.hole(num).is_none()).collect();
    if !missing.is_empty() {
        issues.push(IntegrityIssue::HoleNumbersNotContiguous {
            course: course.name.clone(),
            missing,
        });
    }

    let report = validate_stroke_indices(course);
    if !report.is_valid() {
        issues.push(IntegrityIssue::StrokeIndices {
            course: course.name.clone(),
            report,
        });
    }

    issues
}
