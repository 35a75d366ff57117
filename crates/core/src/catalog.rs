//! Built-in seed catalog and the progress initializer.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Course, CourseError, CourseId, Lesson, LessonId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("course id {0} appears more than once")]
    DuplicateCourse(CourseId),

    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Immutable template for one course: identity, copy and ordered lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSeed {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl CourseSeed {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: &[(&str, &str, &str)],
    ) -> Self {
        Self {
            id: CourseId::new(id),
            title: title.into(),
            description: description.into(),
            lessons: lessons
                .iter()
                .map(|(id, title, duration)| Lesson::new(LessonId::new(*id), *title, *duration))
                .collect(),
        }
    }
}

/// The validated, fixed set of courses offered by the app.
///
/// Holds one zeroed course per seed, built once when the catalog is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Validate a list of seeds.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCourse` for repeated course ids and
    /// `CatalogError::Course` for a course with no lessons or repeated lesson ids.
    pub fn new(seeds: Vec<CourseSeed>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(seeds.len());
        let mut courses = Vec::with_capacity(seeds.len());
        for seed in seeds {
            if !seen.insert(seed.id.clone()) {
                return Err(CatalogError::DuplicateCourse(seed.id));
            }
            courses.push(Course::new(
                seed.id,
                seed.title,
                seed.description,
                seed.lessons,
            )?);
        }
        Ok(Self { courses })
    }

    /// The catalog shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the built-in seeds fail validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(vec![
            CourseSeed::new(
                "c1",
                "Introduction to Web Development",
                "HTML, CSS, and JavaScript basics to get you started.",
                &[
                    ("c1-l1", "HTML Basics", "10m"),
                    ("c1-l2", "CSS Foundations", "14m"),
                    ("c1-l3", "Intro to JavaScript", "18m"),
                ],
            ),
            CourseSeed::new(
                "c2",
                "Responsive Design",
                "Create layouts that look great on any screen.",
                &[
                    ("c2-l1", "Flexbox", "12m"),
                    ("c2-l2", "Grid", "16m"),
                    ("c2-l3", "Media Queries", "10m"),
                ],
            ),
            CourseSeed::new(
                "c3",
                "JavaScript Essentials",
                "Core JS concepts: variables, control flow, functions.",
                &[
                    ("c3-l1", "Variables & Types", "8m"),
                    ("c3-l2", "Functions", "15m"),
                    ("c3-l3", "Async Basics", "20m"),
                ],
            ),
        ])
    }

    /// Fresh working set: every course incomplete, every lesson undone, order kept.
    #[must_use]
    pub fn attach_progress(&self) -> Vec<Course> {
        self.courses.clone()
    }
}
