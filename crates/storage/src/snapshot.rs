//! JSON codec for the progress snapshot stored in the persistent slot.
//!
//! The snapshot is the whole course collection as a JSON array, one object
//! per course with its lessons and progress embedded:
//!
//! ```json
//! [{"id":"c1","title":"…","description":"…",
//!   "lessons":[{"id":"c1-l1","title":"…","duration":"10m"}],
//!   "completed":false,
//!   "lessonsProgress":[{"lessonId":"c1-l1","done":false}]}]
//! ```

use std::collections::HashSet;

use course_core::model::{Course, CourseError, CourseId, Lesson, LessonId, LessonProgress};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::StorageError;

/// Reasons a stored snapshot cannot be adopted as the working set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Course(#[from] CourseError),

    #[error("course id {0} appears more than once")]
    DuplicateCourse(CourseId),
}

/// Persisted shape for a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: String,
    pub title: String,
    pub duration: String,
}

/// Persisted shape for one lesson's progress flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgressRecord {
    pub lesson_id: String,
    pub done: bool,
}

/// Persisted shape for a course, mirroring the domain `Course` so the
/// domain layer stays free of serialization concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lessons: Vec<LessonRecord>,
    pub completed: bool,
    pub lessons_progress: Vec<LessonProgressRecord>,
}

impl CourseRecord {
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        Self {
            id: course.id().as_str().to_owned(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            lessons: course
                .lessons()
                .iter()
                .map(|lesson| LessonRecord {
                    id: lesson.id().as_str().to_owned(),
                    title: lesson.title().to_owned(),
                    duration: lesson.duration().to_owned(),
                })
                .collect(),
            completed: course.completed(),
            lessons_progress: course
                .lessons_progress()
                .iter()
                .map(|progress| LessonProgressRecord {
                    lesson_id: progress.lesson_id().as_str().to_owned(),
                    done: progress.done(),
                })
                .collect(),
        }
    }

    /// Convert the record back into a domain `Course`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the record violates the course invariants.
    pub fn into_course(self) -> Result<Course, CourseError> {
        let lessons = self
            .lessons
            .into_iter()
            .map(|lesson| Lesson::new(LessonId::new(lesson.id), lesson.title, lesson.duration))
            .collect();
        let lessons_progress = self
            .lessons_progress
            .into_iter()
            .map(|progress| LessonProgress::new(LessonId::new(progress.lesson_id), progress.done))
            .collect();

        Course::from_persisted(
            CourseId::new(self.id),
            self.title,
            self.description,
            lessons,
            self.completed,
            lessons_progress,
        )
    }
}

/// Serialize the full working set.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_snapshot(courses: &[Course]) -> Result<String, StorageError> {
    let records: Vec<CourseRecord> = courses.iter().map(CourseRecord::from_course).collect();
    serde_json::to_string(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse and validate a stored snapshot.
///
/// # Errors
///
/// Returns `SnapshotError` when the value is not a JSON course array, when any
/// course breaks its invariants, or when course ids repeat.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Course>, SnapshotError> {
    let records: Vec<CourseRecord> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut courses = Vec::with_capacity(records.len());
    for record in records {
        let course = record.into_course()?;
        if !seen.insert(course.id().clone()) {
            return Err(SnapshotError::DuplicateCourse(course.id().clone()));
        }
        courses.push(course);
    }
    Ok(courses)
}
