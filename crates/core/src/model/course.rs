use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};
use crate::model::lesson::{Lesson, LessonProgress};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course {0} has no lessons")]
    NoLessons(CourseId),

    #[error("course {course} lists lesson {lesson} more than once")]
    DuplicateLesson { course: CourseId, lesson: LessonId },

    #[error("course {0} progress does not match its lessons")]
    ProgressMismatch(CourseId),
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A course from the catalog together with its completion state.
///
/// `lessons_progress` is parallel to `lessons`: same length, same ids, same
/// order. Constructors enforce this and the mutators never add or remove
/// entries, they only flip `done` flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    lessons: Vec<Lesson>,
    completed: bool,
    lessons_progress: Vec<LessonProgress>,
}

impl Course {
    /// Build a course with zeroed progress: not completed, every lesson undone.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::NoLessons` for an empty lesson list and
    /// `CourseError::DuplicateLesson` if a lesson id repeats.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Result<Self, CourseError> {
        validate_lessons(&id, &lessons)?;
        let lessons_progress = lessons
            .iter()
            .map(|lesson| LessonProgress::new(lesson.id().clone(), false))
            .collect();
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            lessons,
            completed: false,
            lessons_progress,
        })
    }

    /// Rehydrate a course from persisted state.
    ///
    /// A `completed` flag that disagrees with the lesson flags is kept as-is;
    /// only structural problems are rejected.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the lesson list is empty, has duplicate ids, or
    /// if the progress entries are not parallel to the lessons.
    pub fn from_persisted(
        id: CourseId,
        title: String,
        description: String,
        lessons: Vec<Lesson>,
        completed: bool,
        lessons_progress: Vec<LessonProgress>,
    ) -> Result<Self, CourseError> {
        validate_lessons(&id, &lessons)?;
        let parallel = lessons.len() == lessons_progress.len()
            && lessons
                .iter()
                .zip(&lessons_progress)
                .all(|(lesson, progress)| lesson.id() == progress.lesson_id());
        if !parallel {
            return Err(CourseError::ProgressMismatch(id));
        }

        Ok(Self {
            id,
            title,
            description,
            lessons,
            completed,
            lessons_progress,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn lessons_progress(&self) -> &[LessonProgress] {
        &self.lessons_progress
    }

    /// Done flag for a lesson, `None` if the lesson is not part of this course.
    #[must_use]
    pub fn lesson_done(&self, lesson_id: &LessonId) -> Option<bool> {
        self.lessons_progress
            .iter()
            .find(|progress| progress.lesson_id() == lesson_id)
            .map(LessonProgress::done)
    }

    #[must_use]
    pub fn done_count(&self) -> usize {
        self.lessons_progress.iter().filter(|p| p.done()).count()
    }

    /// Derived completion percentage, recomputed on every call.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        completion_percent(self.done_count(), self.lessons.len())
    }

    /// Set a lesson's done flag and recompute the course flag.
    ///
    /// Unchecking any lesson clears `completed`. Checking a lesson sets
    /// `completed` only once the percentage reaches exactly 100.
    ///
    /// Returns `false` (and changes nothing) when the lesson is unknown.
    pub fn toggle_lesson(&mut self, lesson_id: &LessonId, done: bool) -> bool {
        let Some(progress) = self
            .lessons_progress
            .iter_mut()
            .find(|progress| progress.lesson_id() == lesson_id)
        else {
            return false;
        };
        progress.set_done(done);

        if !done {
            self.completed = false;
        } else if self.completion_percent() == 100 {
            self.completed = true;
        }
        true
    }

    /// Fast-forward: mark the course and every lesson as done. Idempotent.
    pub fn mark_completed(&mut self) {
        self.completed = true;
        for progress in &mut self.lessons_progress {
            progress.set_done(true);
        }
    }
}

/// `round(100 * done / total)` with halves rounded up, in integer arithmetic.
///
/// A zero `total` yields 0; courses with no lessons are rejected at
/// construction so this only matters for direct callers.
#[must_use]
pub fn completion_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    let percent = (200 * done + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

fn validate_lessons(id: &CourseId, lessons: &[Lesson]) -> Result<(), CourseError> {
    if lessons.is_empty() {
        return Err(CourseError::NoLessons(id.clone()));
    }
    let mut seen = HashSet::with_capacity(lessons.len());
    for lesson in lessons {
        if !seen.insert(lesson.id()) {
            return Err(CourseError::DuplicateLesson {
                course: id.clone(),
                lesson: lesson.id().clone(),
            });
        }
    }
    Ok(())
}
