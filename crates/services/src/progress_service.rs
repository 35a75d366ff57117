use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use course_core::Catalog;
use course_core::model::{Course, CourseId, LessonId};
use storage::repository::SlotRepository;
use storage::snapshot::{decode_snapshot, encode_snapshot};
use tokio::sync::Mutex;

use crate::error::ProgressError;

/// Fixed key of the slot holding the serialized course collection.
pub const PROGRESS_SLOT_KEY: &str = "mini-elearning:progress";

/// Aggregate numbers across the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    pub courses: usize,
    pub completed_courses: usize,
    pub lessons_done: usize,
    pub lessons_total: usize,
}

/// Owns the in-memory working set of courses and keeps the persistent slot in
/// sync with it.
///
/// Reads are synchronous snapshots. Every mutation holds the write gate while
/// it updates memory and writes the slot, so writes land in mutation order.
pub struct ProgressService {
    slots: Arc<dyn SlotRepository>,
    catalog: Catalog,
    courses: RwLock<Vec<Course>>,
    write_gate: Mutex<()>,
}

impl ProgressService {
    /// Load the persisted snapshot, or start from the catalog.
    ///
    /// Missing, unreadable or malformed snapshots are not errors: they are
    /// logged and replaced by freshly seeded progress.
    pub async fn initialize(slots: Arc<dyn SlotRepository>, catalog: Catalog) -> Self {
        let courses = match slots.read_slot(PROGRESS_SLOT_KEY).await {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(courses) => {
                    tracing::debug!(courses = courses.len(), "loaded progress snapshot");
                    courses
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to parse stored progress, using seed");
                    catalog.attach_progress()
                }
            },
            Ok(None) => {
                tracing::debug!("no stored progress, using seed");
                catalog.attach_progress()
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored progress, using seed");
                catalog.attach_progress()
            }
        };

        Self {
            slots,
            catalog,
            courses: RwLock::new(courses),
            write_gate: Mutex::new(()),
        }
    }

    /// All courses in display order.
    #[must_use]
    pub fn courses(&self) -> Vec<Course> {
        self.read().clone()
    }

    /// Look up a course by id. `None` is an expected outcome for stale ids.
    #[must_use]
    pub fn find_course(&self, course_id: &CourseId) -> Option<Course> {
        self.read().iter().find(|c| c.id() == course_id).cloned()
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        let courses = self.read();
        ProgressStats {
            courses: courses.len(),
            completed_courses: courses.iter().filter(|c| c.completed()).count(),
            lessons_done: courses.iter().map(Course::done_count).sum(),
            lessons_total: courses.iter().map(|c| c.lessons().len()).sum(),
        }
    }

    /// Write the whole working set to the slot, replacing the previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if encoding or the slot write fails.
    pub async fn persist(&self) -> Result<(), ProgressError> {
        let _gate = self.write_gate.lock().await;
        let raw = encode_snapshot(&self.read())?;
        self.write(raw).await
    }

    /// Set one lesson's done flag and recompute the course's completed flag.
    ///
    /// Returns the updated course, or `None` (nothing persisted) when either
    /// id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if persisting fails. The in-memory
    /// change is kept in that case.
    pub async fn toggle_lesson(
        &self,
        course_id: &CourseId,
        lesson_id: &LessonId,
        done: bool,
    ) -> Result<Option<Course>, ProgressError> {
        self.mutate(course_id, |course| course.toggle_lesson(lesson_id, done))
            .await
    }

    /// Mark a course and all of its lessons as done.
    ///
    /// Returns the updated course, or `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if persisting fails.
    pub async fn mark_course_completed(
        &self,
        course_id: &CourseId,
    ) -> Result<Option<Course>, ProgressError> {
        self.mutate(course_id, |course| {
            course.mark_completed();
            true
        })
        .await
    }

    /// Discard all progress, regenerate it from the catalog and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if persisting fails.
    pub async fn reset(&self) -> Result<(), ProgressError> {
        let _gate = self.write_gate.lock().await;
        let raw = {
            let mut courses = self.write_guard();
            *courses = self.catalog.attach_progress();
            encode_snapshot(&courses)?
        };
        tracing::info!("progress reset");
        self.write(raw).await
    }

    async fn mutate<F>(&self, course_id: &CourseId, apply: F) -> Result<Option<Course>, ProgressError>
    where
        F: FnOnce(&mut Course) -> bool + Send,
    {
        let _gate = self.write_gate.lock().await;
        let (updated, raw) = {
            let mut courses = self.write_guard();
            let Some(course) = courses.iter_mut().find(|c| c.id() == course_id) else {
                tracing::debug!(course = %course_id, "ignoring mutation for unknown course");
                return Ok(None);
            };
            if !apply(course) {
                tracing::debug!(course = %course_id, "ignoring mutation for unknown lesson");
                return Ok(None);
            }
            let updated = course.clone();
            (updated, encode_snapshot(&courses)?)
        };

        self.write(raw).await?;
        Ok(Some(updated))
    }

    async fn write(&self, raw: String) -> Result<(), ProgressError> {
        self.slots
            .write_slot(PROGRESS_SLOT_KEY, &raw)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to persist progress"))?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Course>> {
        self.courses.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<Course>> {
        self.courses.write().unwrap_or_else(PoisonError::into_inner)
    }
}
