use crate::model::ids::LessonId;

/// A single content item within a course. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    duration: String,
}

impl Lesson {
    /// `duration` is a display label such as `"10m"`, never parsed.
    #[must_use]
    pub fn new(id: LessonId, title: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            duration: duration.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }
}

/// Per-lesson completion flag, parallel to the course's lesson list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonProgress {
    lesson_id: LessonId,
    done: bool,
}

impl LessonProgress {
    #[must_use]
    pub fn new(lesson_id: LessonId, done: bool) -> Self {
        Self { lesson_id, done }
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn done(&self) -> bool {
        self.done
    }

    pub(crate) fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}
