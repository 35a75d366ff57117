use course_core::model::{CourseId, LessonId};

use crate::navigation::NavEntry;

/// Everything a view can ask the shell to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewIntent {
    Navigate(NavEntry),
    Back,
    Forward,
    /// `done` is the state the control was switched to, not a flip.
    ToggleLesson {
        course_id: CourseId,
        lesson_id: LessonId,
        done: bool,
    },
    CompleteCourse(CourseId),
    RequestReset,
    CancelReset,
    ConfirmReset,
}
