mod course;
mod ids;
mod lesson;

pub use course::{Course, CourseError, completion_percent};
pub use ids::{CourseId, LessonId};
pub use lesson::{Lesson, LessonProgress};
