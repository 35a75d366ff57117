use course_core::model::{Course, CourseId, LessonId};

use crate::navigation::NavEntry;

const APP_NAME: &str = "Course Tracker";

/// Either "Completed" or the live percentage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub completed: bool,
    pub percent: u8,
    pub label: String,
}

impl CompletionVm {
    #[must_use]
    pub fn for_course(course: &Course) -> Self {
        let percent = course.completion_percent();
        let label = if course.completed() {
            "Completed".to_string()
        } else {
            format!("{percent}%")
        };
        Self {
            completed: course.completed(),
            percent,
            label,
        }
    }

    /// Inline style for the progress bar fill.
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width:{}%", self.percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub completion: CompletionVm,
    pub lessons_label: String,
    pub can_mark_complete: bool,
}

impl From<&Course> for CourseCardVm {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id().clone(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            completion: CompletionVm::for_course(course),
            lessons_label: lessons_label(course.lessons().len()),
            can_mark_complete: !course.completed(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub cards: Vec<CourseCardVm>,
}

impl HomeVm {
    #[must_use]
    pub fn window_title(&self) -> String {
        format!("{APP_NAME} — Home")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub id: LessonId,
    pub title: String,
    pub duration: String,
    pub done: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseDetailVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub completion: CompletionVm,
    pub lessons: Vec<LessonRowVm>,
    pub lessons_label: String,
    pub can_mark_complete: bool,
}

impl CourseDetailVm {
    #[must_use]
    pub fn window_title(&self) -> String {
        format!("{APP_NAME} — {}", self.title)
    }
}

impl From<&Course> for CourseDetailVm {
    fn from(course: &Course) -> Self {
        let lessons = course
            .lessons()
            .iter()
            .map(|lesson| LessonRowVm {
                id: lesson.id().clone(),
                title: lesson.title().to_owned(),
                duration: lesson.duration().to_owned(),
                done: course.lesson_done(lesson.id()).unwrap_or(false),
            })
            .collect();

        Self {
            id: course.id().clone(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            completion: CompletionVm::for_course(course),
            lessons,
            lessons_label: lessons_label(course.lessons().len()),
            can_mark_complete: !course.completed(),
        }
    }
}

/// Everything a screen needs, derived from the store and the current entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenVm {
    Home(HomeVm),
    Course(CourseDetailVm),
    NotFound { course_id: CourseId },
}

/// Pure render step: no I/O, no mutation.
#[must_use]
pub fn render_screen(courses: &[Course], entry: &NavEntry) -> ScreenVm {
    match entry {
        NavEntry::Home => ScreenVm::Home(map_home(courses)),
        NavEntry::Course { course_id } => courses
            .iter()
            .find(|course| course.id() == course_id)
            .map_or_else(
                || ScreenVm::NotFound {
                    course_id: course_id.clone(),
                },
                |course| ScreenVm::Course(CourseDetailVm::from(course)),
            ),
    }
}

#[must_use]
pub fn map_home(courses: &[Course]) -> HomeVm {
    HomeVm {
        cards: courses.iter().map(CourseCardVm::from).collect(),
    }
}

/// One plain-text line per course, used by the CLI status command.
#[must_use]
pub fn format_status_line(card: &CourseCardVm) -> String {
    let mark = if card.completion.completed { "x" } else { " " };
    format!(
        "[{mark}] {:<4} {:<36} {:>9}  ({})",
        card.id.as_str(),
        card.title,
        card.completion.label,
        card.lessons_label
    )
}

fn lessons_label(count: usize) -> String {
    if count == 1 {
        "1 lesson".to_string()
    } else {
        format!("{count} lessons")
    }
}
