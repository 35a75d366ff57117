mod course_vm;
mod intent;

pub use course_vm::{
    CompletionVm, CourseCardVm, CourseDetailVm, HomeVm, LessonRowVm, ScreenVm,
    format_status_line, map_home, render_screen,
};
pub use intent::ViewIntent;
