mod components;
mod course;
mod home;
mod shell;

#[cfg(test)]
mod intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use course::CourseView;
pub use home::HomeView;
pub use shell::{Dispatch, ResetPrompt, Shell, StoreRevision};
