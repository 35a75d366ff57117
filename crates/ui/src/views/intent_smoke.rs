use std::sync::Arc;

use course_core::Catalog;
use course_core::model::{CourseId, LessonId};
use services::PROGRESS_SLOT_KEY;
use storage::repository::{SlotRepository, Storage};
use storage::snapshot::decode_snapshot;

use crate::navigation::NavEntry;
use crate::vm::ViewIntent;

use super::test_harness::{setup_view_harness, setup_view_harness_with_storage};

fn toggle(course: &str, lesson: &str, done: bool) -> ViewIntent {
    ViewIntent::ToggleLesson {
        course_id: CourseId::new(course),
        lesson_id: LessonId::new(lesson),
        done,
    }
}

fn open(course: &str) -> ViewIntent {
    ViewIntent::Navigate(NavEntry::course(CourseId::new(course)))
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_toggle_updates_badge_and_percent_in_place() {
    let mut harness = setup_view_harness(NavEntry::course(CourseId::new("c1"))).await;
    harness.rebuild();
    assert!(harness.render().contains("Completion: 0%"));

    harness.send(toggle("c1", "c1-l1", true));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completion: 33%"), "{html}");
    assert!(html.contains("width:33%"), "{html}");
    assert_eq!(html.matches(">Done<").count(), 1, "{html}");

    harness.send(toggle("c1", "c1-l2", true));
    harness.send(toggle("c1", "c1-l3", true));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completion: 100%"), "{html}");
    assert!(html.contains("badge success"), "{html}");
    assert!(!html.contains("Mark course completed"), "{html}");
    let c1 = harness.progress.find_course(&CourseId::new("c1")).unwrap();
    assert!(c1.completed());

    harness.send(toggle("c1", "c1-l2", false));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completion: 67%"), "{html}");
    assert!(!html.contains("badge success"), "{html}");
    assert!(html.contains("Mark course completed"), "{html}");
    let c1 = harness.progress.find_course(&CourseId::new("c1")).unwrap();
    assert!(!c1.completed());
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_toggle_applies_the_requested_state() {
    let c2 = CourseId::new("c2");
    let flexbox = LessonId::new("c2-l1");
    let mut harness = setup_view_harness(NavEntry::course(c2.clone())).await;
    harness
        .progress
        .toggle_lesson(&c2, &flexbox, true)
        .await
        .expect("toggle");
    harness.rebuild();

    // A repeated "checked" leaves the lesson done instead of flipping it.
    harness.send(toggle("c2", "c2-l1", true));
    harness.drive_async().await;
    let course = harness.progress.find_course(&c2).unwrap();
    assert_eq!(course.lesson_done(&flexbox), Some(true));
    assert_eq!(harness.render().matches(">Done<").count(), 1);

    harness.send(toggle("c2", "c2-l1", false));
    harness.send(toggle("c2", "c2-l1", false));
    harness.drive_async().await;
    let course = harness.progress.find_course(&c2).unwrap();
    assert_eq!(course.lesson_done(&flexbox), Some(false));
    let html = harness.render();
    assert_eq!(html.matches(">Done<").count(), 0, "{html}");
    assert!(html.contains("Completion: 0%"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn card_open_and_history_buttons_rederive_views() {
    let mut harness = setup_view_harness(NavEntry::Home).await;
    harness.rebuild();
    assert!(harness.render().contains("Available Courses"));

    harness.send(open("c2"));
    let html = harness.render();
    assert!(html.contains("Flexbox"), "{html}");
    assert!(html.contains("Mark course completed"), "{html}");
    assert!(!html.contains("Available Courses"), "{html}");

    harness.send(ViewIntent::Back);
    assert!(harness.render().contains("Available Courses"));

    harness.send(ViewIntent::Forward);
    assert!(harness.render().contains("Flexbox"));

    harness.send(ViewIntent::Navigate(NavEntry::Home));
    assert!(harness.render().contains("Available Courses"));

    harness.send(ViewIntent::Back);
    assert!(harness.render().contains("Flexbox"));
}

#[tokio::test(flavor = "current_thread")]
async fn mark_completed_from_card_stays_on_home() {
    let mut harness = setup_view_harness(NavEntry::Home).await;
    harness.rebuild();

    harness.send(ViewIntent::CompleteCourse(CourseId::new("c3")));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Available Courses"), "{html}");
    assert!(html.contains("badge success"), "{html}");
    assert_eq!(html.matches("Mark Completed").count(), 2, "{html}");
    let c3 = harness.progress.find_course(&CourseId::new("c3")).unwrap();
    assert!(c3.completed());
    assert!(c3.lessons_progress().iter().all(|p| p.done()));
}

#[tokio::test(flavor = "current_thread")]
async fn reset_runs_only_after_confirmation() {
    let storage = Storage::in_memory();
    let slots = Arc::clone(&storage.slots);
    let c1 = CourseId::new("c1");
    let mut harness = setup_view_harness_with_storage(NavEntry::Home, storage).await;
    harness
        .progress
        .mark_course_completed(&c1)
        .await
        .expect("complete");
    harness.rebuild();

    harness.send(ViewIntent::ConfirmReset);
    harness.drive_async().await;
    assert!(harness.progress.find_course(&c1).unwrap().completed());

    harness.send(ViewIntent::RequestReset);
    assert!(harness.render().contains("Reset all progress?"));

    harness.send(ViewIntent::CancelReset);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Reset all progress?"), "{html}");
    assert!(html.contains("badge success"), "{html}");
    assert!(harness.progress.find_course(&c1).unwrap().completed());

    harness.send(ViewIntent::RequestReset);
    harness.send(ViewIntent::ConfirmReset);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Reset all progress?"), "{html}");
    assert!(!html.contains("badge success"), "{html}");
    assert_eq!(html.matches("Mark Completed").count(), 3, "{html}");

    let seed = Catalog::builtin().unwrap().attach_progress();
    assert_eq!(harness.progress.courses(), seed);
    let raw = slots
        .read_slot(PROGRESS_SLOT_KEY)
        .await
        .expect("read slot")
        .expect("slot written");
    assert_eq!(decode_snapshot(&raw).expect("decode"), seed);
}
