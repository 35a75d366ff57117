use course_core::model::{CourseId, LessonId};
use services::PROGRESS_SLOT_KEY;
use storage::repository::{SlotRepository, Storage};

use crate::navigation::NavEntry;

use super::test_harness::{setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_course_cards() {
    let mut harness = setup_view_harness(NavEntry::Home).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Available Courses"), "missing heading in {html}");
    assert!(html.contains("Introduction to Web Development"), "missing c1 in {html}");
    assert!(html.contains("Responsive Design"), "missing c2 in {html}");
    assert!(html.contains("JavaScript Essentials"), "missing c3 in {html}");
    assert_eq!(html.matches("Mark Completed").count(), 3, "{html}");
    assert!(html.contains("Reset Progress"), "missing reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_completed_badge() {
    let mut harness = setup_view_harness(NavEntry::Home).await;
    harness
        .progress
        .mark_course_completed(&CourseId::new("c2"))
        .await
        .expect("complete c2");
    harness
        .progress
        .toggle_lesson(&CourseId::new("c1"), &LessonId::new("c1-l1"), true)
        .await
        .expect("toggle c1-l1");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("badge success"), "missing badge in {html}");
    assert!(html.contains("33%"), "missing c1 percent in {html}");
    assert!(html.contains("width:100%"), "missing full bar in {html}");
    assert_eq!(html.matches("Mark Completed").count(), 2, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_renders_checklist() {
    let mut harness = setup_view_harness(NavEntry::course(CourseId::new("c3"))).await;
    harness
        .progress
        .toggle_lesson(&CourseId::new("c3"), &LessonId::new("c3-l2"), true)
        .await
        .expect("toggle");

    harness.rebuild();
    let html = harness.render();

    let first = html.find("Variables &amp; Types").expect("first lesson escaped");
    let second = html.find("Functions").expect("second lesson");
    let third = html.find("Async Basics").expect("third lesson");
    assert!(first < second && second < third, "lessons out of order in {html}");
    assert!(html.contains("20m"), "missing duration in {html}");
    assert!(html.contains("Completion: 33%"), "missing completion in {html}");
    assert!(html.contains("Mark course completed"), "missing action in {html}");
    assert!(html.contains("Back"), "missing back in {html}");
    assert_eq!(html.matches(">Done<").count(), 1, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_view_smoke_completed_course_disables_action() {
    let mut harness = setup_view_harness(NavEntry::course(CourseId::new("c1"))).await;
    harness
        .progress
        .mark_course_completed(&CourseId::new("c1"))
        .await
        .expect("complete");

    harness.rebuild();
    let html = harness.render();
    assert!(!html.contains("Mark course completed"), "action still offered in {html}");
    assert!(html.contains("Completion: 100%"), "missing completion in {html}");
    assert_eq!(html.matches(">Done<").count(), 3, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_course_renders_not_found_without_mutation() {
    let mut harness = setup_view_harness(NavEntry::course(CourseId::new("c404"))).await;
    let before = harness.progress.courses();

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Course not found"), "missing placeholder in {html}");
    assert!(!html.contains("Mark course completed"), "{html}");
    assert_eq!(harness.progress.courses(), before);
}

#[tokio::test(flavor = "current_thread")]
async fn stored_markup_is_rendered_as_text() {
    let storage = Storage::in_memory();
    let snapshot = r#"[{"id":"x1","title":"<script>alert(1)</script>",
        "description":"<img src=x onerror=alert(2)>",
        "lessons":[{"id":"x1-l1","title":"<b>bold</b>","duration":"<i>5m</i>"}],
        "completed":false,
        "lessonsProgress":[{"lessonId":"x1-l1","done":false}]}]"#;
    storage
        .slots
        .write_slot(PROGRESS_SLOT_KEY, snapshot)
        .await
        .expect("seed slot");

    let mut harness =
        setup_view_harness_with_storage(NavEntry::course(CourseId::new("x1")), storage).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("alert(1)"), "missing title text in {html}");
    assert!(!html.contains("<script>"), "raw script tag in {html}");
    assert!(!html.contains("<img"), "raw img tag in {html}");
    assert!(!html.contains("<b>"), "raw bold tag in {html}");
    assert!(!html.contains("<i>"), "raw italic tag in {html}");
}
