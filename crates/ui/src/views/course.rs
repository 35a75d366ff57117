use course_core::model::CourseId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::navigation::NavEntry;
use crate::views::components::ProgressBar;
use crate::views::{Dispatch, StoreRevision};
use crate::vm::{CourseDetailVm, LessonRowVm, ScreenVm, ViewIntent, render_screen};

#[component]
pub fn CourseView(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<StoreRevision>();

    revision.track();
    let entry = NavEntry::course(course_id);

    match render_screen(&ctx.progress().courses(), &entry) {
        ScreenVm::Course(detail) => rsx! {
            CourseDetail { detail }
        },
        ScreenVm::NotFound { .. } | ScreenVm::Home(_) => rsx! {
            div { class: "empty", "Course not found" }
        },
    }
}

#[component]
fn CourseDetail(detail: CourseDetailVm) -> Element {
    let dispatch = use_context::<Dispatch>();

    let course_id = detail.id.clone();
    let on_complete = move |_: MouseEvent| {
        dispatch.send(ViewIntent::CompleteCourse(course_id.clone()));
    };

    let badge_class = if detail.completion.completed {
        "badge success"
    } else {
        "badge"
    };

    rsx! {
        document::Title { "{detail.window_title()}" }

        div { class: "detail",
            div { class: "panel",
                div { class: "space-between",
                    div {
                        h2 { "{detail.title}" }
                        p { class: "muted", "{detail.description}" }
                    }
                    div {
                        div { class: "{badge_class}", "{detail.completion.label}" }
                    }
                }

                div { class: "small muted section-label", "Lessons" }
                div { class: "lessons",
                    for lesson in detail.lessons.clone() {
                        LessonRow {
                            key: "{lesson.id}",
                            course_id: detail.id.clone(),
                            lesson,
                        }
                    }
                }

                div { class: "row actions",
                    button {
                        id: "backBtn",
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| dispatch.send(ViewIntent::Navigate(NavEntry::Home)),
                        "Back"
                    }
                    if detail.can_mark_complete {
                        button {
                            id: "completeCourseBtn",
                            class: "btn",
                            r#type: "button",
                            onclick: on_complete,
                            "Mark course completed"
                        }
                    } else {
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: true,
                            "Completed"
                        }
                    }
                }
            }

            div { class: "panel",
                div { class: "small muted", "Course progress" }
                ProgressBar { fill_style: detail.completion.bar_style() }

                div { class: "muted small section-label", "Details" }
                ul { class: "details",
                    li { "{detail.lessons_label}" }
                    li { "Completion: {detail.completion.percent}%" }
                }
            }
        }
    }
}

#[component]
fn LessonRow(course_id: CourseId, lesson: LessonRowVm) -> Element {
    let dispatch = use_context::<Dispatch>();

    let lesson_id = lesson.id.clone();
    let on_change = move |evt: FormEvent| {
        dispatch.send(ViewIntent::ToggleLesson {
            course_id: course_id.clone(),
            lesson_id: lesson_id.clone(),
            done: evt.checked(),
        });
    };

    rsx! {
        label { class: "lesson",
            input {
                r#type: "checkbox",
                checked: lesson.done,
                "data-lesson": "{lesson.id}",
                onchange: on_change,
            }
            div { class: "lesson-body",
                div { class: "title", "{lesson.title}" }
                div { class: "meta muted", "{lesson.duration}" }
            }
            div { class: "muted small",
                if lesson.done {
                    "Done"
                }
            }
        }
    }
}
