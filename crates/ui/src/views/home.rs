use dioxus::prelude::*;

use crate::context::AppContext;
use crate::navigation::NavEntry;
use crate::views::components::{ConfirmResetModal, ProgressBar};
use crate::views::{Dispatch, ResetPrompt, StoreRevision};
use crate::vm::{CourseCardVm, ViewIntent, map_home};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<StoreRevision>();
    let prompt = use_context::<ResetPrompt>();
    let dispatch = use_context::<Dispatch>();

    revision.track();
    let home = map_home(&ctx.progress().courses());

    rsx! {
        document::Title { "{home.window_title()}" }

        section { class: "page",
            div { class: "space-between",
                div {
                    h2 { "Available Courses" }
                    p { class: "muted", "Browse courses and track your progress." }
                }
                div { class: "row",
                    button {
                        id: "resetBtn",
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| dispatch.send(ViewIntent::RequestReset),
                        "Reset Progress"
                    }
                }
            }

            div { class: "grid",
                for card in home.cards {
                    CourseCard { key: "{card.id}", card: card.clone() }
                }
            }

            if prompt.is_open() {
                ConfirmResetModal {
                    on_cancel: move |()| dispatch.send(ViewIntent::CancelReset),
                    on_confirm: move |()| dispatch.send(ViewIntent::ConfirmReset),
                }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    let dispatch = use_context::<Dispatch>();

    let open_id = card.id.clone();
    let view_id = card.id.clone();
    let complete_id = card.id.clone();

    // Buttons stop propagation so only clicks on the card body open the course.
    let on_open = move |_: MouseEvent| {
        dispatch.send(ViewIntent::Navigate(NavEntry::course(open_id.clone())));
    };
    let on_view = move |evt: MouseEvent| {
        evt.stop_propagation();
        dispatch.send(ViewIntent::Navigate(NavEntry::course(view_id.clone())));
    };
    let on_complete = move |evt: MouseEvent| {
        evt.stop_propagation();
        dispatch.send(ViewIntent::CompleteCourse(complete_id.clone()));
    };

    rsx! {
        article { class: "card", onclick: on_open,
            div { class: "meta",
                div {
                    h3 { "{card.title}" }
                    p { class: "muted", "{card.description}" }
                }
                div { class: "meta-status",
                    if card.completion.completed {
                        span { class: "badge success", "Completed" }
                    } else {
                        span { class: "small muted", "{card.completion.label}" }
                    }
                }
            }

            ProgressBar { fill_style: card.completion.bar_style() }

            div { class: "space-between",
                div { class: "small muted", "{card.lessons_label}" }
                div { class: "row",
                    if card.can_mark_complete {
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: on_complete,
                            "Mark Completed"
                        }
                    } else {
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: true,
                            onclick: move |evt: MouseEvent| evt.stop_propagation(),
                            "Completed"
                        }
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: on_view,
                        "View"
                    }
                }
            }
        }
    }
}
