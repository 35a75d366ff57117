#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::navigation::{NavEntry, Navigation};
use crate::views::{CourseView, HomeView};
use crate::vm::ViewIntent;

/// Change counter for the progress store. Views read it to re-render after a
/// mutation; mutators bump it once their write has finished.
#[derive(Clone, Copy)]
pub struct StoreRevision(Signal<u64>);

impl StoreRevision {
    /// Subscribe the calling component to store changes.
    pub fn track(&self) -> u64 {
        *self.0.read()
    }

    pub fn bump(self) {
        let mut signal = self.0;
        *signal.write() += 1;
    }
}

/// Whether the reset confirmation is showing.
#[derive(Clone, Copy)]
pub struct ResetPrompt(Signal<bool>);

impl ResetPrompt {
    pub fn is_open(&self) -> bool {
        *self.0.read()
    }
}

/// Handle views use to send intents to the shell.
#[derive(Clone, Copy)]
pub struct Dispatch(Callback<ViewIntent>);

impl Dispatch {
    pub fn send(&self, intent: ViewIntent) {
        self.0.call(intent);
    }
}

#[component]
pub fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_signal(|| Navigation::new(ctx.initial_entry()));
    let revision = use_context_provider(|| StoreRevision(Signal::new(0)));
    let prompt = use_context_provider(|| ResetPrompt(Signal::new(false)));

    let dispatch_intent = {
        let progress = ctx.progress();
        use_callback(move |intent: ViewIntent| {
            let mut nav = nav;
            let mut prompt = prompt.0;

            match intent {
                ViewIntent::Navigate(entry) => nav.write().push(entry),
                ViewIntent::Back => {
                    nav.write().back();
                }
                ViewIntent::Forward => {
                    nav.write().forward();
                }
                ViewIntent::ToggleLesson {
                    course_id,
                    lesson_id,
                    done,
                } => {
                    let progress = progress.clone();
                    spawn(async move {
                        if let Err(err) = progress.toggle_lesson(&course_id, &lesson_id, done).await
                        {
                            tracing::warn!(
                                course = %course_id,
                                lesson = %lesson_id,
                                error = %err,
                                "lesson change was not persisted"
                            );
                        }
                        revision.bump();
                    });
                }
                ViewIntent::CompleteCourse(course_id) => {
                    let progress = progress.clone();
                    spawn(async move {
                        if let Err(err) = progress.mark_course_completed(&course_id).await {
                            tracing::warn!(
                                course = %course_id,
                                error = %err,
                                "completion was not persisted"
                            );
                        }
                        revision.bump();
                    });
                }
                ViewIntent::RequestReset => prompt.set(true),
                ViewIntent::CancelReset => prompt.set(false),
                ViewIntent::ConfirmReset => {
                    // Only a showing confirmation can be confirmed.
                    if !*prompt.peek() {
                        return;
                    }
                    prompt.set(false);
                    let progress = progress.clone();
                    spawn(async move {
                        if let Err(err) = progress.reset().await {
                            tracing::warn!(error = %err, "reset was not persisted");
                        }
                        revision.bump();
                    });
                }
            }
        })
    };
    let dispatch = use_context_provider(|| Dispatch(dispatch_intent));

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ShellTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let (entry, can_go_back, can_go_forward) = {
        let nav = nav.read();
        (nav.current().clone(), nav.can_go_back(), nav.can_go_forward())
    };

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { class: "brand", "Course Tracker" }
                nav { class: "row",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: "Back",
                        disabled: !can_go_back,
                        onclick: move |_| dispatch.send(ViewIntent::Back),
                        "‹"
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: "Forward",
                        disabled: !can_go_forward,
                        onclick: move |_| dispatch.send(ViewIntent::Forward),
                        "›"
                    }
                    button {
                        id: "homeBtn",
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| dispatch.send(ViewIntent::Navigate(NavEntry::Home)),
                        "Home"
                    }
                }
            }
            main { class: "content",
                match entry {
                    NavEntry::Home => rsx! { HomeView {} },
                    NavEntry::Course { course_id } => rsx! { CourseView { course_id } },
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ShellTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ViewIntent>>>>,
}

#[cfg(test)]
impl ShellTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ViewIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<ViewIntent> {
        (*self.dispatch.borrow()).expect("shell dispatch registered")
    }
}
