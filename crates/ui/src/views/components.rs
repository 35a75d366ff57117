use dioxus::prelude::*;

#[component]
pub fn ProgressBar(fill_style: String) -> Element {
    rsx! {
        div { class: "progress-wrap", "aria-hidden": "true",
            div { class: "progress", style: "{fill_style}" }
        }
    }
}

#[component]
pub fn ConfirmResetModal(on_cancel: Callback<()>, on_confirm: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Reset all progress?" }
                p { class: "modal-body",
                    "Every course and lesson will be marked as not started."
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Reset"
                    }
                }
            }
        }
    }
}
