use dioxus::prelude::*;

/// Dismissible inline error banner.
#[component]
pub fn ErrorMessage(
    message: String,
    on_close: EventHandler<()>,
    #[props(default = "".to_string())] class: String,
) -> Element {
    rsx! {
        div {
            class: "error-message {class}",
            "role": "alert",
            span { "{message}" }
            button {
                class: "error-message-close",
                "aria-label": "Dismiss",
                onclick: move |_| on_close.call(()),
                "×"
            }
        }
    }
}
