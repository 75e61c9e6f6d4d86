//! Toast overlay.

use dioxus::prelude::*;

use crate::app::state::use_app;
use crate::notify::ToastVariant;

/// Renders the visible toasts; each has a close button.
#[component]
pub fn Toaster() -> Element {
    let state = use_app();
    let mut toasts = state.toasts;
    let items: Vec<_> = toasts.read().iter().cloned().collect();

    rsx! {
        div { class: "toaster", role: "status",
            for toast in items {
                article {
                    key: "{toast.id}",
                    class: match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Success => "toast success",
                        ToastVariant::Destructive => "toast destructive",
                    },
                    header {
                        strong { "{toast.title}" }
                        button {
                            class: "outline secondary",
                            r#type: "button",
                            aria_label: "Dismiss",
                            onclick: move |_| toasts.write().dismiss(toast.id),
                            "×"
                        }
                    }
                    if !toast.description.is_empty() {
                        small { "{toast.description}" }
                    }
                }
            }
        }
    }
}
