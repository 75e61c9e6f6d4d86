//! Form inputs bound to signals.

use dioxus::prelude::*;

/// Labelled input writing into `value`.
#[component]
pub fn TextField(
    #[props(into)] label: String,
    value: Signal<String>,
    #[props(into, default = "text".to_string())] kind: String,
    #[props(into, default)] placeholder: String,
    #[props(default)] disabled: bool,
    #[props(default)] required: bool,
) -> Element {
    let mut value = value;

    rsx! {
        label {
            "{label}"
            input {
                r#type: "{kind}",
                value: "{value}",
                placeholder: "{placeholder}",
                disabled,
                required,
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

/// Labelled number input. Non-numeric input leaves the value unchanged.
#[component]
pub fn NumberField(
    #[props(into)] label: String,
    value: Signal<u32>,
    #[props(default)] min: u32,
    #[props(default)] disabled: bool,
) -> Element {
    let mut value = value;

    rsx! {
        label {
            "{label}"
            input {
                r#type: "number",
                min: "{min}",
                value: "{value}",
                disabled,
                oninput: move |evt| {
                    if let Ok(n) = evt.value().trim().parse::<u32>() {
                        value.set(n);
                    }
                },
            }
        }
    }
}

/// Option list for a `<select>`: `(value, label)` pairs.
#[component]
pub fn SelectField(
    #[props(into)] label: String,
    value: Signal<String>,
    options: Vec<(String, String)>,
    #[props(into, default)] placeholder: String,
    #[props(default)] disabled: bool,
) -> Element {
    let mut value = value;
    let current = value();

    rsx! {
        label {
            "{label}"
            select {
                disabled,
                onchange: move |evt| value.set(evt.value()),
                if !placeholder.is_empty() {
                    option { value: "", disabled: true, selected: current.is_empty(), "{placeholder}" }
                }
                for (id, text) in options {
                    option { key: "{id}", value: "{id}", selected: id == current, "{text}" }
                }
            }
        }
    }
}
