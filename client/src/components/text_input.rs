//! Labeled text input with an inline error.

#[cfg(test)]
#[path = "text_input_test.rs"]
mod text_input_test;

use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::prelude::*;

static NEXT_INPUT_ID: AtomicUsize = AtomicUsize::new(1);

/// Unique element id linking a label to its input.
pub fn next_input_id() -> String {
    format!("text-input-{}", NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed))
}

pub fn input_class(has_error: bool) -> &'static str {
    if has_error { "form-input error" } else { "form-input" }
}

/// Controlled text input. `on_change` fires with the new value on every
/// input event; the caller owns the value.
#[component]
pub fn TextInput(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] class: String,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] autofocus: bool,
    #[prop(optional)] autocapitalize: Option<&'static str>,
) -> impl IntoView {
    let id = next_input_id();
    let has_error = move || error.get().is_some();

    view! {
        <div class=class>
            <label class="form-label" for=id.clone()>
                {format!("{label}:")}
            </label>
            <input
                id=id
                class=move || input_class(has_error())
                type=input_type
                autofocus=autofocus
                autocapitalize=autocapitalize
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=has_error>
                <div class="form-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
        </div>
    }
}
