//! Submit button that locks itself while a request is in flight.

use leptos::prelude::*;

#[component]
pub fn LoadingButton(
    #[prop(into)] loading: Signal<bool>,
    #[prop(optional, into)] class: String,
    #[prop(default = "submit")] button_type: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <button class=format!("flex items-center {class}") type=button_type disabled=move || loading.get()>
            <Show when=move || loading.get()>
                <div class="btn-spinner mr-2"></div>
            </Show>
            {children()}
        </button>
    }
}
