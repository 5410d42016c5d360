use leptos::prelude::*;

#[component]
pub fn Logo(#[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <div class=format!("logo {class}")>
            <span class="logo__mark">"Ping"</span>
            <span class="logo__text">" CRM"</span>
        </div>
    }
}
