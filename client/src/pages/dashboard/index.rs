//! `Dashboard/Index`: where a successful login lands.

use leptos::prelude::*;
use leptos_meta::Title;
use protocol::{Page, page_title};
use serde_json::Value;

use crate::components::logo::Logo;
use crate::net::inertia::{Method, Visit};

pub const MODULE: &str = module_path!();

pub fn render(_props: Value) -> AnyView {
    view! { <DashboardPage /> }.into_any()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let current_page = use_context::<RwSignal<Page>>();

    let on_logout = move |_| {
        if let Some(page) = current_page {
            crate::router::visit(page, Visit::new(Method::Post, "/logout"));
        }
    };

    view! {
        <Title text=page_title(Some("Dashboard")) />
        <div class="flex items-center justify-between px-6 py-4 bg-indigo-900">
            <Logo class="text-white" />
            <button class="text-white hover:underline" type="button" on:click=on_logout>
                "Logout"
            </button>
        </div>
        <div class="px-4 py-8 md:p-12">
            <h1 class="mb-8 text-3xl font-bold">"Dashboard"</h1>
            <p class="mb-8 leading-normal">"Hey there! Welcome to Ping CRM."</p>
        </div>
    }
}
