//! `Auth/Login`: demo-account sign-in form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_meta::Title;
use protocol::{Errors, LOGIN_ENDPOINT, LoginForm, Page, page_title};
use serde::Deserialize;
use serde_json::Value;

use crate::components::loading_button::LoadingButton;
use crate::components::logo::Logo;
use crate::components::text_input::TextInput;
use crate::net::inertia::Method;
use crate::state::form::FormState;

pub const MODULE: &str = module_path!();

#[derive(Debug, Default, Deserialize)]
struct LoginProps {
    #[serde(default)]
    errors: Errors,
}

fn parse_props(props: Value) -> LoginProps {
    serde_json::from_value(props).unwrap_or_default()
}

pub fn render(props: Value) -> AnyView {
    let LoginProps { errors } = parse_props(props);
    view! { <LoginPage errors=errors /> }.into_any()
}

#[component]
pub fn LoginPage(#[prop(optional)] errors: Errors) -> impl IntoView {
    let form = RwSignal::new(FormState::new(LoginForm::default()).with_errors(errors));
    let current_page = use_context::<RwSignal<Page>>();

    let set_field = move |field: &'static str, value: Value| {
        form.update(|form| {
            if let Err(e) = form.set_field(field, value) {
                leptos::logging::warn!("login form: {e}");
            }
        });
    };
    let field_error =
        move |field: &'static str| Signal::derive(move || form.with(|form| form.error(field).map(str::to_owned)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(visit) = form.try_update(|form| form.begin_submit(Method::Post, LOGIN_ENDPOINT)).flatten() else {
            return;
        };

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let visit = match current_page {
                Some(page) => crate::router::visit_from(page, visit),
                None => visit,
            };
            let outcome = crate::net::inertia::send(visit).await;
            form.update(|form| form.finish(&outcome));
            if let Some(page) = current_page {
                crate::router::navigate(page, outcome);
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (visit, current_page);
    };

    view! {
        <Title text=page_title(Some("Login")) />
        <div class="flex items-center justify-center p-6 min-h-screen bg-indigo-800">
            <div class="w-full max-w-md">
                <Logo class="block mx-auto w-full max-w-xs text-white" />
                <form class="mt-8 bg-white rounded-lg shadow-xl overflow-hidden" on:submit=on_submit>
                    <div class="px-10 py-12">
                        <h1 class="text-center text-3xl font-bold">"Welcome Back!"</h1>
                        <div class="mt-6 mx-auto w-24 border-b-2"></div>
                        <TextInput
                            label="Email"
                            input_type="email"
                            class="mt-10"
                            autofocus=true
                            autocapitalize="off"
                            value=Signal::derive(move || form.with(|form| form.data().email.clone()))
                            error=field_error("email")
                            on_change=Callback::new(move |value: String| set_field("email", value.into()))
                        />
                        <TextInput
                            label="Password"
                            input_type="password"
                            class="mt-6"
                            value=Signal::derive(move || form.with(|form| form.data().password.clone()))
                            error=field_error("password")
                            on_change=Callback::new(move |value: String| set_field("password", value.into()))
                        />
                        <label class="flex items-center mt-6 select-none" for="remember">
                            <input
                                id="remember"
                                class="mr-1"
                                type="checkbox"
                                prop:checked=move || form.with(|form| form.data().remember)
                                on:change=move |ev| set_field("remember", event_target_checked(&ev).into())
                            />
                            <span class="text-sm">"Remember Me"</span>
                        </label>
                    </div>
                    <div class="flex px-10 py-4 bg-gray-100 border-t border-gray-100">
                        <LoadingButton
                            loading=Signal::derive(move || form.with(FormState::processing))
                            class="btn-indigo ml-auto"
                        >
                            "Login"
                        </LoadingButton>
                    </div>
                </form>
            </div>
        </div>
    }
}
