//! Root component and browser bootstrap.
//!
//! DESIGN
//! ======
//! The server embeds the first page object in `#app[data-page]`. `boot` reads
//! it, builds the page registry, and mounts `App` into that element. From then
//! on the current page is an `RwSignal<Page>` in context; visits replace it and
//! the view re-renders whatever component it names.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use protocol::Page;

use crate::pages;

/// Element the server renders the page object into.
pub const APP_ELEMENT_ID: &str = "app";

/// Attribute holding the serialized page object.
pub const PAGE_ATTRIBUTE: &str = "data-page";

/// Parse the page object embedded in the HTML shell.
///
/// # Errors
///
/// Returns the JSON error when the attribute is not a page object.
pub fn read_initial_page(raw: &str) -> Result<Page, serde_json::Error> {
    serde_json::from_str(raw)
}

#[component]
pub fn App(initial: Page) -> impl IntoView {
    provide_meta_context();
    let page = RwSignal::new(initial);
    provide_context(page);

    #[cfg(feature = "csr")]
    crate::router::install_history(page);

    view! { {move || page.with(pages::render)} }
}

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn boot() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let registry = pages::registry();
    log::debug!("registered pages: {:?}", registry.names().collect::<Vec<_>>());

    let Some(root) = document().get_element_by_id(APP_ELEMENT_ID) else {
        log::error!("missing #{APP_ELEMENT_ID} element");
        return;
    };
    let raw = root.get_attribute(PAGE_ATTRIBUTE).unwrap_or_default();
    let initial = match read_initial_page(&raw) {
        Ok(initial) => initial,
        Err(e) => {
            log::error!("invalid {PAGE_ATTRIBUTE} attribute: {e}");
            return;
        }
    };
    let Ok(root) = root.dyn_into::<web_sys::HtmlElement>() else {
        log::error!("#{APP_ELEMENT_ID} is not an HTML element");
        return;
    };

    leptos::mount::mount_to(root, move || view! { <App initial=initial /> }).forget();
}
