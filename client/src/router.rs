//! Applying visit outcomes to the current page.
//!
//! ARCHITECTURE
//! ============
//! The current `Page` lives in an `RwSignal` provided by `App`. After a visit
//! settles, `next_navigation` decides between keeping the page (the form
//! already took its errors), swapping in the returned page, or handing the URL
//! to the browser for a full load. Browser builds also push history entries so
//! back/forward restore earlier pages.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use leptos::prelude::*;
use protocol::Page;

use crate::net::inertia::{Visit, VisitOutcome};

#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    Stay,
    Swap(Page),
    Reload(String),
}

pub fn next_navigation(current: &Page, outcome: VisitOutcome) -> Navigation {
    match outcome {
        // Same screen re-rendered with errors: keep the mounted form so typed values survive.
        VisitOutcome::Page(page) if page.component == current.component && page.has_errors() => Navigation::Stay,
        VisitOutcome::Page(page) => Navigation::Swap(page),
        VisitOutcome::Location(url) => Navigation::Reload(url),
        VisitOutcome::Failed(_) => Navigation::Stay,
    }
}

/// Settle `outcome` against the page signal.
pub fn navigate(page: RwSignal<Page>, outcome: VisitOutcome) {
    if let VisitOutcome::Failed(reason) = &outcome {
        leptos::logging::warn!("inertia visit failed: {reason}");
    }
    match page.with_untracked(|current| next_navigation(current, outcome)) {
        Navigation::Stay => {}
        Navigation::Swap(next) => {
            push_history(&next);
            page.set(next);
        }
        Navigation::Reload(url) => reload(&url),
    }
}

/// Build a visit stamped with the current page's asset version.
pub fn visit_from(page: RwSignal<Page>, visit: Visit) -> Visit {
    let version = page.with_untracked(|current| current.version.clone());
    visit.with_version(version)
}

/// Send a visit that no form owns (links, logout buttons).
pub fn visit(page: RwSignal<Page>, visit: Visit) {
    let visit = visit_from(page, visit);
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let outcome = crate::net::inertia::send(visit).await;
        navigate(page, outcome);
    });
    #[cfg(not(feature = "csr"))]
    let _ = visit;
}

#[cfg(feature = "csr")]
fn push_history(page: &Page) {
    let Ok(state) = serde_json::to_string(page) else { return };
    if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
        let _ = history.push_state_with_url(&wasm_bindgen::JsValue::from_str(&state), "", Some(&page.url));
    }
}

#[cfg(not(feature = "csr"))]
fn push_history(_page: &Page) {}

#[cfg(feature = "csr")]
fn reload(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

#[cfg(not(feature = "csr"))]
fn reload(_url: &str) {}

/// Record the initial page and restore pages on back/forward.
#[cfg(feature = "csr")]
pub fn install_history(page: RwSignal<Page>) {
    if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
        if let Ok(state) = page.with_untracked(serde_json::to_string) {
            let _ = history.replace_state(&wasm_bindgen::JsValue::from_str(&state), "");
        }
    }

    let handle = window_event_listener(leptos::ev::popstate, move |ev: web_sys::PopStateEvent| {
        let restored = ev.state().as_string().and_then(|raw| serde_json::from_str::<Page>(&raw).ok());
        match restored {
            Some(restored) => page.set(restored),
            None => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            }
        }
    });
    // Lives as long as the app.
    std::mem::forget(handle);
}
