//! Page components and the registry that resolves them by name.
//!
//! ARCHITECTURE
//! ============
//! The server names pages logically (`"Auth/Login"`); each page module here
//! exports its own `module_path!()` and a `render` entry point, and the logical
//! name is derived from where the module sits under `pages`:
//! `pages::auth::login` resolves as `Auth/Login`. Adding a page means adding a
//! module and listing it in `PAGE_MODULES`.
//!
//! The registry is built once (eagerly at boot) and resolution is a plain map
//! lookup, so the first screen renders without waiting on anything.


pub mod auth;
pub mod dashboard;

use std::collections::HashMap;
use std::sync::OnceLock;

use leptos::prelude::*;
use protocol::Page;
use serde_json::Value;

/// Renders a page from its props.
pub type PageFn = fn(Value) -> AnyView;

const PAGES_SEGMENT: &str = "pages";

const PAGE_MODULES: &[(&str, PageFn)] = &[
    (auth::login::MODULE, auth::login::render),
    (dashboard::index::MODULE, dashboard::index::render),
];

static REGISTRY: OnceLock<PageRegistry> = OnceLock::new();

#[derive(Debug)]
pub struct PageRegistry {
    pages: HashMap<String, PageFn>,
}

impl PageRegistry {
    fn discover() -> Self {
        let pages = PAGE_MODULES
            .iter()
            .filter_map(|&(module, render)| logical_name(module).map(|name| (name, render)))
            .collect();
        Self { pages }
    }

    pub fn resolve(&self, name: &str) -> Option<PageFn> {
        self.pages.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static PageRegistry {
    REGISTRY.get_or_init(PageRegistry::discover)
}

pub fn resolve(name: &str) -> Option<PageFn> {
    registry().resolve(name)
}

/// Render the page object with its registered component.
///
/// # Panics
///
/// Panics when no page is registered under `page.component`; the server and
/// client disagree on page names, which is a build error.
pub fn render(page: &Page) -> AnyView {
    let Some(page_fn) = resolve(&page.component) else {
        panic!("no page component registered for {:?}", page.component);
    };
    page_fn(page.props.clone())
}

/// Logical page name for a module path: the segments after `pages`, each in
/// PascalCase, joined by `/`.
pub fn logical_name(module_path: &str) -> Option<String> {
    let mut segments = module_path.split("::").skip_while(|segment| *segment != PAGES_SEGMENT).skip(1).peekable();
    segments.peek()?;
    Some(segments.map(pascal_case).collect::<Vec<_>>().join("/"))
}

fn pascal_case(segment: &str) -> String {
    segment
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        })
        .collect()
}
