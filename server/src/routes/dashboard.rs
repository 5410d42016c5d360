//! Dashboard route.

use protocol::pages;

use crate::frontend::{Inertia, InertiaError, InertiaResponse};

/// `GET /dashboard`: landing page after login.
pub async fn index(inertia: Inertia) -> Result<InertiaResponse, InertiaError> {
    inertia.render(pages::DASHBOARD_INDEX, ())
}
