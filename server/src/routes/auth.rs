//! Auth routes: login page and login form submission.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use protocol::{Errors, LoginForm, pages};
use serde::Serialize;

use crate::frontend::{Inertia, InertiaError, InertiaResponse};
use crate::services::auth as auth_svc;
use crate::state::AppState;

/// Where a successful login lands.
pub const HOME_PATH: &str = "/dashboard";

#[derive(Debug, Default, Serialize)]
pub struct LoginProps {
    pub errors: Errors,
}

/// `GET /login`: render the login page.
pub async fn show_login(inertia: Inertia) -> Result<InertiaResponse, InertiaError> {
    inertia.render(pages::AUTH_LOGIN, LoginProps::default())
}

/// `POST /logout`: there is no session to drop; send the client back to the login page with a full reload.
pub async fn logout(inertia: Inertia) -> Response {
    inertia.location("/login")
}

/// `POST /login`: check credentials; re-render with field errors or redirect home.
pub async fn login(
    State(state): State<AppState>,
    inertia: Inertia,
    Json(form): Json<LoginForm>,
) -> Result<Response, InertiaError> {
    match auth_svc::attempt_login(&form, &state.config.demo) {
        Ok(()) => {
            tracing::info!(email = %form.email.trim(), remember = form.remember, "login succeeded");
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(errors) => {
            tracing::info!(fields = ?errors.keys().collect::<Vec<_>>(), "login rejected");
            Ok(inertia.render(pages::AUTH_LOGIN, LoginProps { errors })?.into_response())
        }
    }
}
