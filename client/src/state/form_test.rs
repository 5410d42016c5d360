use super::*;
use protocol::{LoginForm, Page};
use serde_json::json;

fn login_form() -> FormState<LoginForm> {
    FormState::new(LoginForm::default())
}

#[test]
fn new_form_is_idle_without_errors() {
    let form = login_form();
    assert!(!form.processing());
    assert!(form.errors().is_empty());
    assert_eq!(form.data().email, "johndoe@example.com");
}

#[test]
fn set_field_updates_typed_value() {
    let mut form = login_form();
    form.set_field("email", "jane@example.com").unwrap();
    form.set_field("remember", true).unwrap();

    assert_eq!(form.data().email, "jane@example.com");
    assert!(form.data().remember);
    assert_eq!(form.data().password, "secret");
}

#[test]
fn set_field_rejects_unknown_field() {
    let mut form = login_form();
    assert_eq!(form.set_field("nickname", "x"), Err(FormError::UnknownField("nickname".to_owned())));
}

#[test]
fn set_field_rejects_wrong_type_and_keeps_value() {
    let mut form = login_form();
    let err = form.set_field("remember", "yes").unwrap_err();
    assert!(matches!(err, FormError::InvalidValue { ref field, .. } if field == "remember"));
    assert!(!form.data().remember);
}

#[test]
fn begin_submit_builds_visit_with_form_data() {
    let mut form = login_form();
    let visit = form.begin_submit(Method::Post, "/login").expect("visit");

    assert!(form.processing());
    assert_eq!(visit.method, Method::Post);
    assert_eq!(visit.url, "/login");
    assert_eq!(
        visit.data,
        Some(json!({"email": "johndoe@example.com", "password": "secret", "remember": false}))
    );
}

#[test]
fn begin_submit_is_refused_while_processing() {
    let mut form = login_form();
    assert!(form.begin_submit(Method::Post, "/login").is_some());
    assert!(form.begin_submit(Method::Post, "/login").is_none());
}

#[test]
fn finish_with_page_takes_its_errors() {
    let mut form = login_form();
    form.begin_submit(Method::Post, "/login");
    let page = Page::new(
        "Auth/Login",
        json!({"errors": {"email": "These credentials do not match our records."}}),
        "/login",
        None,
    );

    form.finish(&VisitOutcome::Page(page));

    assert!(!form.processing());
    assert_eq!(form.error("email"), Some("These credentials do not match our records."));
    assert_eq!(form.error("password"), None);
}

#[test]
fn finish_with_clean_page_clears_errors() {
    let mut errors = Errors::new();
    errors.insert("email".to_owned(), "bad".to_owned());
    let mut form = login_form().with_errors(errors);

    form.finish(&VisitOutcome::Page(Page::new("Dashboard/Index", json!({"errors": {}}), "/dashboard", None)));

    assert!(form.errors().is_empty());
}

#[test]
fn finish_after_failure_keeps_errors_and_allows_resubmit() {
    let mut errors = Errors::new();
    errors.insert("password".to_owned(), "required".to_owned());
    let mut form = login_form().with_errors(errors);
    form.begin_submit(Method::Post, "/login");

    form.finish(&VisitOutcome::Failed("network error".to_owned()));

    assert!(!form.processing());
    assert_eq!(form.error("password"), Some("required"));
    assert!(form.begin_submit(Method::Post, "/login").is_some());
}
