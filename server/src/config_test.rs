use super::*;

// =============================================================================
// parse_port
// =============================================================================

#[test]
fn port_defaults_when_unset_or_blank() {
    assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
    assert_eq!(parse_port(Some("  ")).unwrap(), DEFAULT_PORT);
}

#[test]
fn port_parses_trimmed_value() {
    assert_eq!(parse_port(Some(" 3000 ")).unwrap(), 3000);
}

#[test]
fn port_rejects_garbage() {
    let err = parse_port(Some("eighty")).unwrap_err().to_string();
    assert!(err.contains("PORT"));
    assert!(err.contains("eighty"));
}

#[test]
fn port_rejects_out_of_range() {
    assert!(parse_port(Some("70000")).is_err());
}

// =============================================================================
// parse_mode
// =============================================================================

#[test]
fn mode_defaults_to_build_profile() {
    assert_eq!(parse_mode(None).unwrap(), FrontendMode::for_build());
}

#[test]
fn mode_accepts_long_and_short_names() {
    assert_eq!(parse_mode(Some("development")).unwrap(), FrontendMode::Development);
    assert_eq!(parse_mode(Some("DEV")).unwrap(), FrontendMode::Development);
    assert_eq!(parse_mode(Some("Production")).unwrap(), FrontendMode::Production);
    assert_eq!(parse_mode(Some("prod")).unwrap(), FrontendMode::Production);
}

#[test]
fn mode_rejects_unknown_value() {
    let err = parse_mode(Some("staging")).unwrap_err().to_string();
    assert!(err.contains("FRONTEND_MODE"));
}

#[test]
fn debug_build_defaults_to_development() {
    // Tests are built with debug assertions unless run with --release.
    if cfg!(debug_assertions) {
        assert_eq!(FrontendMode::for_build(), FrontendMode::Development);
    } else {
        assert_eq!(FrontendMode::for_build(), FrontendMode::Production);
    }
}

// =============================================================================
// parse_secs / env_or: unique env var names avoid races with parallel tests.
// =============================================================================

#[test]
fn secs_default_and_parse() {
    assert_eq!(parse_secs("X", None).unwrap(), DEFAULT_VITE_DEV_WAIT_SECS);
    assert_eq!(parse_secs("X", Some("3")).unwrap(), 3);
    assert!(parse_secs("X", Some("-1")).is_err());
}

#[test]
fn env_or_prefers_set_value() {
    let key = "__TEST_PINGCRM_ENV_OR_311__";
    unsafe { std::env::set_var(key, "custom") };
    assert_eq!(env_or(key, "fallback"), "custom");
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_or_falls_back_when_unset() {
    assert_eq!(env_or("__TEST_PINGCRM_SURELY_UNSET_312__", "fallback"), "fallback");
}
