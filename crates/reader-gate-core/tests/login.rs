// crates/reader-gate-core/tests/login.rs
// ============================================================================
// Module: Login Gate Tests
// Description: Validate login URL rewriting and subsite rejection.
// Purpose: Ensure all federated logins funnel through the primary site.
// Dependencies: reader-gate-core, url
// ============================================================================

//! Behavior tests for login URL rewriting and the subsite error surface.

use reader_gate_core::LoginError;
use reader_gate_core::LoginGate;
use url::Url;

type TestResult = Result<(), String>;

/// Builds the gate under test with a fixed primary endpoint.
fn gate() -> Result<LoginGate, String> {
    let url = Url::parse("https://press.example/wp-login.php").map_err(|err| err.to_string())?;
    Ok(LoginGate::new(url))
}

#[test]
fn primary_site_login_url_passes_through_unchanged() -> TestResult {
    let gate = gate()?;
    let requested =
        Url::parse("https://site-7.press.example/wp-login.php").map_err(|err| err.to_string())?;

    let rewritten = gate.login_url(true, &requested, Some("/reading-room"), true);

    assert_eq!(rewritten, requested);
    Ok(())
}

#[test]
fn non_primary_login_url_is_rewritten_to_the_primary_endpoint() -> TestResult {
    let gate = gate()?;
    let requested =
        Url::parse("https://site-7.press.example/wp-login.php").map_err(|err| err.to_string())?;

    let rewritten = gate.login_url(false, &requested, None, false);

    assert_eq!(rewritten.as_str(), "https://press.example/wp-login.php");
    Ok(())
}

#[test]
fn rewrites_carry_redirect_target_and_reauth_flag() -> TestResult {
    let gate = gate()?;
    let requested =
        Url::parse("https://site-7.press.example/wp-login.php").map_err(|err| err.to_string())?;

    let rewritten =
        gate.login_url(false, &requested, Some("https://site-7.press.example/book/"), true);

    assert_eq!(
        rewritten.as_str(),
        "https://press.example/wp-login.php?redirect_to=https%3A%2F%2Fsite-7.press.example%2Fbook%2F&reauth=1"
    );
    Ok(())
}

#[test]
fn empty_redirect_targets_are_dropped() -> TestResult {
    let gate = gate()?;
    let requested =
        Url::parse("https://site-7.press.example/wp-login.php").map_err(|err| err.to_string())?;

    let rewritten = gate.login_url(false, &requested, Some(""), false);

    assert_eq!(rewritten.as_str(), "https://press.example/wp-login.php");
    Ok(())
}

#[test]
fn federated_login_passes_on_the_primary_site() -> TestResult {
    let gate = gate()?;
    gate.authorize_federated_login(true).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn federated_login_is_rejected_on_subsites() -> TestResult {
    let gate = gate()?;

    match gate.authorize_federated_login(false) {
        Err(error) => {
            assert_eq!(error, LoginError::Subsite);
            assert_eq!(error.code(), "subsite");
            assert_eq!(error.to_string(), "Shibboleth login from subsite is not allowed.");
            Ok(())
        }
        Ok(()) => Err("subsite federated login must be rejected".to_string()),
    }
}
