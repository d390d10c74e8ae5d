// crates/reader-gate-core/tests/pipeline.rs
// ============================================================================
// Module: Authentication Pipeline Tests
// Description: Validate the fixed-order login and capability flow end to end.
// Purpose: Ensure recording precedes evaluation and raw policy values map safely.
// Dependencies: reader-gate-core, url
// ============================================================================

//! End-to-end pipeline tests over the in-memory reference stores.

use reader_gate_core::AuthPipeline;
use reader_gate_core::CapabilityRequest;
use reader_gate_core::CapabilitySet;
use reader_gate_core::GrantOutcome;
use reader_gate_core::InMemoryAttributeStore;
use reader_gate_core::InMemoryRoleStore;
use reader_gate_core::LoginGate;
use reader_gate_core::PipelineError;
use reader_gate_core::READ_CAPABILITY;
use reader_gate_core::Recorded;
use reader_gate_core::RoleName;
use reader_gate_core::RoleStore;
use reader_gate_core::UserId;
use url::Url;

type TestResult = Result<(), String>;

/// Test fixture holding the stores behind a pipeline.
struct Fixture {
    /// Role registry seeded with the subscriber role.
    roles: InMemoryRoleStore,
    /// Attribute store for federated markers and affiliations.
    attributes: InMemoryAttributeStore,
}

impl Fixture {
    /// Builds seeded stores and the primary login endpoint.
    fn new() -> Result<Self, String> {
        let roles = InMemoryRoleStore::new();
        let mut capabilities = CapabilitySet::new();
        capabilities.set(READ_CAPABILITY, true);
        roles
            .register_role(RoleName::subscriber(), capabilities)
            .map_err(|err| err.to_string())?;
        Ok(Self {
            roles,
            attributes: InMemoryAttributeStore::new(),
        })
    }

    /// Builds the pipeline over the fixture stores.
    fn pipeline(&self) -> Result<AuthPipeline<'_>, String> {
        let url = Url::parse("https://press.example/wp-login.php").map_err(|err| err.to_string())?;
        Ok(AuthPipeline::new(&self.roles, &self.attributes, LoginGate::new(url)))
    }
}

/// Builds a user identifier for tests.
fn user_id(raw: u64) -> Result<UserId, String> {
    UserId::from_raw(raw).ok_or_else(|| "user id must be non-zero".to_string())
}

#[test]
fn login_records_affiliations_then_checks_grant_from_them() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let user = user_id(1)?;
    fixture.attributes.set_federated(user, true).map_err(|err| err.to_string())?;

    let recorded = pipeline
        .handle_login(true, user, Some("phzh.ch;unrelated.example"))
        .map_err(|err| err.to_string())?;
    assert_eq!(
        recorded,
        Recorded::Stored {
            count: 2,
        }
    );

    let request = CapabilityRequest::single(READ_CAPABILITY);
    let evaluation = pipeline
        .check_capabilities(&request, &CapabilitySet::new(), user, 2, false)
        .map_err(|err| err.to_string())?;

    assert_eq!(
        evaluation.decision.outcome,
        GrantOutcome::Granted {
            public_site: false,
            policy_match: true,
        }
    );
    assert!(evaluation.capabilities.grants(READ_CAPABILITY));
    let roles = fixture.roles.user_roles(user).map_err(|err| err.to_string())?;
    assert!(roles.contains(&RoleName::subscriber()));
    Ok(())
}

#[test]
fn subsite_logins_are_rejected_before_any_recording() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let user = user_id(2)?;
    fixture.attributes.set_federated(user, true).map_err(|err| err.to_string())?;

    let result = pipeline.handle_login(false, user, Some("hfh.ch"));

    match result {
        Err(PipelineError::Login(error)) => {
            assert_eq!(error.code(), "subsite");
        }
        Err(other) => return Err(format!("unexpected error: {other}")),
        Ok(_) => return Err("subsite login must be rejected".to_string()),
    }

    // The rejected attempt must not have recorded anything.
    let request = CapabilityRequest::single(READ_CAPABILITY);
    let evaluation = pipeline
        .check_capabilities(&request, &CapabilitySet::new(), user, 1, false)
        .map_err(|err| err.to_string())?;
    assert_eq!(evaluation.decision.outcome, GrantOutcome::Denied);
    Ok(())
}

#[test]
fn out_of_range_policy_values_never_match() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let user = user_id(3)?;
    fixture.attributes.set_federated(user, true).map_err(|err| err.to_string())?;
    pipeline.handle_login(true, user, Some("hfh.ch")).map_err(|err| err.to_string())?;

    let request = CapabilityRequest::single(READ_CAPABILITY);
    for raw in [7, 42, u64::MAX] {
        let evaluation = pipeline
            .check_capabilities(&request, &CapabilitySet::new(), user, raw, false)
            .map_err(|err| err.to_string())?;
        assert_eq!(evaluation.decision.outcome, GrantOutcome::Denied);
        assert!(evaluation.decision.policy.is_none());
    }
    Ok(())
}

#[test]
fn users_without_recorded_affiliations_fall_back_to_no_grant() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let user = user_id(4)?;

    let request = CapabilityRequest::single(READ_CAPABILITY);
    let evaluation = pipeline
        .check_capabilities(&request, &CapabilitySet::new(), user, 2, false)
        .map_err(|err| err.to_string())?;

    assert_eq!(evaluation.decision.outcome, GrantOutcome::Denied);
    assert!(evaluation.capabilities.is_empty());
    Ok(())
}

#[test]
fn mode_three_grants_marked_accounts_without_affiliations() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let user = user_id(5)?;
    fixture.attributes.set_federated(user, true).map_err(|err| err.to_string())?;

    let request = CapabilityRequest::single(READ_CAPABILITY);
    let evaluation = pipeline
        .check_capabilities(&request, &CapabilitySet::new(), user, 3, false)
        .map_err(|err| err.to_string())?;

    assert_eq!(
        evaluation.decision.outcome,
        GrantOutcome::Granted {
            public_site: false,
            policy_match: true,
        }
    );
    Ok(())
}

#[test]
fn login_url_rewrites_only_on_non_primary_sites() -> TestResult {
    let fixture = Fixture::new()?;
    let pipeline = fixture.pipeline()?;
    let requested =
        Url::parse("https://site-3.press.example/wp-login.php").map_err(|err| err.to_string())?;

    let primary = pipeline.login_url(true, &requested, None, false);
    assert_eq!(primary, requested);

    let subsite = pipeline.login_url(false, &requested, Some("/shelf"), false);
    assert_eq!(subsite.as_str(), "https://press.example/wp-login.php?redirect_to=%2Fshelf");
    Ok(())
}
