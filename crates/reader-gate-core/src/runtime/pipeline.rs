// crates/reader-gate-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Reader Gate Authentication Pipeline
// Description: Fixed-order orchestration of login gating, recording, and evaluation.
// Purpose: Replace string-keyed hook dispatch with explicit named entry points.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! The pipeline owns the injected stores and exposes the entry points the
//! host platform calls synchronously per request: [`AuthPipeline::login_url`]
//! when rendering login links, [`AuthPipeline::handle_login`] during
//! authentication, and [`AuthPipeline::check_capabilities`] on every
//! capability check. Affiliation recording commits inside `handle_login`,
//! strictly before any capability evaluation for the same login session.
//!
//! Concurrency: execution is synchronous and request-scoped with no
//! cross-request locking. Two racing checks for the same user may both
//! decide to grant; the role store absorbs the duplicate assignment as a
//! no-op and the end state is identical regardless of interleaving.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

use crate::core::capability::CapabilityRequest;
use crate::core::capability::CapabilitySet;
use crate::core::identifiers::UserId;
use crate::core::policy::SubscriberPolicy;
use crate::core::user::UserSnapshot;
use crate::interfaces::AttributeStore;
use crate::interfaces::AttributeStoreError;
use crate::interfaces::RoleStore;
use crate::interfaces::RoleStoreError;
use crate::runtime::evaluator::CapabilityEvaluator;
use crate::runtime::evaluator::EvaluateError;
use crate::runtime::evaluator::Evaluation;
use crate::runtime::login::LoginError;
use crate::runtime::login::LoginGate;
use crate::runtime::recorder::AffiliationRecorder;
use crate::runtime::recorder::Recorded;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pipeline errors for the login entry point.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Federated login rejected for this site.
    #[error(transparent)]
    Login(#[from] LoginError),
    /// Attribute store failure while recording affiliations.
    #[error(transparent)]
    Attributes(#[from] AttributeStoreError),
    /// Role store failure while reading user roles.
    #[error(transparent)]
    Roles(#[from] RoleStoreError),
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Fixed-order authentication and capability pipeline.
///
/// # Invariants
/// - Constructed once at process start; no global singleton.
/// - `handle_login` gates the site before touching any user state.
pub struct AuthPipeline<'a> {
    /// Host platform role and capability registry.
    roles: &'a dyn RoleStore,
    /// Per-user attribute store.
    attributes: &'a dyn AttributeStore,
    /// Primary-site login gate.
    login: LoginGate,
}

impl<'a> AuthPipeline<'a> {
    /// Creates a pipeline over the given stores and login gate.
    #[must_use]
    pub const fn new(
        roles: &'a dyn RoleStore,
        attributes: &'a dyn AttributeStore,
        login: LoginGate,
    ) -> Self {
        Self {
            roles,
            attributes,
            login,
        }
    }

    /// Returns the login URL for a site, rewriting non-primary sites to the
    /// primary login endpoint.
    #[must_use]
    pub fn login_url(
        &self,
        site_is_primary: bool,
        requested: &Url,
        redirect: Option<&str>,
        force_reauth: bool,
    ) -> Url {
        self.login.login_url(site_is_primary, requested, redirect, force_reauth)
    }

    /// Handles a federated login attempt.
    ///
    /// Rejects the attempt on non-primary sites, then records the user's
    /// home organizations from the raw `homeOrganization` attribute. The
    /// recording commit happens here, before any capability evaluation for
    /// the session.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Login`] on subsite attempts and
    /// [`PipelineError::Attributes`] when recording fails.
    pub fn handle_login(
        &self,
        site_is_primary: bool,
        user: UserId,
        raw_home_organization: Option<&str>,
    ) -> Result<Recorded, PipelineError> {
        self.login.authorize_federated_login(site_is_primary)?;
        let recorder = AffiliationRecorder::new(self.attributes);
        Ok(recorder.record(user, raw_home_organization)?)
    }

    /// Evaluates a capability check for a user.
    ///
    /// Assembles the user snapshot from the stores, maps the raw policy
    /// option through the closed policy set (out-of-range values never
    /// match), and delegates to the evaluator. Attribute-store read failures
    /// degrade to an empty affiliation list and an absent federated marker,
    /// preserving the "no grant on missing data" semantics.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError`] when the role store fails.
    pub fn check_capabilities(
        &self,
        request: &CapabilityRequest,
        current: &CapabilitySet,
        user: UserId,
        policy_raw: u64,
        site_is_public: bool,
    ) -> Result<Evaluation, EvaluateError> {
        let snapshot = UserSnapshot {
            id: user,
            roles: self.roles.user_roles(user)?,
            federated: self.attributes.is_federated(user).unwrap_or(false),
            home_orgs: self.attributes.home_orgs(user).unwrap_or_default(),
        };

        let policy = SubscriberPolicy::from_raw(policy_raw);
        let evaluator = CapabilityEvaluator::new(self.roles);
        evaluator.evaluate(request, current, &snapshot, policy, site_is_public)
    }
}
