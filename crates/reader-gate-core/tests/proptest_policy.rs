// crates/reader-gate-core/tests/proptest_policy.rs
// ============================================================================
// Module: Policy Property-Based Tests
// Description: Property tests for the policy table and affiliation parsing.
// Purpose: Detect grant-table and parser invariant violations across wide inputs.
// ============================================================================

//! Property-based tests for policy-table and parsing invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use reader_gate_core::OrgDomain;
use reader_gate_core::SubscriberPolicy;
use reader_gate_core::parse_home_organizations;

/// Strategy for affiliation lists mixing known and arbitrary domains.
fn affiliations_strategy() -> impl Strategy<Value = Vec<OrgDomain>> {
    let domain = prop_oneof![
        Just("hfh.ch".to_string()),
        Just("phzh.ch".to_string()),
        Just("uzh.ch".to_string()),
        Just("fhnw.ch".to_string()),
        Just("zhaw.ch".to_string()),
        "[a-z]{1,8}\\.(ch|org|example)",
    ];
    prop::collection::vec(domain.prop_map(OrgDomain::new), 0..6)
}

/// Returns whether the list contains the exact domain.
fn contains(affiliations: &[OrgDomain], domain: &str) -> bool {
    affiliations.iter().any(|org| org.as_str() == domain)
}

proptest! {
    #[test]
    fn raw_values_above_six_never_enter_the_closed_set(raw in 7_u64..) {
        prop_assert!(SubscriberPolicy::from_raw(raw).is_none());
    }

    #[test]
    fn mode_zero_never_grants_for_any_input(
        affiliations in affiliations_strategy(),
        federated in any::<bool>(),
    ) {
        prop_assert!(!SubscriberPolicy::Never.grants(&affiliations, federated));
    }

    #[test]
    fn single_org_modes_grant_iff_membership(
        affiliations in affiliations_strategy(),
        federated in any::<bool>(),
    ) {
        prop_assert_eq!(
            SubscriberPolicy::Hfh.grants(&affiliations, federated),
            contains(&affiliations, "hfh.ch")
        );
        prop_assert_eq!(
            SubscriberPolicy::Uzh.grants(&affiliations, federated),
            contains(&affiliations, "uzh.ch")
        );
        prop_assert_eq!(
            SubscriberPolicy::Fhnw.grants(&affiliations, federated),
            contains(&affiliations, "fhnw.ch")
        );
        prop_assert_eq!(
            SubscriberPolicy::Zhaw.grants(&affiliations, federated),
            contains(&affiliations, "zhaw.ch")
        );
    }

    #[test]
    fn combined_mode_is_the_or_of_its_parts(
        affiliations in affiliations_strategy(),
        federated in any::<bool>(),
    ) {
        let combined = SubscriberPolicy::HfhOrPhzh.grants(&affiliations, federated);
        let parts = contains(&affiliations, "hfh.ch") || contains(&affiliations, "phzh.ch");
        prop_assert_eq!(combined, parts);
    }

    #[test]
    fn mode_three_mirrors_the_marker(
        affiliations in affiliations_strategy(),
        federated in any::<bool>(),
    ) {
        prop_assert_eq!(SubscriberPolicy::AnyFederated.grants(&affiliations, federated), federated);
    }

    #[test]
    fn parsing_preserves_segment_count_and_content(
        segments in prop::collection::vec("[^;]*", 1..6),
    ) {
        let raw = segments.join(";");
        let parsed = parse_home_organizations(&raw);
        prop_assert_eq!(parsed.len(), segments.len());
        for (org, segment) in parsed.iter().zip(&segments) {
            prop_assert_eq!(org.as_str(), segment.as_str());
        }
    }
}
