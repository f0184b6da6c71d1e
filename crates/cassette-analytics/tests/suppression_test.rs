use cassette_analytics::suppression::{is_internal_route, SuppressionPolicy, SuppressionReason};
use cassette_core::config::{AnalyticsConfig, Environment};
use cassette_core::models::AccountType;

fn production() -> SuppressionPolicy {
    SuppressionPolicy::new(Environment::Production, false)
}

fn development() -> SuppressionPolicy {
    SuppressionPolicy::new(Environment::Development, false)
}

#[test]
fn internal_routes_are_suppressed_for_every_account_type() {
    for account in [
        AccountType::Standard,
        AccountType::Verified,
        AccountType::CassetteTeam,
        AccountType::Unknown,
    ] {
        assert!(production().should_suppress(Some("/admin/users"), account, Some(true)));
        assert!(production().should_suppress(Some("/demo"), account, None));
    }
}

#[test]
fn prefix_must_match_a_whole_segment() {
    assert!(is_internal_route("/admin"));
    assert!(is_internal_route("/internal/metrics?x=1"));
    assert!(is_internal_route("https://cassette.app/playground/p1#top"));
    assert!(is_internal_route("/ADMIN/x"));
    assert!(!is_internal_route("/administrator"));
    assert!(!is_internal_route("/demos"));
    assert!(!is_internal_route("/post/admin"));
}

#[test]
fn explicit_dev_flag_wins_outside_production() {
    let policy = development();
    assert!(!policy.should_suppress(Some("/home"), AccountType::Standard, Some(true)));
    assert!(policy.should_suppress(Some("/home"), AccountType::Standard, Some(false)));

    let opted_in = SuppressionPolicy::new(Environment::Development, true);
    assert!(opted_in.should_suppress(Some("/home"), AccountType::Standard, Some(false)));
}

#[test]
fn absent_flag_falls_back_to_environment_opt_in() {
    assert_eq!(
        development().reason(Some("/home"), None),
        Some(SuppressionReason::NonProduction)
    );
    let opted_in = SuppressionPolicy::new(Environment::Test, true);
    assert_eq!(opted_in.reason(Some("/home"), None), None);
}

#[test]
fn production_public_route_is_sent() {
    assert_eq!(production().reason(Some("/post/42"), None), None);
    assert_eq!(production().reason(None, None), None);
}

#[test]
fn policy_reads_config() {
    let config = AnalyticsConfig {
        environment: Environment::Development,
        allow_in_dev: true,
        ..AnalyticsConfig::default()
    };
    assert_eq!(SuppressionPolicy::from_config(&config).reason(Some("/"), None), None);
}
