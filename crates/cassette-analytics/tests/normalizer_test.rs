use cassette_analytics::normalizer::{
    canonicalize_account_type, derived_status, normalize_status, with_core_action,
};
use cassette_core::models::{properties_from_json, EventStatus, PropertyValue};
use cassette_core::properties;
use test_fixtures::load_fixture_value;

#[test]
fn submitted_suffix() {
    let out = normalize_status("post_create_submitted", properties! {});
    assert_eq!(out["status"], PropertyValue::from("submitted"));
    assert_eq!(out["success"], PropertyValue::Bool(false));
}

#[test]
fn failed_suffix_with_core_action_candidate() {
    let out = with_core_action("link_conversion_failed", properties! { "core_action" => true });
    assert_eq!(out["status"], PropertyValue::from("failed"));
    assert_eq!(out["success"], PropertyValue::Bool(false));
    assert_eq!(out["core_action"], PropertyValue::Bool(false));
}

#[test]
fn canonical_success_wins_over_caller_status() {
    let out = with_core_action(
        "playlist_converted",
        properties! { "status" => "failed", "success" => false },
    );
    assert_eq!(out["status"], PropertyValue::from("succeeded"));
    assert_eq!(out["success"], PropertyValue::Bool(true));
    assert_eq!(out["core_action"], PropertyValue::Bool(true));
}

#[test]
fn unrelated_event_keeps_caller_status() {
    let out = normalize_status("share_sheet_opened", properties! { "status" => "failed" });
    assert_eq!(out["status"], PropertyValue::from("failed"));
    assert!(!out.contains_key("success"));
}

#[test]
fn core_action_absent_stays_absent() {
    let out = with_core_action("share_sheet_opened", properties! { "surface" => "post" });
    assert!(!out.contains_key("core_action"));
}

#[test]
fn falsy_core_action_is_left_alone() {
    let out = with_core_action("share_sheet_opened", properties! { "core_action" => 0 });
    assert_eq!(out["core_action"], PropertyValue::Integer(0));
}

#[test]
fn derived_status_by_name() {
    assert_eq!(derived_status("post_shared"), Some(EventStatus::Succeeded));
    assert_eq!(derived_status("signup_completed"), Some(EventStatus::Succeeded));
    assert_eq!(derived_status("post_opened"), None);
}

#[test]
fn account_type_is_canonicalized_in_place() {
    let mut props = properties! { "account_type" => 2 };
    canonicalize_account_type(&mut props);
    assert_eq!(props["account_type"], PropertyValue::from("cassette_team"));

    let mut props = properties! { "account_type" => "Verified" };
    canonicalize_account_type(&mut props);
    assert_eq!(props["account_type"], PropertyValue::from("verified"));
}

#[test]
fn golden_status_and_core_action() {
    let fixture = load_fixture_value("golden/normalizer/status_and_core_action.json");
    for case in fixture["cases"].as_array().unwrap() {
        let id = case["id"].as_str().unwrap_or("?");
        let event = case["event"].as_str().unwrap();
        let output = with_core_action(event, properties_from_json(&case["input"]));
        assert_eq!(
            output,
            properties_from_json(&case["expected"]),
            "case '{}': output mismatch",
            id
        );
    }
}
