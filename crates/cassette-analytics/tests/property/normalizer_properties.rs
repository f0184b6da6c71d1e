use cassette_analytics::normalizer::{is_core_action, with_core_action, CORE_ACTION_EVENTS};
use cassette_analytics::suppression::{is_internal_route, INTERNAL_ROUTE_PREFIXES};
use cassette_core::models::{Properties, PropertyValue};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        Just(PropertyValue::Null),
        any::<bool>().prop_map(PropertyValue::Bool),
        any::<i64>().prop_map(PropertyValue::Integer),
        "[a-z]{0,8}".prop_map(PropertyValue::Text),
    ]
}

fn arb_event() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(CORE_ACTION_EVENTS.to_vec()).prop_map(str::to_string),
        "[a-z_]{1,20}",
        "[a-z]{1,10}_(submitted|failed)",
    ]
}

proptest! {
    #[test]
    fn core_action_true_only_for_successful_core_events(
        event in arb_event(),
        core in arb_value(),
        status in arb_value(),
    ) {
        let mut props = Properties::new();
        props.insert("core_action".into(), core);
        props.insert("status".into(), status);
        let out = with_core_action(&event, props);
        if out.get("core_action") == Some(&PropertyValue::Bool(true)) {
            prop_assert!(is_core_action(&event));
        }
    }

    #[test]
    fn normalization_is_idempotent(event in arb_event(), core in arb_value()) {
        let mut props = Properties::new();
        props.insert("core_action".into(), core);
        let once = with_core_action(&event, props);
        let twice = with_core_action(&event, once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn nested_internal_routes_are_always_internal(
        prefix in prop::sample::select(INTERNAL_ROUTE_PREFIXES.to_vec()),
        tail in "[a-z0-9/]{0,20}",
        query in "[a-z=&]{0,10}",
    ) {
        let route = format!("{prefix}/{tail}?{query}");
        prop_assert!(is_internal_route(&route));
    }
}
