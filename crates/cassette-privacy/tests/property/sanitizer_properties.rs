use cassette_core::models::{Properties, PropertyValue};
use cassette_privacy::{patterns, Sanitizer};
use proptest::prelude::*;

// ── Forbidden keys never survive ──────────────────────────────────────────

proptest! {
    #[test]
    fn forbidden_fragment_keys_never_survive(
        prefix in "[a-z_]{0,8}",
        fragment in prop::sample::select(vec![
            "description", "name", "email", "url", "title", "query", "text", "comment",
        ]),
        suffix in "[a-z_]{0,8}",
        value in ".{0,40}",
    ) {
        let key = format!("{prefix}{fragment}{suffix}");
        let sanitizer = Sanitizer::with_allowed_keys([key.clone()]);
        let mut input = Properties::new();
        input.insert(key.clone(), PropertyValue::Text(value));
        let out = sanitizer.sanitize(&input);
        prop_assert!(!out.contains_key(&key), "forbidden key '{}' survived", key);
        prop_assert!(patterns::is_forbidden_key(&key));
    }
}

// ── Routes never carry a query or fragment ────────────────────────────────

proptest! {
    #[test]
    fn sanitized_routes_have_no_query_or_fragment(
        path in "(/[a-z0-9]{1,8}){0,4}",
        query in "[a-z0-9=&]{0,20}",
        fragment in "[a-z0-9]{0,10}",
    ) {
        let raw = format!("{path}?{query}#{fragment}");
        let mut input = Properties::new();
        input.insert("route".into(), PropertyValue::Text(raw));
        let out = Sanitizer::new().sanitize(&input);
        let route = out["route"].as_str().unwrap().to_string();
        prop_assert!(!route.contains('?'));
        prop_assert!(!route.contains('#'));
        prop_assert!(route.starts_with('/'));
    }

    #[test]
    fn strings_never_exceed_cap(text in ".{0,600}") {
        let sanitizer = Sanitizer::new();
        let mut input = Properties::new();
        input.insert("surface".into(), PropertyValue::Text(text));
        let out = sanitizer.sanitize(&input);
        if let Some(v) = out.get("surface") {
            prop_assert!(v.as_str().unwrap().chars().count() <= sanitizer.max_string_len());
        }
    }

    #[test]
    fn sanitization_idempotent_arbitrary_values(
        route in "[ -~]{0,60}",
        domain in "[A-Za-z0-9.:/@?#-]{0,40}",
        platform in ".{0,20}",
    ) {
        let sanitizer = Sanitizer::new();
        let mut input = Properties::new();
        input.insert("route".into(), PropertyValue::Text(route));
        input.insert("domain".into(), PropertyValue::Text(domain));
        input.insert("platform".into(), PropertyValue::Text(platform));
        let first = sanitizer.sanitize(&input);
        let second = sanitizer.sanitize(&first);
        prop_assert_eq!(first, second);
    }
}
