//! Golden dataset tests for cassette-privacy.
//!
//! Each sanitizer golden file holds input/expected pairs expressed as JSON
//! objects.

use cassette_core::models::properties_from_json;
use cassette_privacy::Sanitizer;
use test_fixtures::load_fixture_value;

fn run_golden(path: &str) {
    let fixture = load_fixture_value(path);
    let sanitizer = Sanitizer::new();
    let cases = fixture["cases"].as_array().unwrap();

    for case in cases {
        let id = case["id"].as_str().unwrap_or("?");
        let input = properties_from_json(&case["input"]);
        let expected = properties_from_json(&case["expected"]);

        let output = sanitizer.sanitize(&input);
        assert_eq!(output, expected, "case '{}': output mismatch", id);
    }
}

#[test]
fn golden_routes_and_domains() {
    run_golden("golden/sanitizer/routes_and_domains.json");
}

#[test]
fn golden_enums_and_scalars() {
    run_golden("golden/sanitizer/enums_and_scalars.json");
}
