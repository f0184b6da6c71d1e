use cassette_core::models::{is_internal_account, AccountType, PropertyValue};
use proptest::prelude::*;

fn with_separators(word: &str, seps: &[char], upper: &[bool]) -> String {
    word.chars()
        .enumerate()
        .flat_map(|(i, c)| {
            let c = if upper.get(i).copied().unwrap_or(false) {
                c.to_ascii_uppercase()
            } else {
                c
            };
            let mut out = vec![c];
            if let Some(sep) = seps.get(i) {
                if *sep != '\0' {
                    out.push(*sep);
                }
            }
            out
        })
        .collect()
}

proptest! {
    #[test]
    fn cassette_team_label_survives_case_and_separators(
        seps in prop::collection::vec(prop::sample::select(vec!['\0', ' ', '-', '_', '.']), 12),
        upper in prop::collection::vec(any::<bool>(), 12),
    ) {
        let label = with_separators("cassetteteam", &seps, &upper);
        prop_assert!(
            is_internal_account(Some(&PropertyValue::Text(label.clone()))),
            "label '{}' should be internal",
            label
        );
    }

    #[test]
    fn only_code_two_is_internal(code in any::<i64>()) {
        let internal = AccountType::from_code(code).is_internal();
        prop_assert_eq!(internal, code == 2);
    }
}
