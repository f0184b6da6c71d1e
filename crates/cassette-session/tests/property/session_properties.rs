use std::sync::Arc;

use cassette_core::config::SessionConfig;
use cassette_session::{alias_guard_key, IdentityResolver, MemoryStore};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

proptest! {
    #[test]
    fn session_rotates_exactly_when_gap_exceeds_timeout(
        gaps in prop::collection::vec(0i64..3_600_000, 1..20),
    ) {
        let mut resolver = IdentityResolver::with_stores(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            &SessionConfig::default(),
        );
        let timeout_ms = 30 * 60 * 1000;
        let mut now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut current = resolver.session_id(now);

        for gap in gaps {
            now += Duration::milliseconds(gap);
            let next = resolver.session_id(now);
            if gap > timeout_ms {
                prop_assert_ne!(&next, &current);
            } else {
                prop_assert_eq!(&next, &current);
            }
            current = next;
        }
    }

    #[test]
    fn guard_keys_never_collide_for_distinct_pairs(
        a in "[a-z0-9:]{1,12}", b in "[a-z0-9-]{1,12}",
        c in "[a-z0-9:]{1,12}", d in "[a-z0-9-]{1,12}",
    ) {
        prop_assume!((a.as_str(), b.as_str()) != (c.as_str(), d.as_str()));
        prop_assert_ne!(alias_guard_key(&a, &b), alias_guard_key(&c, &d));
    }
}
