//! Order independence and fingerprint sensitivity of [`Mapping`].

use confmap_core::{Mappable, Mapping};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(String, String),
    Absolute(String, String),
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn name() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|segments| segments.join("."))
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_/:-]{0,12}"
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    // Unique names keep last-write-wins out of the comparison.
    prop::collection::btree_map(name(), (value(), any::<bool>()), 1..24).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(name, (value, absolute))| {
                if absolute {
                    Op::Absolute(name, value)
                } else {
                    Op::Put(name, value)
                }
            })
            .collect()
    })
}

fn build(prefix: &str, ops: &[Op]) -> Mapping {
    let mut config = Mapping::prefixed(prefix);
    for op in ops {
        match op {
            Op::Put(name, value) => config.put(name, value),
            Op::Absolute(name, value) => config.put_absolute(name, value),
        };
    }
    config
}

proptest! {
    #[test]
    fn prop_serialization_ignores_put_order(
        prefix in segment(),
        (ops, shuffled) in ops().prop_flat_map(|ops| {
            let shuffled = Just(ops.clone()).prop_shuffle();
            (Just(ops), shuffled)
        }),
    ) {
        let a = build(&prefix, &ops);
        let b = build(&prefix, &shuffled);

        prop_assert_eq!(a.serialize(), b.serialize());
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn prop_changing_a_value_changes_the_fingerprint(
        prefix in segment(),
        ops in ops(),
        index in any::<prop::sample::Index>(),
        suffix in "[a-z]{1,4}",
    ) {
        let original = build(&prefix, &ops);

        let mut changed_ops = ops.clone();
        match &mut changed_ops[index.index(ops.len())] {
            Op::Put(_, value) | Op::Absolute(_, value) => value.push_str(&suffix),
        }
        let changed = build(&prefix, &changed_ops);

        prop_assert_ne!(original.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn prop_serialized_lines_are_sorted(prefix in segment(), ops in ops()) {
        let text = build(&prefix, &ops).serialize();
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        prop_assert_eq!(lines, sorted);
    }
}

struct Pool {
    size: u32,
    timeout: Option<u32>,
}

impl Mappable for Pool {
    fn as_configuration(&self) -> Mapping {
        let mut config = Mapping::new();
        config
            .put("size", self.size)
            .put("timeout", self.timeout)
            .put_absolute("metrics.pool.enabled", true);
        config
    }
}

struct Database {
    host: String,
    pool: Pool,
}

impl Mappable for Database {
    fn as_configuration(&self) -> Mapping {
        let mut config = Mapping::new();
        config.put("host", &self.host).put_mappable("pool", &self.pool);
        config
    }
}

#[test]
fn nested_and_direct_builds_fingerprint_equally() {
    let db = Database {
        host: "db.local".into(),
        pool: Pool {
            size: 8,
            timeout: Some(30),
        },
    };

    let mut nested = Mapping::prefixed("app");
    nested.put_mappable("db", &db);

    let mut direct = Mapping::new();
    direct
        .put_absolute("metrics.pool.enabled", "true")
        .put("app.db.pool.timeout", 30)
        .put("app.db.host", "db.local")
        .put("app.db.pool.size", "8");

    assert_eq!(nested.serialize(), direct.serialize());
    assert_eq!(nested.fingerprint(), direct.fingerprint());

    let mut drifted = direct.clone();
    drifted.put("app.db.pool.size", 9);
    assert_ne!(nested.fingerprint(), drifted.fingerprint());
}
