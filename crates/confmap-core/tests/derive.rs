//! `#[derive(Mappable)]` behaviour, exercised on a small model of a
//! connector deployment.

use std::collections::{BTreeMap, HashMap};

use confmap_core::{Mappable, Mapping};

#[derive(Mappable)]
struct Offsets {
    #[config(rename = "storage")]
    kind: String,
    #[config(rename = "flush.interval.ms")]
    flush_interval_ms: Option<u64>,
}

#[derive(Mappable)]
struct Transform {
    #[config(rename = "type")]
    kind: String,
    #[config(root)]
    enabled: bool,
}

#[derive(Mappable)]
struct Predicate {
    pattern: String,
}

#[derive(Mappable)]
struct Connector {
    name: String,
    #[config(absolute, rename = "quarkus.log.level")]
    log_level: Option<&'static str>,
    #[config(nested)]
    offsets: Offsets,
    #[config(list(item = "t"))]
    transforms: Vec<Transform>,
    #[config(map)]
    predicates: BTreeMap<String, Predicate>,
    #[config(flatten)]
    extra: Mapping,
    #[config(skip)]
    #[allow(dead_code)]
    internal: u32,
}

fn connector() -> Connector {
    Connector {
        name: "inventory".into(),
        log_level: Some("DEBUG"),
        offsets: Offsets {
            kind: "file".into(),
            flush_interval_ms: None,
        },
        transforms: vec![
            Transform {
                kind: "router".into(),
                enabled: true,
            },
            Transform {
                kind: "filter".into(),
                enabled: false,
            },
        ],
        predicates: BTreeMap::from([(
            "tables".to_string(),
            Predicate {
                pattern: "inv.*".into(),
            },
        )]),
        extra: Mapping::from_properties([("custom", "yes")]),
        internal: 7,
    }
}

#[test]
fn derived_mapping_covers_every_mode() {
    let mut config = Mapping::prefixed("debezium.source");
    config.merge_mappable(&connector());

    let expected = [
        "debezium.source.custom=yes",
        "debezium.source.name=inventory",
        "debezium.source.offsets.storage=file",
        "debezium.source.predicates.tables.pattern=inv.*",
        "debezium.source.predicates=tables",
        "debezium.source.transforms.t0.type=router",
        "debezium.source.transforms.t0=true",
        "debezium.source.transforms.t1.type=filter",
        "debezium.source.transforms.t1=false",
        "debezium.source.transforms=t0,t1",
        "quarkus.log.level=DEBUG",
    ]
    .join("\n");

    assert_eq!(config.serialize(), expected);
}

#[test]
fn derived_mapping_is_unprefixed_and_repeatable() {
    let connector = connector();
    let first = connector.as_configuration();
    let second = connector.as_configuration();

    assert_eq!(first, second);
    assert_eq!(first.prefix(), None);
    assert_eq!(first.get_resolved("name"), Some("inventory"));
}

#[derive(Mappable)]
struct Sinks {
    #[config(map)]
    by_name: HashMap<String, Predicate>,
    #[config(list)]
    ordered: Vec<Predicate>,
}

#[test]
fn list_without_item_prefix_uses_indices() {
    let sinks = Sinks {
        by_name: HashMap::new(),
        ordered: vec![Predicate { pattern: "a".into() }],
    };

    assert_eq!(
        sinks.as_configuration().serialize(),
        "ordered.0.pattern=a\nordered=0"
    );
}

#[derive(Mappable)]
struct Generic<T: Mappable> {
    #[config(nested)]
    inner: T,
    r#type: &'static str,
}

#[test]
fn generic_structs_and_raw_identifiers() {
    let value = Generic {
        inner: Predicate { pattern: "p".into() },
        r#type: "t",
    };

    assert_eq!(
        value.as_configuration().serialize(),
        "inner.pattern=p\ntype=t"
    );
}
