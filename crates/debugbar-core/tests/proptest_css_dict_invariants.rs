#![forbid(unsafe_code)]

//! Property tests for CSS prefixing, dotted lookup and value conversions.
//!
//! 1. `css_class` keeps the token count and prefixes every token.
//! 2. A leading `.` stays in front of the prefix.
//! 3. Dotted lookup over a built chain returns the leaf.
//! 4. Any falsy or missing segment yields the default.
//! 5. JSON-representable values survive `to_json` and back.

use debugbar_core::{Dict, Value, css_class, get_dict_value};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn prefix() -> impl Strategy<Value = String> {
    "[a-z]{1,6}-"
}

// ═════════════════════════════════════════════════════════════════════════
// CSS prefixing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_token_is_prefixed(tokens in prop::collection::vec(token(), 1..6), prefix in prefix()) {
        let joined = tokens.join(" ");
        let out = css_class(&joined, &prefix);
        let parts: Vec<&str> = out.split(' ').collect();
        prop_assert_eq!(parts.len(), tokens.len());
        for (part, original) in parts.iter().zip(&tokens) {
            prop_assert_eq!(*part, format!("{prefix}{original}"));
        }
    }

    #[test]
    fn selector_dot_is_kept(tokens in prop::collection::vec(token(), 1..4), prefix in prefix()) {
        let dotted: Vec<String> = tokens.iter().map(|t| format!(".{t}")).collect();
        let out = css_class(&dotted.join(" "), &prefix);
        for (part, original) in out.split(' ').zip(&tokens) {
            prop_assert_eq!(part.to_string(), format!(".{prefix}{original}"));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Dotted lookup
// ═════════════════════════════════════════════════════════════════════════

fn nest(path: &[String], leaf: Value) -> Dict {
    let mut value = leaf;
    for key in path[1..].iter().rev() {
        let mut map = Dict::new();
        map.insert(key.clone(), value);
        value = Value::Map(map);
    }
    let mut root = Dict::new();
    root.insert(path[0].clone(), value);
    root
}

proptest! {
    #[test]
    fn chain_lookup_returns_leaf(path in prop::collection::vec("[a-z]{1,5}", 1..5), leaf in 1i64..1000) {
        let data = nest(&path, Value::Int(leaf));
        let key = path.join(".");
        prop_assert_eq!(get_dict_value(&data, &key, Value::Null), Value::Int(leaf));
    }

    #[test]
    fn falsy_leaf_yields_default(
        path in prop::collection::vec("[a-z]{1,5}", 1..5),
        leaf in prop_oneof![
            Just(Value::Null),
            Just(Value::Bool(false)),
            Just(Value::Int(0)),
            Just(Value::Float(0.0)),
            Just(Value::Str(String::new())),
        ],
    ) {
        let data = nest(&path, leaf);
        let default = Value::from("fallback");
        prop_assert_eq!(get_dict_value(&data, &path.join("."), default.clone()), default);
    }

    #[test]
    fn extra_segment_yields_default(path in prop::collection::vec("[a-z]{1,5}", 1..4), extra in "[a-z]{1,5}") {
        let data = nest(&path, Value::from("leaf"));
        let key = format!("{}.{extra}", path.join("."));
        prop_assert_eq!(get_dict_value(&data, &key, Value::Int(-1)), Value::Int(-1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// JSON
// ═════════════════════════════════════════════════════════════════════════

fn json_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[ -~]{0,10}".prop_map(Value::Str),
    ];
    scalar.prop_recursive(3, 12, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|pairs| Value::Map(pairs.into_iter().collect::<Dict>())),
        ]
    })
}

proptest! {
    #[test]
    fn json_conversion_preserves_value(value in json_value()) {
        let json = value.to_json().expect("representable");
        prop_assert_eq!(Value::from(json), value);
    }
}
