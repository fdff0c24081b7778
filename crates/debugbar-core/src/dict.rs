#![forbid(unsafe_code)]

//! Dictionary helpers.

use crate::value::{Dict, Value};

/// Look up a nested value by dotted path (`"a.b.c"`).
///
/// Walks one path segment at a time. If a segment is missing, or resolves
/// to a falsy value (see [`Value::is_truthy`]), or the current value is not
/// a map, `default` is returned instead. Never fails.
///
/// ```
/// use debugbar_core::{dict, get_dict_value, Value};
///
/// let data = dict! { "a" => dict! { "b" => dict! { "c" => 1 } } };
/// assert_eq!(get_dict_value(&data, "a.b.c", Value::Int(0)), Value::Int(1));
/// assert_eq!(get_dict_value(&data, "a.x.c", Value::Int(0)), Value::Int(0));
/// ```
#[must_use]
pub fn get_dict_value(dict: &Dict, key: &str, default: Value) -> Value {
    let mut parts = key.split('.');
    let Some(first) = parts.next() else {
        return default;
    };
    let mut current = match dict.get(first) {
        Some(v) if v.is_truthy() => v,
        _ => return default,
    };
    for part in parts {
        current = match current.get(part) {
            Some(v) if v.is_truthy() => v,
            _ => return default,
        };
    }
    current.clone()
}

/// Number of entries in a mapping.
#[inline]
#[must_use]
pub fn get_object_size(dict: &Dict) -> usize {
    dict.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict;

    #[test]
    fn nested_lookup() {
        let data = dict! { "a" => dict! { "b" => dict! { "c" => 1 } } };
        assert_eq!(get_dict_value(&data, "a.b.c", Value::Int(0)), Value::Int(1));
        assert_eq!(
            get_dict_value(&data, "a.b", Value::Null),
            Value::Map(dict! { "c" => 1 })
        );
    }

    #[test]
    fn missing_segment_returns_default() {
        let data = dict! { "a" => dict! {} };
        assert_eq!(get_dict_value(&data, "a.b.c", Value::Int(0)), Value::Int(0));
        assert_eq!(get_dict_value(&data, "zzz", Value::from("d")), Value::from("d"));
    }

    #[test]
    fn falsy_leaf_returns_default() {
        let data = dict! { "a" => dict! { "zero" => 0, "empty" => "", "null" => () } };
        for path in ["a.zero", "a.empty", "a.null"] {
            assert_eq!(get_dict_value(&data, path, Value::Int(9)), Value::Int(9), "{path}");
        }
    }

    #[test]
    fn descending_into_scalar_returns_default() {
        let data = dict! { "a" => 3 };
        assert_eq!(get_dict_value(&data, "a.b", Value::Int(0)), Value::Int(0));
    }

    #[test]
    fn empty_key_looks_up_empty_segment() {
        let mut data = dict! { "x" => 1 };
        assert_eq!(get_dict_value(&data, "", Value::Int(0)), Value::Int(0));
        data.insert(String::new(), Value::Int(4));
        assert_eq!(get_dict_value(&data, "", Value::Int(0)), Value::Int(4));
    }

    #[test]
    fn object_size_counts_keys() {
        assert_eq!(get_object_size(&dict! {}), 0);
        assert_eq!(get_object_size(&dict! { "a" => 1, "b" => () }), 2);
    }
}
