#![no_main]

use arbitrary::Arbitrary;
use debugbar_core::{Dict, Value, get_dict_value};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Map(Vec<(String, FuzzValue)>),
}

impl FuzzValue {
    fn into_value(self, depth: usize) -> Value {
        match self {
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(b),
            FuzzValue::Int(n) => Value::Int(n),
            FuzzValue::Float(f) => Value::Float(f),
            FuzzValue::Str(s) => Value::Str(s),
            FuzzValue::Map(_) if depth > 8 => Value::Null,
            FuzzValue::Map(pairs) => Value::Map(
                pairs
                    .into_iter()
                    .take(16)
                    .map(|(k, v)| (k, v.into_value(depth + 1)))
                    .collect::<Dict>(),
            ),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    root: Vec<(String, FuzzValue)>,
    path: String,
}

fuzz_target!(|input: Input| {
    if input.path.len() > 1024 {
        return;
    }
    let data: Dict = input
        .root
        .into_iter()
        .take(16)
        .map(|(k, v)| (k, v.into_value(0)))
        .collect();
    let sentinel = Value::from("__default__");
    let found = get_dict_value(&data, &input.path, sentinel.clone());
    // Anything other than the default must be truthy.
    if found != sentinel {
        assert!(found.is_truthy());
    }
});
