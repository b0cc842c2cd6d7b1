//! Conversion from evaluated HCL values to JSON
//!
//! HCL has a single number type; integral numbers are emitted as JSON
//! integers so `params = [1, 2]` is sent as `[1,2]`, not `[1.0,2.0]`.

use serde_json::{Map, Number, Value};

pub fn to_json(value: hcl::Value) -> Value {
    match value {
        hcl::Value::Null => Value::Null,
        hcl::Value::Bool(b) => Value::Bool(b),
        hcl::Value::String(s) => Value::String(s),
        hcl::Value::Number(n) => number_to_json(&n),
        hcl::Value::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        hcl::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, to_json(value)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

fn number_to_json(number: &hcl::Number) -> Value {
    if let Some(i) = number.as_i64() {
        return Value::Number(i.into());
    }
    if let Some(u) = number.as_u64() {
        return Value::Number(u.into());
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Value::Number((f as i64).into())
        }
        Some(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        None => Value::Null,
    }
}
