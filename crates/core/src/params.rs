//! Typed lookups into a flat `serde_json::Value` parameter object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key or
//! a value of the wrong type yields the default, so a partial parameter object
//! is always usable. Range checks happen afterwards, in
//! [`SamplerConfig::validate`](crate::sampler::SamplerConfig::validate).

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted; `2.5` or `-1` fall back to the default.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"gain": 12.5});
        assert!((param_f64(&params, "gain", 15.0) - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"gain": 10});
        assert!((param_f64(&params, "gain", 15.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "exponent", 0.3) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"gain": "loud"});
        assert!((param_f64(&params, "gain", 15.0) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "gain", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"vertical_sample_count": 24});
        assert_eq!(param_usize(&params, "vertical_sample_count", 36), 24);
    }

    #[test]
    fn param_usize_returns_default_when_key_missing() {
        let params = json!({});
        assert_eq!(param_usize(&params, "vertical_sample_count", 36), 36);
    }

    #[test]
    fn param_usize_returns_default_for_float_value() {
        let params = json!({"vertical_sample_count": 2.5});
        assert_eq!(param_usize(&params, "vertical_sample_count", 36), 36);
    }

    #[test]
    fn param_usize_returns_default_for_negative_integer() {
        let params = json!({"vertical_sample_count": -1});
        assert_eq!(param_usize(&params, "vertical_sample_count", 36), 36);
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"nan_policy": "substitute_zero"});
        assert_eq!(
            param_string(&params, "nan_policy", "abort_at_origin"),
            "substitute_zero"
        );
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"nan_policy": 1});
        assert_eq!(
            param_string(&params, "nan_policy", "abort_at_origin"),
            "abort_at_origin"
        );
    }
}
