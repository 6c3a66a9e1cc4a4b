//! Single-sample type inference.
//!
//! One parsed JSON document in, one [`Ty`] tree out. There is no widening
//! across samples: arrays are classified by their first element only, and
//! numbers are split into integer vs. number by whether the sampled value has
//! a zero fractional part (so `2.0` is an integer).
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::ir::{Fields, Ty};

// ------------------------------- Policy ---------------------------------- //

/// Deepest container nesting accepted before bailing out with `DepthExceeded`.
pub const MAX_DEPTH: usize = 64;

// ------------------------------ Front API -------------------------------- //

/// Parse `json_text` and infer its descriptor.
pub fn infer(json_text: &str) -> Result<Ty> {
    let value = serde_json::from_str::<Value>(json_text)?;
    infer_value(&value)
}

/// Infer the descriptor of an already-parsed document.
pub fn infer_value(v: &Value) -> Result<Ty> {
    let ty = observe_value(v, 0)?;
    tracing::trace!(kind = kind_name(&ty), "inferred root descriptor");
    Ok(ty)
}

// ------------------------------ Observe ---------------------------------- //

fn observe_value(v: &Value, depth: usize) -> Result<Ty> {
    match v {
        Value::Null => Ok(Ty::Null),
        Value::Bool(_) => Ok(Ty::Bool),
        Value::Number(n) => Ok(observe_number(n)),
        Value::String(_) => Ok(Ty::String),
        Value::Array(xs) => {
            let depth = descend(depth)?;
            observe_array(xs, depth)
        }
        Value::Object(m) => {
            let depth = descend(depth)?;
            observe_object(m, depth)
        }
    }
}

fn descend(depth: usize) -> Result<usize> {
    let next = depth + 1;
    if next > MAX_DEPTH {
        return Err(Error::DepthExceeded { max: MAX_DEPTH });
    }
    Ok(next)
}

fn observe_number(n: &Number) -> Ty {
    if n.is_i64() || n.is_u64() {
        return Ty::Integer;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ty::Integer,
        _ => Ty::Number,
    }
}

fn observe_array(xs: &[Value], depth: usize) -> Result<Ty> {
    // first element only; the rest are never inspected
    let item = match xs.first() {
        Some(first) => observe_value(first, depth)?,
        None => Ty::Any,
    };
    Ok(Ty::Array(Box::new(item)))
}

fn observe_object(map: &Map<String, Value>, depth: usize) -> Result<Ty> {
    let mut fields = Fields::with_capacity(map.len());
    for (k, v) in map {
        fields.insert(k.clone(), observe_value(v, depth)?);
    }
    Ok(Ty::Object(fields))
}

fn kind_name(ty: &Ty) -> &'static str {
    match ty {
        Ty::Null => "null",
        Ty::String => "string",
        Ty::Integer => "integer",
        Ty::Number => "number",
        Ty::Bool => "boolean",
        Ty::Array(_) => "array",
        Ty::Object(_) => "object",
        Ty::Any => "any",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(item: Ty) -> Ty {
        Ty::Array(Box::new(item))
    }

    #[test]
    fn scalars_classify_by_kind() {
        assert_eq!(infer("null").unwrap(), Ty::Null);
        assert_eq!(infer("true").unwrap(), Ty::Bool);
        assert_eq!(infer("\"x\"").unwrap(), Ty::String);
        assert_eq!(infer("37").unwrap(), Ty::Integer);
        assert_eq!(infer("-4").unwrap(), Ty::Integer);
        assert_eq!(infer("3.25").unwrap(), Ty::Number);
    }

    #[test]
    fn zero_fraction_floats_are_integers() {
        assert_eq!(infer("2.0").unwrap(), Ty::Integer);
        assert_eq!(infer("1e3").unwrap(), Ty::Integer);
        assert_eq!(infer("18446744073709551615").unwrap(), Ty::Integer);
    }

    #[test]
    fn empty_array_has_any_element() {
        assert_eq!(infer("[]").unwrap(), arr(Ty::Any));
    }

    #[test]
    fn arrays_sample_first_element_only() {
        assert_eq!(infer(r#"[1, "x"]"#).unwrap(), arr(Ty::Integer));
        assert_eq!(infer(r#"[[], [1]]"#).unwrap(), arr(arr(Ty::Any)));
    }

    #[test]
    fn object_keys_keep_source_order() {
        let ty = infer(r#"{"b": 1, "a": 2.5, "c": {"z": null, "y": []}}"#).unwrap();
        let fields = ty.as_object().expect("object");
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(fields["a"], Ty::Number);
        let inner = fields["c"].as_object().expect("nested object");
        assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["z", "y"]);
    }

    #[test]
    fn empty_object_has_no_fields() {
        assert_eq!(infer("{}").unwrap(), Ty::Object(Fields::new()));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = infer(r#"{"a": }"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    #[test]
    fn pathological_nesting_is_rejected() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = infer(&deep).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { max: MAX_DEPTH }));

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(infer(&ok).is_ok());
    }

    #[test]
    fn inference_is_deterministic() {
        let src = r#"{"name":"Ada","age":37,"tags":["x"],"address":{"city":"London"}}"#;
        assert_eq!(infer(src).unwrap(), infer(src).unwrap());
    }
}
