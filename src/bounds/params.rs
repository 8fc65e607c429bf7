//! Typed accessors for layer keyword parameters.

use serde_json::Value;

use crate::bounds::{LayerError, LayerParams};
use crate::figure::Color;

fn invalid(name: &str, reason: impl Into<String>) -> LayerError {
    LayerError::Param {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Finite number, or `default` when absent.
pub fn f64_param(params: &LayerParams, name: &str, default: f64) -> Result<f64, LayerError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => match v.as_f64() {
            Some(x) if x.is_finite() => Ok(x),
            _ => Err(invalid(name, format!("expected a finite number, got {v}"))),
        },
    }
}

pub fn str_param<'a>(params: &'a LayerParams, name: &str) -> Result<Option<&'a str>, LayerError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(v) => Err(invalid(name, format!("expected a string, got {v}"))),
    }
}

pub fn color_param(params: &LayerParams, name: &str, default: Color) -> Result<Color, LayerError> {
    match str_param(params, name)? {
        None => Ok(default),
        Some(s) => Color::parse(s).ok_or_else(|| invalid(name, format!("unknown color '{s}'"))),
    }
}

/// A data-space point written as `[x, y]`.
pub fn point_param(params: &LayerParams, name: &str) -> Result<Option<(f64, f64)>, LayerError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(xs)) if xs.len() == 2 => match (xs[0].as_f64(), xs[1].as_f64()) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Some((x, y))),
            _ => Err(invalid(name, "expected two finite numbers")),
        },
        Some(v) => Err(invalid(name, format!("expected [x, y], got {v}"))),
    }
}
