//! Helpers for resolving a single YAML scalar field, which may be a plain
//! number or a `${...}` templated expression.

use crate::env::Environment;
use crate::error::{ParamError, ParamErrorKind, ParamResult};

/// Resolve a document field's raw text against `env`.
///
/// If `raw` is wrapped in `${...}`, its body is parsed and evaluated as a
/// parameter expression. Otherwise `raw` is parsed directly as a numeric
/// literal.
pub fn resolve_field(raw: &str, env: &Environment) -> ParamResult<f64> {
    let trimmed = raw.trim();
    if let Some(body) = trimmed.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        crate::eval::eval_str(body, env)
    } else {
        trimmed.parse::<f64>().map_err(|_| {
            ParamError::new(
                ParamErrorKind::UnexpectedToken,
                format!("'{raw}' is neither a number nor a '${{...}}' expression"),
            )
        })
    }
}

/// `true` if `raw` is a `${...}` templated expression rather than a plain
/// literal.
pub fn is_expression(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.starts_with("${") && trimmed.ends_with('}')
}
