//! `${a.b.c}` path templates
//!
//! Placeholders are dotted paths into the release context, e.g.
//! `./amo-release/${nextRelease.version}.zip`. Numeric segments index into
//! arrays (`${commits.0.hash}`). A missing or null leaf renders as empty
//! text; a path through a missing value, or one ending on an object or
//! array, is an error.

use regex::{Captures, Regex};
use serde_json::Value;

use crate::context::ReleaseContext;
use crate::error::{ReleaseError, ReleaseResult};

const PLACEHOLDER_PATTERN: &str = r"\$\{\s*([^}\s]*)\s*\}";

/// `Ok(None)` when only the last segment is missing.
fn lookup<'a>(scope: &'a Value, path: &str) -> Result<Option<&'a Value>, ()> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = scope;
    for (index, segment) in segments.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => return Err(()),
        };
        match next {
            Some(value) => current = value,
            None if index + 1 == segments.len() => return Ok(None),
            None => return Err(()),
        }
    }
    Ok(Some(current))
}

/// Render a template against an arbitrary JSON scope.
pub fn render(template: &str, scope: &Value) -> ReleaseResult<String> {
    let pattern = Regex::new(PLACEHOLDER_PATTERN).map_err(|err| ReleaseError::InvalidTemplate {
        template: template.to_string(),
        details: err.to_string(),
    })?;

    let mut unresolved = Vec::new();
    let rendered = pattern.replace_all(template, |caps: &Captures| {
        let path = &caps[1];
        match lookup(scope, path) {
            Ok(Some(Value::String(s))) => s.clone(),
            Ok(Some(Value::Number(n))) => n.to_string(),
            Ok(Some(Value::Bool(b))) => b.to_string(),
            Ok(None) | Ok(Some(Value::Null)) => String::new(),
            _ => {
                unresolved.push(path.to_string());
                String::new()
            }
        }
    });

    if !unresolved.is_empty() {
        return Err(ReleaseError::InvalidTemplate {
            template: template.to_string(),
            details: format!("unresolved placeholders: {}", unresolved.join(", ")),
        });
    }

    Ok(rendered.into_owned())
}

/// Render a template against the release context.
pub fn apply_context(template: &str, context: &ReleaseContext) -> ReleaseResult<String> {
    render(template, &context.template_scope())
}
