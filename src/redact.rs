//! Secret redaction for logged values.
//!
//! Configuration layers and command invocations are logged as JSON. Before
//! they are written, every object entry whose key names a secret is replaced
//! with [`REDACTED`], matching key names case-insensitively so that both the
//! configuration field (`coveralls_repo_token`) and the child environment
//! variable (`COVERALLS_REPO_TOKEN`) are caught.

use ortho_config::serde_json::{Map, Value};

/// Placeholder written in place of a secret value.
pub const REDACTED: &str = "***";

/// Key names whose values must never be logged.
const SECRET_KEYS: &[&str] = &["coveralls_repo_token"];

/// Returns whether `key` names a secret value.
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS
        .iter()
        .any(|secret| secret.eq_ignore_ascii_case(key))
}

/// Returns a copy of `value` with every secret entry replaced.
///
/// Secrets that are absent (`null`) stay `null` so the log still shows that
/// no token was configured.
#[must_use]
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, entry)| {
                    let redacted = if is_secret_key(key) && !entry.is_null() {
                        Value::String(REDACTED.to_owned())
                    } else {
                        redact_value(entry)
                    };
                    (key.clone(), redacted)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}

/// Serialises `value` to compact JSON with secrets redacted.
#[must_use]
pub fn to_redacted_json(value: &Value) -> String {
    redact_value(value).to_string()
}
