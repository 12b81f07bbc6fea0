// ============================================================================
// Log Sanitization - request bodies and raw SXAPI responses
// ============================================================================
//
// Everything written to tracing or to the request log passes through here:
//
// 1. Operator passwords are redacted from request bodies
// 2. Newlines, tabs and ANSI escapes are flattened so one call is one line
// 3. Other control characters are dropped
// 4. Tracing output is truncated to MAX_LOG_LENGTH characters
//
// ============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Maximum length for values written to tracing output
pub const MAX_LOG_LENGTH: usize = 200;

/// Request fields that are never logged in clear text
const SENSITIVE_FIELDS: &[&str] = &["operatorPassword", "OperatorPassword"];

static ANSI_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").expect("ANSI escape pattern is valid")
});

/// Flatten `input` onto a single printable line without truncating it.
pub fn flatten_for_log(input: &str) -> String {
    let no_ansi = ANSI_ESCAPE_REGEX.replace_all(input, "");

    no_ansi
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => None,
            c => Some(c),
        })
        .collect()
}

/// Flatten and truncate `input` for tracing output.
///
/// ```
/// use sxapi_import::utils::log_sanitizer::sanitize_for_log;
///
/// assert_eq!(sanitize_for_log("bad\nrow"), "bad row");
/// assert!(sanitize_for_log(&"a".repeat(300)).ends_with("..."));
/// ```
pub fn sanitize_for_log(input: &str) -> String {
    let flat = flatten_for_log(input);
    if flat.chars().count() > MAX_LOG_LENGTH {
        let truncated: String = flat.chars().take(MAX_LOG_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        flat
    }
}

pub fn redact_sensitive(input: &str) -> String {
    format!("[REDACTED-{}]", input.chars().count())
}

/// Copy of a request body with every credential password replaced, at any depth.
pub fn redact_credentials(body: &Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = if SENSITIVE_FIELDS.contains(&key.as_str()) {
                        match value {
                            Value::String(s) => Value::String(redact_sensitive(s)),
                            _ => Value::String("[REDACTED]".to_string()),
                        }
                    } else {
                        redact_credentials(value)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_credentials).collect()),
        other => other.clone(),
    }
}
