//! Masking of credential-shaped keyword arguments at the export boundary.

use serde_json::{Map, Value};
use tracing::warn;

/// Key substrings that mark a keyword argument as credential-shaped.
const CREDENTIAL_MARKERS: [&str; 2] = ["key", "token"];

/// Number of trailing characters left visible in a masked value.
const PLAIN_SUFFIX_LEN: usize = 4;

/// Returns a copy of `kwargs` with credential-shaped values masked.
///
/// A key is credential-shaped when its lowercase form contains `key` or
/// `token` as a substring; the match is deliberately broad, so `keyboard`
/// qualifies. Masked values keep their last four characters and replace
/// everything before with `*`. All other entries are cloned unchanged,
/// value type included.
///
/// Two degenerate inputs are handled without raising, each flagged with a
/// `tracing::warn!` marker:
/// - a value of four characters or fewer has nothing to mask and passes
///   through verbatim;
/// - a non-string value is coerced to its compact JSON text before
///   masking, and the masked result is a string.
///
/// This runs only when a record is exported; the live record keeps the
/// real values so a retry can still authenticate.
#[must_use]
pub fn redact_kwargs(kwargs: &Map<String, Value>) -> Map<String, Value> {
    let mut redacted = Map::new();
    for (key, value) in kwargs {
        if is_credential_key(key) {
            redacted.insert(key.clone(), Value::String(mask_value(key, value)));
        } else {
            redacted.insert(key.clone(), value.clone());
        }
    }
    redacted
}

fn is_credential_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    CREDENTIAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn mask_value(key: &str, value: &Value) -> String {
    let text = match value {
        Value::String(text) => text.clone(),
        other => {
            warn!(key, "coercing non-string credential value to text before masking");
            other.to_string()
        }
    };
    mask_text(key, &text)
}

fn mask_text(key: &str, text: &str) -> String {
    let masked_len = text.chars().count().saturating_sub(PLAIN_SUFFIX_LEN);
    if masked_len == 0 {
        warn!(key, "credential value too short to mask, passing it through");
        return text.to_owned();
    }

    let mut masked = "*".repeat(masked_len);
    masked.extend(text.chars().skip(masked_len));
    masked
}
