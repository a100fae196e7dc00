use std::sync::LazyLock;

use regex::Regex;

use crate::domain::common::entities::app_errors::CoreError;

static FENCED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("fenced object pattern is valid")
});

static BRACED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("braced span pattern is valid"));

/// Isolates the JSON object embedded in a model reply.
///
/// Tried in order: an object inside a (optionally `json`-tagged) code fence,
/// then the widest `{ ... }` span, then the trimmed reply itself. The last
/// case is not validated here; callers still have to parse the result.
///
/// Nested fences or several brace groups in prose can yield a wrong span.
pub fn extract_json_from_response(text: &str) -> Result<&str, CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::EmptyResponse);
    }

    if let Some(object) = FENCED_OBJECT.captures(text).and_then(|caps| caps.get(1)) {
        return Ok(object.as_str());
    }

    if let Some(span) = BRACED_SPAN.find(text) {
        return Ok(span.as_str());
    }

    Ok(text.trim())
}

/// Extracts and checks that the result parses as JSON.
pub fn extract_valid_json(text: &str) -> Result<String, CoreError> {
    let json_text = extract_json_from_response(text)?;

    serde_json::from_str::<serde_json::Value>(json_text).map_err(|e| CoreError::InvalidJson {
        message: e.to_string(),
        raw: text.to_string(),
    })?;

    Ok(json_text.to_string())
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
