//! Parameter extraction from free-form chat messages
//!
//! Each extractor pulls one kind of parameter out of a message with a fixed
//! pattern. Extraction is best-effort: a pattern that does not match (or a
//! JSON snippet that does not parse) yields the fallback, never an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::domain::proxy::HttpMethod;

/// North American phone numbers, with optional country code and separators
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .unwrap_or_else(|e| panic!("invalid phone pattern: {}", e))
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^\s]+").unwrap_or_else(|e| panic!("invalid URL pattern: {}", e))
});

static CALL_MESSAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"say\s+["'](.+?)["']"#,
        r#"message\s+["'](.+?)["']"#,
        r"tell\s+them\s+(.+?)(?:\s+|$)",
    ]
    .iter()
    .map(|pattern| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid call message pattern: {}", e))
    })
    .collect()
});

static HEADERS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"headers?\s*[:=]\s*(\{.+?\})")
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid headers pattern: {}", e))
});

static DATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"data\s*[:=]\s*(\{.+?\})")
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid data pattern: {}", e))
});

/// Methods checked in priority order; the first whole-word hit wins
static METHOD_PATTERNS: Lazy<Vec<(HttpMethod, Regex)>> = Lazy::new(|| {
    [
        (HttpMethod::GET, r"\bGET\b"),
        (HttpMethod::POST, r"\bPOST\b"),
        (HttpMethod::PUT, r"\bPUT\b"),
        (HttpMethod::DELETE, r"\bDELETE\b"),
        (HttpMethod::PATCH, r"\bPATCH\b"),
    ]
    .iter()
    .map(|(method, pattern)| {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid method pattern: {}", e));
        (*method, regex)
    })
    .collect()
});

/// Find the first phone number in the message
pub fn phone_number(message: &str) -> Option<&str> {
    PHONE_PATTERN.find(message).map(|m| m.as_str())
}

/// Find the first http(s) URL in the message
pub fn url(message: &str) -> Option<&str> {
    URL_PATTERN.find(message).map(|m| m.as_str())
}

/// Find an HTTP method mentioned as a whole word; `None` when absent
pub fn http_method(message: &str) -> Option<HttpMethod> {
    METHOD_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(message))
        .map(|(method, _)| *method)
}

/// Extract the message to speak on a call ("say '...'", "message '...'",
/// "tell them ...")
pub fn call_message(message: &str) -> Option<String> {
    CALL_MESSAGE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(message)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Extract an inline `headers: {...}` JSON object; unparseable JSON yields
/// an empty map
pub fn headers(message: &str) -> HashMap<String, String> {
    let Some(captures) = HEADERS_PATTERN.captures(message) else {
        return HashMap::new();
    };
    let Some(raw) = captures.get(1) else {
        return HashMap::new();
    };

    match serde_json::from_str::<HashMap<String, Value>>(raw.as_str()) {
        Ok(parsed) => parsed
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
        Err(error) => {
            tracing::debug!(raw = raw.as_str(), %error, "failed to parse inline headers");
            HashMap::new()
        }
    }
}

/// Extract an inline `data: {...}` JSON object; unparseable JSON yields `None`
pub fn data(message: &str) -> Option<Value> {
    let raw = DATA_PATTERN.captures(message)?.get(1)?;

    match serde_json::from_str(raw.as_str()) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::debug!(raw = raw.as_str(), %error, "failed to parse inline data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phone_number_formats() {
        assert_eq!(
            phone_number("Call +1-555-123-4567 please"),
            Some("+1-555-123-4567")
        );
        assert_eq!(phone_number("phone (555) 123-4567"), Some("(555) 123-4567"));
        assert_eq!(phone_number("dial 5551234567"), Some("5551234567"));
        assert_eq!(phone_number("call 555.123.4567"), Some("555.123.4567"));
        assert_eq!(phone_number("call my office"), None);
    }

    #[test]
    fn test_url_extraction() {
        assert_eq!(
            url("GET https://api.example.com/data please"),
            Some("https://api.example.com/data")
        );
        assert_eq!(url("fetch http://localhost:3000/x"), Some("http://localhost:3000/x"));
        assert_eq!(url("no link here"), None);
    }

    #[test]
    fn test_http_method_whole_word() {
        assert_eq!(
            http_method("Make a POST request to https://x"),
            Some(HttpMethod::POST)
        );
        assert_eq!(http_method("delete that record"), Some(HttpMethod::DELETE));
        // "budget" contains "get" but is not a method mention
        assert_eq!(http_method("check the budget report"), None);
        assert_eq!(http_method("just fetch it"), None);
    }

    #[test]
    fn test_http_method_priority_order() {
        // both present: GET is checked first
        assert_eq!(
            http_method("GET or POST, whichever"),
            Some(HttpMethod::GET)
        );
    }

    #[test]
    fn test_call_message_patterns() {
        assert_eq!(
            call_message(r#"Call 555-123-4567 and say "Hello World""#),
            Some("Hello World".to_string())
        );
        assert_eq!(
            call_message("phone them with message 'meeting at noon'"),
            Some("meeting at noon".to_string())
        );
        assert_eq!(
            call_message("call and tell them hi there"),
            Some("hi".to_string())
        );
        assert_eq!(call_message("call 555-123-4567"), None);
    }

    #[test]
    fn test_headers_extraction() {
        let extracted = headers(r#"GET https://x with headers: {"Authorization": "Bearer t"}"#);
        assert_eq!(
            extracted.get("Authorization").map(String::as_str),
            Some("Bearer t")
        );

        assert!(headers("no headers mentioned").is_empty());
        // broken JSON is swallowed
        assert!(headers("headers: {not json}").is_empty());
    }

    #[test]
    fn test_data_extraction() {
        assert_eq!(
            data(r#"POST to https://x with data: {"name": "John"}"#),
            Some(json!({"name": "John"}))
        );
        assert_eq!(data("no payload"), None);
        assert_eq!(data("data: {broken"), None);
        assert_eq!(data("data: {broken}"), None);
    }
}
