use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

use super::error::ValidationError;

// Every pattern matches double-quoted strings first so their contents are left untouched.
lazy_static! {
    static ref SINGLE_QUOTED: Regex =
        Regex::new(r#""(?:[^"\\]|\\.)*"|'((?:[^'\\]|\\.)*)'"#).unwrap();
    static ref BARE_KEY: Regex =
        Regex::new(r#""(?:[^"\\]|\\.)*"|([{,]\s*)([A-Za-z_$][\w$]*)(\s*:)"#).unwrap();
    static ref TRAILING_SEPARATOR: Regex = Regex::new(r#""(?:[^"\\]|\\.)*"|,(\s*[}\]])"#).unwrap();
}

fn requote(caps: &Captures) -> String {
    match caps.get(1) {
        Some(inner) => {
            let inner = inner
                .as_str()
                .replace("\\'", "'")
                .replace("\\\"", "\"")
                .replace('"', "\\\"");
            format!("\"{inner}\"")
        }
        None => caps[0].to_string(),
    }
}

fn quote_key(caps: &Captures) -> String {
    match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(lead), Some(key), Some(colon)) => {
            format!("{}\"{}\"{}", lead.as_str(), key.as_str(), colon.as_str())
        }
        _ => caps[0].to_string(),
    }
}

fn drop_separator(caps: &Captures) -> String {
    match caps.get(1) {
        Some(close) => close.as_str().to_string(),
        None => caps[0].to_string(),
    }
}

/// Rewrites object-literal text (bare keys, single quotes, trailing commas) into strict JSON.
pub fn normalize_literal(text: &str) -> String {
    let text: Cow<str> = SINGLE_QUOTED.replace_all(text, requote);
    let text = BARE_KEY.replace_all(&text, quote_key).into_owned();
    TRAILING_SEPARATOR
        .replace_all(&text, drop_separator)
        .into_owned()
}

pub fn parse_literal(text: &str) -> Result<Value, ValidationError> {
    let normalized = normalize_literal(text);
    log::trace!("normalized literal: {normalized}");

    serde_json::from_str(&normalized).map_err(|e| ValidationError::LiteralParseFailure {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn quotes_bare_keys_and_single_quoted_strings() {
        assert_eq!(
            parse_literal("{ server: 'x', port: 8080 }").unwrap(),
            json!({"server": "x", "port": 8080})
        );
    }

    #[test]
    fn strips_trailing_separators() {
        assert_eq!(
            parse_literal("{ tags: ['a', 'b',], nested: { ok: true, }, }").unwrap(),
            json!({"tags": ["a", "b"], "nested": {"ok": true}})
        );
    }

    #[test]
    fn leaves_double_quoted_contents_alone() {
        assert_eq!(
            parse_literal(r#"{ "text": "it's {a: 1,}", other: 'say "hi"' }"#).unwrap(),
            json!({"text": "it's {a: 1,}", "other": "say \"hi\""})
        );
    }

    #[test]
    fn escaped_quote_in_single_quoted_string() {
        assert_eq!(
            parse_literal(r"{ name: 'O\'Brien' }").unwrap(),
            json!({"name": "O'Brien"})
        );
    }

    #[test]
    fn escaped_double_quote_in_single_quoted_string() {
        assert_eq!(
            parse_literal(r#"{ a: 'say \"hi\"', b: 'mixed "raw" and \"escaped\"' }"#).unwrap(),
            json!({"a": "say \"hi\"", "b": "mixed \"raw\" and \"escaped\""})
        );
    }

    #[test]
    fn malformed_literal() {
        let err = parse_literal("{ server: 'x', port: }").unwrap_err();
        assert!(matches!(err, ValidationError::LiteralParseFailure { .. }));
        assert!(err
            .to_string()
            .starts_with(crate::schema::error::LITERAL_FAILURE_PREFIX));
    }
}
