//! Attribute tokenizer for legacy recurrence rules.
//!
//! A rule is a `;`-separated list of `KEY=VALUE` attributes, optionally
//! led by an `RRULE:` or `EXRULE:` tag. Some exporters emit one
//! attribute per line instead of `;` separators, so newlines are
//! normalized first.

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// One raw attribute: uppercased key, verbatim value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub key: String,
    pub value: String,
}

/// Strips a leading `RRULE:` / `EXRULE:` tag, case-insensitively.
fn strip_tag(rule: &str) -> &str {
    for tag in ["RRULE:", "EXRULE:"] {
        if rule.len() >= tag.len() && rule[..tag.len()].eq_ignore_ascii_case(tag) {
            return &rule[tag.len()..];
        }
    }
    rule
}

/// Splits a rule string into raw attributes.
///
/// Empty segments are dropped. Each remaining segment splits at its
/// first `=` or `:`; the key is uppercased, the value kept verbatim.
///
/// ## Errors
/// Returns [`ParseErrorKind::EmptyRule`] if nothing remains after
/// stripping, and [`ParseErrorKind::UnexpectedToken`] for a segment with
/// no separator.
pub fn tokenize(rule: &str) -> ParseResult<Vec<RawAttribute>> {
    let normalized = rule.replace('\n', ";");
    let body = strip_tag(normalized.trim());

    let mut attrs = Vec::new();
    for segment in body.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let split_at = segment
            .find(['=', ':'])
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    format!("attribute \"{segment}\" has no value"),
                )
            })?;
        attrs.push(RawAttribute {
            key: segment[..split_at].to_ascii_uppercase(),
            value: segment[split_at + 1..].to_string(),
        });
    }

    if attrs.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyRule,
            "rule is empty",
        ));
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_key_value_pairs() {
        let attrs = tokenize("FREQ=WEEKLY;COUNT=4").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].key, "FREQ");
        assert_eq!(attrs[0].value, "WEEKLY");
        assert_eq!(attrs[1].key, "COUNT");
        assert_eq!(attrs[1].value, "4");
    }

    #[test]
    fn strips_rrule_tag_case_insensitively() {
        let attrs = tokenize("rrule:FREQ=DAILY").unwrap();
        assert_eq!(attrs[0].key, "FREQ");
        let attrs = tokenize("EXRULE:FREQ=DAILY").unwrap();
        assert_eq!(attrs[0].key, "FREQ");
    }

    #[test]
    fn normalizes_newline_separators() {
        let attrs = tokenize("FREQ=WEEKLY\nBYDAY=MO").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].key, "BYDAY");
    }

    #[test]
    fn lowercase_keys_are_uppercased() {
        let attrs = tokenize("freq=WEEKLY").unwrap();
        assert_eq!(attrs[0].key, "FREQ");
    }

    #[test]
    fn colon_also_separates_key_from_value() {
        let attrs = tokenize("DTSTART:20250101T000000Z").unwrap();
        assert_eq!(attrs[0].key, "DTSTART");
        assert_eq!(attrs[0].value, "20250101T000000Z");
    }

    #[test]
    fn value_keeps_later_separators() {
        let attrs = tokenize("TZID=America/New_York;FREQ=DAILY").unwrap();
        assert_eq!(attrs[0].value, "America/New_York");
    }

    #[test]
    fn empty_segments_are_dropped() {
        let attrs = tokenize("FREQ=WEEKLY;;COUNT=2;").unwrap();
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn empty_rule_is_an_error() {
        let err = tokenize("RRULE:").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyRule);
        let err = tokenize("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyRule);
    }

    #[test]
    fn bare_token_is_an_error() {
        let err = tokenize("WEEKLY").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }
}
