//! Best-effort field extraction from control datagrams
//!
//! Control messages are small JSON-like text blobs sent by viewers and
//! operator consoles. Senders may hand-build or truncate them, so these
//! extractors never fail: every function degrades to a default instead of
//! rejecting the message. This is deliberately not a full JSON parser.

/// Whether the message contains the double-quoted token, e.g. `"subscribe"`
pub fn has_token(msg: &str, token: &str) -> bool {
    msg.contains(&format!("\"{}\"", token))
}

/// Extract a numeric port following `key`
///
/// Finds the key substring, the next `:`, then a contiguous run of digits
/// (adjacent whitespace and quotes tolerated). Returns `default` when the
/// key is missing, the value is non-numeric, or it does not fit a port.
pub fn extract_port(msg: &str, key: &str, default: u16) -> u16 {
    let Some(key_pos) = msg.find(key) else {
        return default;
    };
    let rest = &msg[key_pos + key.len()..];
    let Some(colon) = rest.find(':') else {
        return default;
    };
    let value = rest[colon + 1..].trim_start().trim_start_matches('"');
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(default)
}

/// Extract the next double-quoted string following the quoted `key`
///
/// Returns `None` when the key, the following `:`, or either quote is
/// missing. An empty string between the quotes yields `Some("")`.
pub fn extract_quoted<'a>(msg: &'a str, key: &str) -> Option<&'a str> {
    let quoted_key = format!("\"{}\"", key);
    let key_pos = msg.find(&quoted_key)?;
    let rest = &msg[key_pos + quoted_key.len()..];
    let colon = rest.find(':')?;
    let rest = &rest[colon + 1..];
    let open = rest.find('"')?;
    let rest = &rest[open + 1..];
    let close = rest.find('"')?;
    Some(&rest[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_token() {
        assert!(has_token(r#"{"type": "subscribe"}"#, "subscribe"));
        assert!(!has_token(r#"{"type": "unsubscribe?"}"#, "cmd"));
        assert!(!has_token("subscribe", "subscribe")); // unquoted
    }

    #[test]
    fn test_extract_port_present() {
        let msg = r#"{"type": "subscribe", "video_port": 7001}"#;
        assert_eq!(extract_port(msg, "video_port", 5600), 7001);
    }

    #[test]
    fn test_extract_port_missing_key() {
        assert_eq!(extract_port(r#"{"type": "subscribe"}"#, "video_port", 5600), 5600);
    }

    #[test]
    fn test_extract_port_whitespace_and_quotes() {
        assert_eq!(
            extract_port(r#"{ "video_port"  :   "7100" }"#, "video_port", 5600),
            7100
        );
    }

    #[test]
    fn test_extract_port_non_numeric() {
        assert_eq!(
            extract_port(r#"{"video_port": "high"}"#, "video_port", 5600),
            5600
        );
        assert_eq!(extract_port(r#"{"video_port": -1}"#, "video_port", 5600), 5600);
    }

    #[test]
    fn test_extract_port_out_of_range() {
        assert_eq!(
            extract_port(r#"{"video_port": 700100}"#, "video_port", 5600),
            5600
        );
    }

    #[test]
    fn test_extract_port_missing_colon() {
        assert_eq!(extract_port(r#"video_port 7001"#, "video_port", 5600), 5600);
    }

    #[test]
    fn test_extract_quoted_present() {
        let msg = r#"{"type": "cmd", "value": "FORWARD"}"#;
        assert_eq!(extract_quoted(msg, "value"), Some("FORWARD"));
    }

    #[test]
    fn test_extract_quoted_empty_string() {
        assert_eq!(extract_quoted(r#"{"value": ""}"#, "value"), Some(""));
    }

    #[test]
    fn test_extract_quoted_missing_pieces() {
        assert_eq!(extract_quoted(r#"{"type": "cmd"}"#, "value"), None);
        assert_eq!(extract_quoted(r#"{"value": }"#, "value"), None);
        assert_eq!(extract_quoted(r#"{"value": "unterminated}"#, "value"), None);
    }

    #[test]
    fn test_extractors_tolerate_garbage() {
        let garbage = "\u{1}\u{2}not json at all::\"\"";
        assert_eq!(extract_port(garbage, "video_port", 5600), 5600);
        assert_eq!(extract_quoted(garbage, "value"), None);
    }
}
