//! Line parser for `KEY=VALUE` env files.
//!
//! Parsing is lenient: a line contributes a pair only when its first `=`
//! sits past the first character. Everything else is skipped without a
//! diagnostic. There is no quoting, escaping or comment syntax.

/// Parses env file text into key/value pairs in line order.
///
/// Duplicate keys are kept; callers merging into a map get last-wins.
pub fn parse_env(text: &str) -> Vec<(String, String)> {
    text.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    match line.find('=') {
        Some(idx) if idx > 0 => {
            let key = line[..idx].trim();
            let value = line[idx + 1..].trim();
            Some((key.to_string(), value.to_string()))
        }
        _ => None,
    }
}
