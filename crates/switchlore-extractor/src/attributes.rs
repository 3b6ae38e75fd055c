//! Interface attribute parsing
//!
//! Turns the body of an interface block into attribute columns. Command
//! keywords become the column name and arguments become the value, so
//! `ip access-group 101 in` lands in an `ip access-group` column instead of
//! a column per ACL number.

use std::collections::HashMap;
use switchlore_domain::FieldMap;

/// Keywords whose argument is free text and kept verbatim
const FREE_TEXT_KEYWORDS: &[&str] = &["description", "remark", "alias"];

/// Parse interface body lines into attribute columns
///
/// - `no <command>` sets `<command>` to `false`
/// - a lone keyword sets it to `true`
/// - `description`, `remark` and `alias` keep the rest of the line as is
/// - otherwise keyword tokens build the key and argument tokens the value
///
/// Repeated keys, and keys clashing with `reserved`, get `__2`, `__3`, ...
/// suffixes. Blank lines and `!` comments are skipped.
///
/// # Examples
///
/// ```
/// use switchlore_extractor::parse_attributes;
///
/// let body = [" channel-group 11 mode active", " no shutdown"];
/// let attributes = parse_attributes(body, &["interface", "config"]);
///
/// assert_eq!(attributes["channel-group mode"], "11 active");
/// assert_eq!(attributes["shutdown"], "false");
/// ```
pub fn parse_attributes<'a, I>(lines: I, reserved: &[&str]) -> FieldMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut attributes = FieldMap::new();
    let mut seen: HashMap<String, usize> = reserved.iter().map(|r| (r.to_string(), 1)).collect();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        let Some((key, value)) = parse_line(line) else {
            continue;
        };

        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        let column = if *count == 1 {
            key
        } else {
            format!("{}__{}", key, count)
        };
        attributes.insert(column, value);
    }

    attributes
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = tokens.split_first()?;

    if first == "no" && !rest.is_empty() {
        let key: Vec<&str> = rest
            .iter()
            .enumerate()
            .filter(|(i, token)| *i == 0 || is_keyword(token))
            .map(|(_, token)| *token)
            .collect();
        return Some((key.join(" "), "false".to_string()));
    }

    if rest.is_empty() {
        return Some((first.to_string(), "true".to_string()));
    }

    if FREE_TEXT_KEYWORDS.contains(&first) {
        let value = line[first.len()..].trim_start();
        return Some((first.to_string(), value.to_string()));
    }

    let mut key = vec![first];
    let mut value = Vec::new();
    for (i, token) in rest.iter().enumerate() {
        let last = i + 1 == rest.len();
        if last || !is_keyword(token) {
            value.push(*token);
        } else {
            key.push(*token);
        }
    }

    Some((key.join(" "), value.join(" ")))
}

fn is_keyword(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_lowercase())
        && token.chars().all(|c| c.is_ascii_lowercase() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESERVED: &[&str] = &["interface", "config", "raw", "command", "source_file"];

    fn parse(lines: &[&str]) -> FieldMap {
        parse_attributes(lines.iter().copied(), RESERVED)
    }

    #[test]
    fn test_access_port() {
        let attributes = parse(&[" description Uplink", " switchport access vlan 10"]);
        assert_eq!(attributes["description"], "Uplink");
        assert_eq!(attributes["switchport access vlan"], "10");
    }

    #[test]
    fn test_negation_and_flags() {
        let attributes = parse(&[" no shutdown", " no ip address"]);
        assert_eq!(attributes["shutdown"], "false");
        assert_eq!(attributes["ip address"], "false");

        let attributes = parse(&[" shutdown"]);
        assert_eq!(attributes["shutdown"], "true");
    }

    #[test]
    fn test_colons_are_preserved() {
        let attributes = parse(&[
            " description Link to ISP: Primary",
            " ipv6 address 2001:db8::1/64",
        ]);
        assert_eq!(attributes["description"], "Link to ISP: Primary");
        assert_eq!(attributes["ipv6 address"], "2001:db8::1/64");
    }

    #[test]
    fn test_hyphenated_keywords() {
        let attributes = parse(&[
            " ip domain-name example.com",
            " ip name-server 8.8.8.8",
            " ip helper-address 10.0.0.1",
        ]);
        assert_eq!(attributes["ip domain-name"], "example.com");
        assert_eq!(attributes["ip name-server"], "8.8.8.8");
        assert_eq!(attributes["ip helper-address"], "10.0.0.1");
    }

    #[test]
    fn test_numeric_tokens_stay_in_value() {
        let attributes = parse(&[
            " description Link to Core Switch",
            " channel-group 11 mode active",
            " ip access-group 101 in",
            " ip access-group 102 out",
        ]);
        assert_eq!(attributes["description"], "Link to Core Switch");
        assert_eq!(attributes["channel-group mode"], "11 active");
        assert_eq!(attributes["ip access-group"], "101 in");
        assert_eq!(attributes["ip access-group__2"], "102 out");
    }

    #[test]
    fn test_reserved_names_are_suffixed() {
        let attributes = parse(&[" config replace", " source_file x"]);
        assert_eq!(attributes["config__2"], "replace");
        assert_eq!(attributes["source_file__2"], "x");
        assert!(!attributes.contains_key("config"));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let attributes = parse(&["", " !", "! comment", "   "]);
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_emission_order() {
        let attributes = parse(&[" switchport mode trunk", " description core", " shutdown"]);
        let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["switchport mode", "description", "shutdown"]);
    }
}
