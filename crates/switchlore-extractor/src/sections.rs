//! Section splitting
//!
//! Captured switch output usually concatenates several commands, each
//! introduced by a banner such as `--- show running-config`. Splitting turns
//! that into a name → content map so each command specification sees only
//! the output of its own command.

use indexmap::IndexMap;

/// Default banner recognizer: `---` lines mentioning a `show ` command
///
/// ```
/// use switchlore_extractor::default_section_header;
///
/// assert_eq!(
///     default_section_header("--- show ip interface brief ---"),
///     Some("show ip interface brief".to_string())
/// );
/// assert_eq!(default_section_header("------"), None);
/// ```
pub fn default_section_header(line: &str) -> Option<String> {
    if line.starts_with("---") && line.contains("show ") {
        Some(line.trim_matches(|c| c == '-' || c == ' ').trim().to_string())
    } else {
        None
    }
}

/// Split text into sections using [`default_section_header`]
pub fn split_sections(text: &str) -> IndexMap<String, String> {
    split_sections_with(text, default_section_header)
}

/// Split text into sections with a custom banner recognizer
///
/// Lines before the first banner are dropped and trailing whitespace is
/// stripped from every line. A repeated section name keeps its first position
/// and takes the later content. A trailing section with no lines is dropped.
pub fn split_sections_with<F>(text: &str, header: F) -> IndexMap<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut sections = IndexMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines().map(str::trim_end) {
        if let Some(name) = header(line) {
            if let Some((previous, content)) = current.take() {
                sections.insert(previous, content.join("\n"));
            }
            current = Some((name, Vec::new()));
        } else if let Some((_, content)) = current.as_mut() {
            content.push(line);
        }
    }

    if let Some((name, content)) = current {
        if !content.is_empty() {
            sections.insert(name, content.join("\n"));
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_two_sections() {
        let text = "preamble\n--- show version\nCisco IOS Software, Version 15.2(4)E7  \n--- show running-config\nhostname sw1\ninterface Gi0/1\n";
        let sections = split_sections(text);

        let names: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["show version", "show running-config"]);
        assert_eq!(sections["show version"], "Cisco IOS Software, Version 15.2(4)E7");
        assert_eq!(sections["show running-config"], "hostname sw1\ninterface Gi0/1");
    }

    #[test]
    fn test_no_headers() {
        assert!(split_sections("hostname sw1\ninterface Gi0/1\n").is_empty());
    }

    #[test]
    fn test_empty_sections() {
        let text = "--- show clock\n--- show version\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["show clock"], "");
    }

    #[test]
    fn test_duplicate_section_takes_later_content() {
        let text = "--- show clock\n10:00\n--- show version\nv1\n--- show clock\n11:00\n";
        let sections = split_sections(text);
        let names: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["show clock", "show version"]);
        assert_eq!(sections["show clock"], "11:00");
    }

    #[test]
    fn test_custom_header() {
        let text = "## vlans\nvlan 10\n## ports\nPORT: 1\n";
        let sections = split_sections_with(text, |line| {
            line.strip_prefix("## ").map(str::to_string)
        });
        assert_eq!(sections["vlans"], "vlan 10");
        assert_eq!(sections["ports"], "PORT: 1");
    }

    #[test]
    fn test_default_header_requires_show() {
        assert_eq!(default_section_header("--- running config"), None);
        assert_eq!(default_section_header("show version"), None);
        assert_eq!(
            default_section_header("--- show running-config interface"),
            Some("show running-config interface".to_string())
        );
    }
}
