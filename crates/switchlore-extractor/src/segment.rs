//! Block segmentation
//!
//! Splits configuration text into named blocks: a start line opens a block,
//! the following lines form its body, and the block closes on a terminator,
//! on the next start line, on an unindented line (when asked to), or at the
//! end of the text.

use regex::Regex;

/// How a block-start line is recognized
#[derive(Debug, Clone)]
pub enum BlockStart {
    /// Line begins with this word followed by whitespace; the rest is the name
    Prefix(String),

    /// Line matches this regex; capture group 1 (or the whole match) is the name
    Pattern(Regex),
}

impl BlockStart {
    /// Block name if `line` opens a block
    pub fn name_of<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            BlockStart::Prefix(prefix) => {
                let prefix = prefix.trim_end();
                if prefix.is_empty() {
                    return None;
                }
                let rest = line.strip_prefix(prefix)?;
                if !rest.starts_with(char::is_whitespace) {
                    return None;
                }
                Some(rest.trim())
            }
            BlockStart::Pattern(regex) => {
                let captures = regex.captures(line)?;
                let name = captures.get(1).or_else(|| captures.get(0))?;
                Some(name.as_str().trim())
            }
        }
    }
}

/// Segmentation rules
#[derive(Debug, Clone)]
pub struct BlockRules {
    /// Block-start recognizer
    pub start: BlockStart,

    /// Lines that close a block, compared after trimming
    pub terminators: Vec<String>,

    /// Close the block on a non-blank line without leading whitespace
    pub close_on_unindented: bool,
}

impl BlockRules {
    /// Rules with a prefix recognizer and the given terminators
    pub fn prefix(section: impl Into<String>, terminators: Vec<String>) -> Self {
        Self {
            start: BlockStart::Prefix(section.into()),
            terminators,
            close_on_unindented: false,
        }
    }

    fn is_terminator(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.terminators.iter().any(|t| t.trim() == trimmed)
    }
}

/// One segmented block, borrowing from the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Name taken from the start line
    pub name: &'a str,

    /// The start line itself
    pub header: &'a str,

    /// Body lines in original order, start line and terminator excluded
    pub body: Vec<&'a str>,
}

impl Block<'_> {
    /// Body lines joined by newlines
    pub fn config(&self) -> String {
        self.body.join("\n")
    }

    /// Start line and body, as it appeared in the text
    pub fn raw(&self) -> String {
        let mut raw = String::from(self.header);
        for line in &self.body {
            raw.push('\n');
            raw.push_str(line);
        }
        raw
    }
}

/// Segment `text` into blocks
///
/// # Examples
///
/// ```
/// use switchlore_extractor::{segment_blocks, BlockRules};
///
/// let text = "interface Gi0/1\n description uplink\nexit\ninterface Gi0/2\n";
/// let blocks = segment_blocks(text, &BlockRules::prefix("interface", vec!["exit".into()]));
///
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].name, "Gi0/1");
/// assert_eq!(blocks[0].config(), " description uplink");
/// assert_eq!(blocks[1].config(), "");
/// ```
pub fn segment_blocks<'a>(text: &'a str, rules: &BlockRules) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'a>> = None;

    for line in text.lines() {
        if current.is_none() {
            if let Some(name) = rules.start.name_of(line) {
                current = Some(open(name, line));
            }
            continue;
        }

        if rules.is_terminator(line) {
            blocks.extend(current.take());
            continue;
        }

        if let Some(name) = rules.start.name_of(line) {
            blocks.extend(current.replace(open(name, line)));
            continue;
        }

        if rules.close_on_unindented
            && !line.trim().is_empty()
            && !line.starts_with(char::is_whitespace)
        {
            blocks.extend(current.take());
            continue;
        }

        if let Some(block) = current.as_mut() {
            block.body.push(line);
        }
    }

    blocks.extend(current);
    blocks
}

fn open<'a>(name: &'a str, header: &'a str) -> Block<'a> {
    Block {
        name,
        header,
        body: Vec::new(),
    }
}
