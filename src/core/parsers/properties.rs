use std::path::Path;

use super::{ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

/// Java-style `.properties` resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertiesParser;

impl ResourceParser for PropertiesParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        Ok(parse_properties(&content))
    }
}

pub(crate) fn parse_properties(content: &str) -> StringList {
    let mut list = StringList::new();
    for line in logical_lines(content) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let (key, value) = split_key_value(trimmed);
        if key.is_empty() {
            continue;
        }
        list.insert(StringEntry::new(key, value.trim()));
    }
    list
}

/// Join physical lines ending with an odd number of backslashes.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in content.lines() {
        let piece = if continuing { raw.trim_start() } else { raw };
        let trailing = piece.chars().rev().take_while(|c| *c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&piece[..piece.len() - 1]);
            continuing = true;
        } else {
            current.push_str(piece);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }
    if continuing {
        lines.push(current);
    }
    lines
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (String, &str) {
    let mut key = String::new();
    let mut chars = line.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    key.push(escaped);
                }
            }
            '=' | ':' => return (key, &line[index + 1..]),
            c if c.is_whitespace() => {
                let rest = line[index..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (key, rest);
            }
            c => key.push(c),
        }
    }
    (key, "")
}
