use std::path::Path;

use super::{ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

/// Build-metadata definitions (`defines.inc`): `#define KEY value` lines.
///
/// `#filter` / `#unfilter` preprocessor switches and `# ` comments carry no
/// strings. A `#define` without a value is an untranslated entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncParser;

impl ResourceParser for IncParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        parse_inc(&content).map_err(|reason| ParseError::malformed(path, reason))
    }
}

pub(crate) fn parse_inc(content: &str) -> Result<StringList, String> {
    let mut list = StringList::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("#define") {
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return Err(format!("line {}: unknown directive", index + 1));
            }
            let rest = rest.trim_start();
            let (key, value) = match rest.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (rest, ""),
            };
            if key.is_empty() {
                return Err(format!("line {}: #define without a key", index + 1));
            }
            list.insert(StringEntry::new(key, value));
            continue;
        }

        if trimmed.starts_with("#filter")
            || trimmed.starts_with("#unfilter")
            || trimmed == "#"
            || trimmed.starts_with("# ")
        {
            continue;
        }

        return Err(format!("line {}: expected '#define KEY value'", index + 1));
    }

    Ok(list)
}
