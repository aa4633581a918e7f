use std::path::Path;

use super::{ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

/// INI resources (e.g. `crashreporter.ini`). Keys are `Section.key`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IniParser;

impl ResourceParser for IniParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        parse_ini(&content).map_err(|reason| ParseError::malformed(path, reason))
    }
}

pub(crate) fn parse_ini(content: &str) -> Result<StringList, String> {
    let mut list = StringList::new();
    let mut section: Option<String> = None;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| format!("line {}: unterminated section header", index + 1))?;
            section = Some(name.trim().to_string());
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("line {}: expected 'key=value'", index + 1))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("line {}: empty key", index + 1));
        }

        let id = match &section {
            Some(section) => format!("{}.{}", section, key),
            None => key.to_string(),
        };
        list.insert(StringEntry::new(id, value.trim()));
    }

    Ok(list)
}
