use std::{path::Path, sync::LazyLock};

use regex::Regex;

use super::{ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex is valid"));

// Captures: 1 = `%` for parameter entities, 2 = name, 3/4 = double/single quoted value.
static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<!ENTITY\s+(%\s+)?([^\s"'>]+)\s+(?:SYSTEM\s+|PUBLIC\s+"[^"]*"\s+)?(?:"([^"]*)"|'([^']*)')\s*>"#,
    )
    .expect("entity regex is valid")
});

static PARAMETER_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[\w.\-]+;").expect("parameter reference regex is valid"));

/// XML entity definition (`.dtd`) resources, used by legacy XUL localization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DtdParser;

impl ResourceParser for DtdParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        parse_dtd(&content).map_err(|reason| ParseError::malformed(path, reason))
    }
}

pub(crate) fn parse_dtd(content: &str) -> Result<StringList, String> {
    let without_comments = COMMENT_REGEX.replace_all(content, "");
    if without_comments.contains("<!--") {
        return Err("unterminated comment".to_string());
    }

    let mut list = StringList::new();
    for captures in ENTITY_REGEX.captures_iter(&without_comments) {
        // Parameter entities pull in other files; they are not strings.
        if captures.get(1).is_some() {
            continue;
        }
        let name = &captures[2];
        let value = captures
            .get(3)
            .or_else(|| captures.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        list.insert(StringEntry::new(name, value));
    }

    let leftover = ENTITY_REGEX.replace_all(&without_comments, "");
    let leftover = PARAMETER_REFERENCE_REGEX.replace_all(&leftover, "");
    if let Some(garbage) = leftover.split_whitespace().next() {
        return Err(format!("unexpected content near '{}'", garbage));
    }

    Ok(list)
}
