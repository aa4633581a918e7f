use std::path::Path;

use fluent_syntax::{
    ast::{Attribute, Entry, Pattern, PatternElement},
    parser,
};

use super::{ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

/// Fluent (`.ftl`) resources.
///
/// Messages produce `id`, terms produce `-id`, and every attribute produces
/// `id.attribute`. A message without a value but with attributes is present
/// (its content lives in the attributes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FluentParser;

impl ResourceParser for FluentParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        parse_fluent(&content).map_err(|reason| ParseError::malformed(path, reason))
    }
}

pub(crate) fn parse_fluent(content: &str) -> Result<StringList, String> {
    let resource = parser::parse(content).map_err(|(_, errors)| {
        let count = errors.len();
        match errors.first() {
            Some(first) => format!(
                "{} syntax error(s), first {:?} at byte {}",
                count, first.kind, first.pos.start
            ),
            None => "syntax error".to_string(),
        }
    })?;

    let mut list = StringList::new();
    for entry in resource.body {
        match entry {
            Entry::Message(message) => {
                let id = message.id.name;
                let is_translated = match &message.value {
                    Some(pattern) => has_content(pattern),
                    None => !message.attributes.is_empty(),
                };
                let value = message.value.as_ref().map(flatten).unwrap_or_default();
                list.insert(StringEntry::with_status(id, value, is_translated));
                push_attributes(&mut list, id, &message.attributes);
            }
            Entry::Term(term) => {
                let id = format!("-{}", term.id.name);
                list.insert(StringEntry::with_status(
                    id.as_str(),
                    flatten(&term.value),
                    has_content(&term.value),
                ));
                push_attributes(&mut list, &id, &term.attributes);
            }
            // Comments never produce entries.
            _ => {}
        }
    }
    Ok(list)
}

fn push_attributes(list: &mut StringList, id: &str, attributes: &[Attribute<&str>]) {
    for attribute in attributes {
        list.insert(StringEntry::with_status(
            format!("{}.{}", id, attribute.id.name),
            flatten(&attribute.value),
            has_content(&attribute.value),
        ));
    }
}

/// A placeable always counts as content; text counts when it is not blank.
fn has_content(pattern: &Pattern<&str>) -> bool {
    pattern.elements.iter().any(|element| match element {
        PatternElement::TextElement { value } => !value.trim().is_empty(),
        PatternElement::Placeable { .. } => true,
    })
}

fn flatten(pattern: &Pattern<&str>) -> String {
    pattern
        .elements
        .iter()
        .map(|element| match element {
            PatternElement::TextElement { value } => *value,
            PatternElement::Placeable { .. } => "{…}",
        })
        .collect()
}
