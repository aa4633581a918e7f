use std::path::Path;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::{ParseMode, ResourceParser, read_resource};
use crate::{
    core::{StringEntry, StringList},
    error::ParseError,
};

/// Android string resources (`res/values*/strings.xml`).
///
/// Only `<string>` children of `<resources>` are collected. When parsing the
/// reference, strings marked `translatable="false"` or
/// `tools:ignore="UnusedResources"` are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidXmlParser {
    mode: ParseMode,
}

impl AndroidXmlParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }
}

impl ResourceParser for AndroidXmlParser {
    fn parse(&self, path: &Path) -> Result<StringList, ParseError> {
        let content = read_resource(path)?;
        parse_android(&content, self.mode).map_err(|reason| ParseError::malformed(path, reason))
    }
}

struct PendingString {
    name: String,
    skip: bool,
    value: String,
}

pub(crate) fn parse_android(content: &str, mode: ParseMode) -> Result<StringList, String> {
    let mut reader = Reader::from_str(content);
    let mut list = StringList::new();
    let mut depth = 0usize;
    let mut pending: Option<PendingString> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {}", reader.buffer_position(), e))?;
        match event {
            Event::Start(start) => {
                depth += 1;
                if depth == 1 && start.local_name().as_ref() != b"resources" {
                    return Err("root element is not <resources>".to_string());
                }
                if depth == 2 && start.name().as_ref() == b"string" {
                    pending = Some(read_string_start(&start, mode)?);
                }
            }
            Event::Empty(start) => {
                if depth == 1 && start.name().as_ref() == b"string" {
                    let string = read_string_start(&start, mode)?;
                    push_string(&mut list, string);
                }
            }
            Event::Text(text) => {
                if let Some(string) = pending.as_mut() {
                    let decoded = text.unescape().map_err(|e| {
                        format!(
                            "string '{}' at byte {}: {}",
                            string.name,
                            reader.buffer_position(),
                            e
                        )
                    })?;
                    string.value.push_str(&decoded);
                }
            }
            Event::CData(data) => {
                if let Some(string) = pending.as_mut() {
                    string.value.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if depth == 2
                    && let Some(string) = pending.take()
                {
                    push_string(&mut list, string);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err("unexpected end of document".to_string());
    }
    Ok(list)
}

fn read_string_start(start: &BytesStart<'_>, mode: ParseMode) -> Result<PendingString, String> {
    let mut name = None;
    let mut translatable = true;
    let mut unused = false;

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        match attribute.key.as_ref() {
            b"name" => name = Some(value.into_owned()),
            b"translatable" => translatable = value.trim() != "false",
            b"tools:ignore" => {
                unused = value.split(',').any(|rule| rule.trim() == "UnusedResources");
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| "<string> element without a name".to_string())?;
    let skip = mode == ParseMode::Reference && (!translatable || unused);
    Ok(PendingString {
        name,
        skip,
        value: String::new(),
    })
}

fn push_string(list: &mut StringList, string: PendingString) {
    if !string.skip {
        list.insert(StringEntry::new(string.name, string.value));
    }
}
