//! Resource file parsers.
//!
//! One parser per resource family shipped by the tracked products over time:
//! - `fluent`: Fluent (`.ftl`)
//! - `properties`: Java-style properties (`.properties`)
//! - `dtd`: XML entity definitions (`.dtd`)
//! - `ini`: INI files (`.ini`)
//! - `inc`: build-metadata definitions (`.inc`)
//! - `android`: Android string resources (`strings.xml`)
//!
//! Every parser returns either the complete list of entries in the file or a
//! [`ParseError`]; a file is never partially applied.

use std::{fs, path::Path};

use enum_dispatch::enum_dispatch;

use crate::{core::StringList, error::ParseError};

pub mod android;
pub mod dtd;
pub mod fluent;
pub mod inc;
pub mod ini;
pub mod properties;

pub use android::AndroidXmlParser;
pub use dtd::DtdParser;
pub use fluent::FluentParser;
pub use inc::IncParser;
pub use ini::IniParser;
pub use properties::PropertiesParser;

/// Whether a file is parsed as the reference (source-language) version.
///
/// Some formats mark strings that exist in the source but are not meant to
/// be localized; those are only dropped when parsing the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Reference,
    Localized,
}

#[enum_dispatch(ResourceParser)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Fluent(FluentParser),
    Properties(PropertiesParser),
    Dtd(DtdParser),
    Ini(IniParser),
    Inc(IncParser),
    AndroidXml(AndroidXmlParser),
}

#[enum_dispatch]
pub trait ResourceParser {
    /// Parse every entry of the file at `path`.
    ///
    /// Entry ids are local to the file; callers qualify them.
    fn parse(&self, path: &Path) -> Result<StringList, ParseError>;
}

impl ResourceFormat {
    /// Pick the parser for a file from its extension.
    pub fn for_path(path: &Path, mode: ParseMode) -> Option<Self> {
        let format = match path.extension().and_then(|e| e.to_str())? {
            "ftl" => FluentParser.into(),
            "properties" => PropertiesParser.into(),
            "dtd" => DtdParser.into(),
            "ini" => IniParser.into(),
            "inc" => IncParser.into(),
            "xml" => AndroidXmlParser::new(mode).into(),
            _ => return None,
        };
        Some(format)
    }
}

/// Parse a resource file, choosing the parser from its extension.
pub fn parse_resource(path: &Path, mode: ParseMode) -> Result<StringList, ParseError> {
    let format = ResourceFormat::for_path(path, mode).ok_or_else(|| {
        ParseError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    })?;
    format.parse(path)
}

/// Read a resource as UTF-8, dropping a leading byte order mark.
pub(crate) fn read_resource(path: &Path) -> Result<String, ParseError> {
    let bytes = fs::read(path).map_err(|e| ParseError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let content = String::from_utf8(bytes)
        .map_err(|e| ParseError::malformed(path, format!("invalid UTF-8: {}", e)))?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}
