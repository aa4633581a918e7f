use std::collections::{BTreeMap, btree_map};

/// A single translatable string from a resource file.
///
/// Identity is the key; the value is only used to decide whether the
/// string carries translated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// Normalized identifier (e.g. `browser/browser/browser.ftl:menu-file`).
    pub id: String,
    /// Raw value as found in the resource.
    pub value: String,
    /// True when the value carries non-whitespace content.
    pub is_translated: bool,
}

impl StringEntry {
    /// Create an entry whose translated flag is derived from the value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let is_translated = !value.trim().is_empty();
        Self {
            id: id.into(),
            value,
            is_translated,
        }
    }

    /// Create an entry with an explicit translated flag.
    pub fn with_status(id: impl Into<String>, value: impl Into<String>, is_translated: bool) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            is_translated,
        }
    }
}

/// All translatable strings of one locale/product/version snapshot.
///
/// Keys are unique; iteration follows key order so that everything derived
/// from a list is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList {
    entries: BTreeMap<String, StringEntry>,
}

impl StringList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same key.
    pub fn insert(&mut self, entry: StringEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries carrying translated content.
    pub fn translated_len(&self) -> usize {
        self.entries.values().filter(|e| e.is_translated).count()
    }

    /// Move every entry of `other` into this list. Later entries win on key collisions.
    pub fn extend(&mut self, other: StringList) {
        self.entries.extend(other.entries);
    }

    /// Prefix every key with `<scope>:` so strings from different files never collide.
    pub fn qualified(self, scope: &str) -> StringList {
        let entries = self
            .entries
            .into_values()
            .map(|entry| {
                let id = qualify_key(scope, &entry.id);
                (id.clone(), StringEntry { id, ..entry })
            })
            .collect();
        StringList { entries }
    }

    /// Keep only entries matching the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&StringEntry) -> bool) {
        self.entries.retain(|_, entry| keep(entry));
    }

    /// Drop entries without content (used for reference lists: blank
    /// source strings are not part of the translatable key set).
    pub fn retain_translated(&mut self) {
        self.retain(|entry| entry.is_translated);
    }
}

impl FromIterator<StringEntry> for StringList {
    fn from_iter<I: IntoIterator<Item = StringEntry>>(iter: I) -> Self {
        let mut list = StringList::new();
        for entry in iter {
            list.insert(entry);
        }
        list
    }
}

impl IntoIterator for StringList {
    type Item = StringEntry;
    type IntoIter = btree_map::IntoValues<String, StringEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

/// Build a path-qualified key: `browser/browser/browser.ftl` + `menu-file`
/// becomes `browser/browser/browser.ftl:menu-file`.
pub fn qualify_key(scope: &str, id: &str) -> String {
    format!("{}:{}", scope, id)
}
