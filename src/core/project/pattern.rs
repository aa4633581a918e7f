use regex::Regex;

/// Wildcard kinds, in the order they appear in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wildcard {
    /// `**/`: zero or more whole directories, capture keeps the trailing `/`.
    Directories,
    /// `**` at the end: anything, including `/`.
    Rest,
    /// `*`: part of a single path segment.
    Segment,
}

/// A project path pattern such as `browser/locales/en-US/**` or
/// `components/**/src/main/res/values/strings.xml`.
///
/// Matching a path yields the text captured by each wildcard; those captures
/// can be substituted into another pattern with the same wildcard sequence.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    wildcards: Vec<Wildcard>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, String> {
        let (tokens, wildcards) = tokenize(pattern);
        let mut source = String::from("^");
        for token in &tokens {
            match token {
                Token::Literal(text) => source.push_str(&regex::escape(text)),
                Token::Wildcard(Wildcard::Directories) => source.push_str("((?:[^/]*/)*)"),
                Token::Wildcard(Wildcard::Rest) => source.push_str("(.*)"),
                Token::Wildcard(Wildcard::Segment) => source.push_str("([^/]*)"),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| format!("invalid path pattern '{}': {}", pattern, e))?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
            wildcards,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Text captured by each wildcard, or `None` when the path does not match.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(path)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    /// Fill this pattern's wildcards with captures taken from another pattern.
    ///
    /// Returns `None` when the wildcard sequences differ.
    pub fn substitute(&self, captures: &[String]) -> Option<String> {
        if self.wildcards.len() != captures.len() {
            return None;
        }
        let (tokens, _) = tokenize(&self.raw);
        let mut captures = captures.iter();
        let mut result = String::new();
        for token in tokens {
            match token {
                Token::Literal(text) => result.push_str(&text),
                Token::Wildcard(_) => result.push_str(captures.next()?),
            }
        }
        Some(result)
    }
}

enum Token {
    Literal(String),
    Wildcard(Wildcard),
}

fn tokenize(pattern: &str) -> (Vec<Token>, Vec<Wildcard>) {
    let mut tokens = Vec::new();
    let mut wildcards = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        let wildcard = if let Some(after) = rest.strip_prefix("**/") {
            rest = after;
            Some(Wildcard::Directories)
        } else if let Some(after) = rest.strip_prefix("**") {
            rest = after;
            Some(Wildcard::Rest)
        } else if let Some(after) = rest.strip_prefix('*') {
            rest = after;
            Some(Wildcard::Segment)
        } else {
            literal.push(c);
            rest = &rest[c.len_utf8()..];
            None
        };

        if let Some(wildcard) = wildcard {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Wildcard(wildcard));
            wildcards.push(wildcard);
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    (tokens, wildcards)
}
