//! Parser for `.env` files.
//!
//! One `KEY=VALUE` declaration per line. Blank lines, `#` comments, lines
//! without `=` and lines with an empty key produce no entry. Values may contain `=`; only the first one
//! splits. A single matching pair of outer quotes is stripped, with no escape
//! processing.

/// Ordered key/value pairs read from one parse of a `.env` file.
///
/// A key assigned twice keeps the position of its first assignment and the
/// value of its last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEnv {
    entries: Vec<(String, String)>,
}

impl ParsedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a ParsedEnv {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub fn parse_env_str(contents: &str) -> ParsedEnv {
    let mut parsed = ParsedEnv::new();

    for line in contents.lines() {
        if let Some((key, value)) = parse_line(line) {
            parsed.insert(key.to_string(), value.to_string());
        }
    }

    parsed
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    // Lines without '=' are dropped silently.
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
