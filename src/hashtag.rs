use std::sync::OnceLock;

use regex::Regex;

fn not_tag_char() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^a-z0-9]").expect("Regex should compile"))
}

/// Lower-case `raw` and drop everything outside `[a-z0-9]`.
///
/// `"#JavaScript!"` becomes `"javascript"`. Normalizing twice changes nothing.
pub fn normalize(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    not_tag_char().replace_all(&lower, "").into_owned()
}

/// Tags attached to the post being composed, in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftHashtags(Vec<String>);

impl DraftHashtags {
    /// Normalize `raw` and append it. Returns the admitted tag, or `None` when it
    /// normalized to nothing or is already in the draft.
    pub fn add(&mut self, raw: &str) -> Option<&str> {
        let tag = normalize(raw);
        if tag.is_empty() || self.contains(&tag) {
            return None;
        }
        self.0.push(tag);
        self.0.last().map(String::as_str)
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
