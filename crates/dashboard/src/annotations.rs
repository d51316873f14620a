// In crates/dashboard/src/annotations.rs

use std::collections::BTreeMap;

/// Free-text notes keyed by trade id.
///
/// Notes live independently of the trade set: replacing the trades keeps
/// every note, even for ids that are no longer present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    notes: BTreeMap<String, String>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, trade_id: &str) -> Option<&str> {
        self.notes.get(trade_id).map(String::as_str)
    }

    /// Stores `text` for `trade_id`, replacing any earlier note.
    pub fn set(&mut self, trade_id: impl Into<String>, text: impl Into<String>) {
        self.notes.insert(trade_id.into(), text.into());
    }

    pub fn remove(&mut self, trade_id: &str) -> Option<String> {
        self.notes.remove(trade_id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.notes.clone()
    }
}

impl From<BTreeMap<String, String>> for AnnotationStore {
    fn from(notes: BTreeMap<String, String>) -> Self {
        Self { notes }
    }
}
