//! A tag entry control with autocomplete.
//!
//! The editor owns an ordered list of tags, a free-text entry buffer and a list
//! of autocomplete candidates. It does not validate: the containing form
//! registers `on_change`/`on_touched` callbacks and enforces its own rules
//! (such as a maximum tag count).

use std::fmt;
use std::sync::Arc;

/// Accessibility announcements (screen readers, status lines).
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str);
}

/// Announcer that writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&self, message: &str) {
        tracing::info!(target: "larder::a11y", "{message}");
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Comma,
    Backspace,
    Char(char),
}

impl TagKey {
    pub fn from_char(c: char) -> Self {
        match c {
            '\n' | '\r' => TagKey::Enter,
            ',' => TagKey::Comma,
            '\u{8}' | '\u{7f}' => TagKey::Backspace,
            other => TagKey::Char(other),
        }
    }

    /// Separator keys confirm the current entry.
    pub fn is_separator(self) -> bool {
        matches!(self, TagKey::Enter | TagKey::Comma)
    }
}

type ChangeCallback = Box<dyn FnMut(&[String]) + Send>;
type TouchedCallback = Box<dyn FnMut() + Send>;

pub struct TagEditor {
    label: String,
    value: Vec<String>,
    entry: String,
    candidates: Vec<String>,
    touched: bool,
    announcer: Arc<dyn Announcer>,
    on_change: Option<ChangeCallback>,
    on_touched: Option<TouchedCallback>,
}

impl fmt::Debug for TagEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagEditor")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("entry", &self.entry)
            .field("candidates", &self.candidates)
            .field("touched", &self.touched)
            .finish_non_exhaustive()
    }
}

impl TagEditor {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            label: String::new(),
            value: Vec::new(),
            entry: String::new(),
            candidates,
            touched: false,
            announcer: Arc::new(LogAnnouncer),
            on_change: None,
            on_touched: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_announcer(mut self, announcer: Arc<dyn Announcer>) -> Self {
        self.announcer = announcer;
        self
    }

    pub fn register_on_change(&mut self, callback: impl FnMut(&[String]) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn register_on_touched(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_touched = Some(Box::new(callback));
    }

    /// Set the value from the owning form. Does not report a change back.
    pub fn write_value(&mut self, tags: Vec<String>) {
        self.value = tags;
    }

    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &[String] {
        &self.value
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn set_entry(&mut self, text: &str) {
        self.entry = text.to_string();
    }

    /// Candidates containing the entry text (case-insensitive) that are not
    /// already selected. With an empty entry, every unselected candidate.
    pub fn suggestions(&self) -> Vec<&str> {
        let needle = self.entry.to_lowercase();
        self.candidates
            .iter()
            .filter(|c| needle.is_empty() || c.to_lowercase().contains(&needle))
            .filter(|c| !self.value.contains(*c))
            .map(String::as_str)
            .collect()
    }

    pub fn key(&mut self, key: TagKey) {
        match key {
            TagKey::Enter | TagKey::Comma => {
                self.confirm_entry();
            }
            TagKey::Backspace => {
                self.entry.pop();
            }
            TagKey::Char(c) => self.entry.push(c),
        }
    }

    /// Append the trimmed entry, if any, and clear the buffer.
    /// Duplicates are appended as-is.
    pub fn confirm_entry(&mut self) -> bool {
        let text = std::mem::take(&mut self.entry);
        self.push_tag(text.trim())
    }

    /// Append an autocomplete suggestion and clear the buffer.
    pub fn select(&mut self, suggestion: &str) -> bool {
        self.entry.clear();
        self.push_tag(suggestion.trim())
    }

    /// Remove the first occurrence of `tag`. Returns false if it was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let Some(index) = self.value.iter().position(|t| t == tag) else {
            return false;
        };
        self.value.remove(index);
        self.announcer.announce(&format!("Removed {tag}"));
        self.emit_change();
        true
    }

    /// Focus left the control.
    pub fn blur(&mut self) {
        self.mark_touched();
    }

    fn push_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        self.value.push(tag.to_string());
        self.emit_change();
        true
    }

    fn emit_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.value);
        }
        self.mark_touched();
    }

    fn mark_touched(&mut self) {
        self.touched = true;
        if let Some(callback) = self.on_touched.as_mut() {
            callback();
        }
    }
}
