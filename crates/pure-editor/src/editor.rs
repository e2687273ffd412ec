//! The prose editor wrapper.
//!
//! [`PureEditor`] owns the current [`EditorState`] and is what a UI layer talks to: it routes
//! keys through the [`Keymap`], applies dispatched transactions, and offers the whole-document
//! operations of the widget (set or paste content, clear, typeset), the indentation toggle,
//! the find/replace panel flag and the status-bar summary.
//!
//! # Example
//!
//! ```rust
//! use pure_editor::{EditorConfig, PureEditor};
//!
//! let mut editor = PureEditor::new(EditorConfig::default()).unwrap();
//! editor.set_value("  第一段\n\n第二段  ", false).unwrap();
//! editor.typeset().unwrap();
//! assert_eq!(editor.text(), "\u{3000}\u{3000}第一段\n\u{3000}\u{3000}第二段");
//! ```

use crate::config::{ConfigError, EditorConfig};
use crate::delta::{ChangeError, ChangeSet, TextDelta};
use crate::document::normalize_line_endings;
use crate::indent::FixedIndent;
use crate::keymap::Keymap;
use crate::phrases::Phrases;
use crate::selection::EditorSelection;
use crate::state::{EditorState, Transaction};
use crate::status::StatusInfo;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by [`PureEditor`].
#[derive(Debug, Error)]
pub enum EditorError {
    /// A transaction did not fit the document.
    #[error(transparent)]
    Change(#[from] ChangeError),
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What kind of change a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorChangeKind {
    /// The document text changed.
    DocumentModified,
    /// Only the selection changed.
    SelectionChanged,
    /// Indentation was switched on or off.
    IndentToggled,
    /// The find/replace panel was opened or closed.
    FindPanelToggled,
}

/// A change notification.
#[derive(Debug, Clone)]
pub struct EditorChange {
    /// Kind of change.
    pub kind: EditorChangeKind,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
    /// Structured text delta for document changes.
    pub delta: Option<Arc<TextDelta>>,
}

/// Change notification callback.
pub type EditorChangeCallback = Box<dyn FnMut(&EditorChange) + Send>;

/// A headless prose editor.
pub struct PureEditor {
    state: EditorState,
    config: EditorConfig,
    indent_value: String,
    indent_enabled: bool,
    find_panel_open: bool,
    focused: bool,
    version: u64,
    keymap: Keymap,
    phrases: Phrases,
    callbacks: Vec<EditorChangeCallback>,
}

impl PureEditor {
    /// A new editor whose document starts as the indent value, ready for the first paragraph.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        let text = config.current_indent_value().to_string();
        Self::with_text(&text, config)
    }

    /// A new editor over `text`.
    pub fn with_text(text: &str, config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self::build(text, config))
    }

    fn build(text: &str, config: EditorConfig) -> Self {
        Self {
            state: EditorState::from_config(text, &config),
            indent_value: config.current_indent_value().to_string(),
            indent_enabled: config.indent_enabled,
            config,
            find_panel_open: false,
            focused: false,
            version: 0,
            keymap: Keymap::standard(),
            phrases: Phrases::zh_cn(),
            callbacks: Vec::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Replace the state wholesale (e.g. to attach a syntax provider).
    pub fn set_state(&mut self, state: EditorState) {
        self.state = state;
    }

    /// The document text.
    pub fn text(&self) -> String {
        self.state.doc().to_string()
    }

    /// The configuration the editor was created with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The indent value in effect (empty while indentation is off).
    pub fn indent_value(&self) -> &str {
        &self.indent_value
    }

    /// Whether indentation is on.
    pub fn is_indent_enabled(&self) -> bool {
        self.indent_enabled
    }

    /// Whether the find/replace panel is open.
    pub fn is_find_panel_open(&self) -> bool {
        self.find_panel_open
    }

    /// Whether the view should soft-wrap long lines.
    pub fn is_line_wrapping(&self) -> bool {
        self.config.line_wrapping
    }

    /// Whether the find/replace panel is placed above the content rather than below it.
    pub fn is_search_panel_top(&self) -> bool {
        self.config.search_panel_top
    }

    /// Whether the editor has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Give the editor focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Take focus away.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Version number, bumped by every applied change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The localized phrase table.
    pub fn phrases(&self) -> &Phrases {
        &self.phrases
    }

    /// Replace the phrase table.
    pub fn set_phrases(&mut self, phrases: Phrases) {
        self.phrases = phrases;
    }

    /// The keymap.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Mutable access to the keymap.
    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Status-bar summary of the current state.
    pub fn status(&self) -> StatusInfo {
        StatusInfo::of(&self.state)
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&EditorChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Move the selection.
    pub fn set_selection(&mut self, selection: EditorSelection) {
        self.state = self.state.clone().with_selection(selection);
        self.notify(EditorChangeKind::SelectionChanged, None);
    }

    /// Apply a transaction to the current state.
    pub fn dispatch(&mut self, tr: Transaction) -> Result<(), EditorError> {
        let (next, delta) = self.state.apply(&tr)?;
        self.state = next;
        if delta.is_empty() {
            self.notify(EditorChangeKind::SelectionChanged, None);
        } else {
            self.notify(EditorChangeKind::DocumentModified, Some(Arc::new(delta)));
        }
        Ok(())
    }

    /// Offer a key to the keymap; returns whether a binding handled it.
    pub fn handle_key(&mut self, key: &str) -> Result<bool, EditorError> {
        let mut pending = None;
        let handled = self
            .keymap
            .run(key, &self.state, &mut |tr| pending = Some(tr));
        if let Some(tr) = pending {
            self.dispatch(tr)?;
        }
        Ok(handled)
    }

    /// Set the document content.
    ///
    /// With `paste`, `value` replaces every selection range instead; otherwise the whole
    /// document is replaced and the editor loses focus. Line endings in `value` are
    /// normalized to LF either way.
    pub fn set_value(&mut self, value: &str, paste: bool) -> Result<(), EditorError> {
        let value = normalize_line_endings(value);
        let value = value.as_ref();
        if paste {
            tracing::debug!(len = value.len(), "pasting into selection");
            let tr = self
                .state
                .replace_selection(value)?
                .scroll_into_view()
                .with_user_event("input.paste");
            return self.dispatch(tr);
        }
        self.replace_document(value)
    }

    /// Reset the document to just the indent value.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        let value = self.indent_value.clone();
        self.replace_document(&value)
    }

    /// Normalize paragraphs: drop blank lines, trim every other line and prefix it with the
    /// indent value.
    pub fn typeset(&mut self) -> Result<(), EditorError> {
        let text = typeset_lines(self.state.doc().lines(), &self.indent_value);
        self.replace_document(&text)
    }

    /// Switch indentation off (empty indent value) or back on (the re-enable value).
    ///
    /// Returns whether indentation is on afterwards.
    pub fn toggle_indent(&mut self) -> bool {
        if self.indent_enabled {
            self.indent_value.clear();
            self.indent_enabled = false;
        } else {
            self.indent_value = self.config.reenabled_indent.clone();
            self.indent_enabled = true;
        }
        let cols = self.indent_value.chars().count();
        self.state = self.state.clone().with_indent_service(FixedIndent(cols));
        tracing::debug!(enabled = self.indent_enabled, cols, "indentation toggled");
        self.notify(EditorChangeKind::IndentToggled, None);
        self.indent_enabled
    }

    /// Open or close the find/replace panel; returns whether it is open afterwards.
    pub fn toggle_find_panel(&mut self) -> bool {
        self.find_panel_open = !self.find_panel_open;
        self.notify(EditorChangeKind::FindPanelToggled, None);
        self.find_panel_open
    }

    fn replace_document(&mut self, text: &str) -> Result<(), EditorError> {
        tracing::debug!(len = text.len(), "replacing document");
        let changes = ChangeSet::replace_all(self.state.doc().len_chars(), text);
        self.dispatch(Transaction::new(changes))?;
        self.blur();
        Ok(())
    }

    fn notify(&mut self, kind: EditorChangeKind, delta: Option<Arc<TextDelta>>) {
        let old_version = self.version;
        self.version += 1;
        let change = EditorChange {
            kind,
            old_version,
            new_version: self.version,
            delta,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}

impl Default for PureEditor {
    fn default() -> Self {
        let config = EditorConfig::default();
        let text = config.current_indent_value().to_string();
        Self::build(&text, config)
    }
}

fn typeset_lines<I>(lines: I, indent: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.trim();
            (!trimmed.is_empty()).then(|| format!("{indent}{trimmed}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typeset_trims_and_prefixes() {
        let lines = ["  a ", "", "\u{3000}b", "   "].map(String::from);
        assert_eq!(typeset_lines(lines, "> "), "> a\n> b");
    }

    #[test]
    fn typeset_of_blank_text_is_empty() {
        let lines = ["", " "].map(String::from);
        assert_eq!(typeset_lines(lines, "\u{3000}\u{3000}"), "");
    }
}
