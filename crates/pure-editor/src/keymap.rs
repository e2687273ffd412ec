//! Priority-ordered key bindings.
//!
//! A [`Keymap`] is a list of `{key, command}` pairs. A key is offered to every binding with
//! that name, in order, until one of them reports it handled the key. Bindings added with
//! [`Keymap::prepend`] run before the existing ones, which is how a smarter Enter handler
//! shadows the default line break without removing it.

use crate::commands::{self, StateCommand};
use crate::state::{EditorState, Transaction};
use std::fmt;

/// A named key bound to a command.
#[derive(Clone, Copy)]
pub struct KeyBinding {
    /// Key name, e.g. `"Enter"`.
    pub key: &'static str,
    /// Command run for the key.
    pub run: StateCommand,
}

impl fmt::Debug for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// An ordered table of key bindings.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    /// An empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table: the CJK-aware Enter, then the plain line break.
    pub fn standard() -> Self {
        Self::new()
            .with_binding(commands::ENTER)
            .with_binding(KeyBinding {
                key: "Enter",
                run: commands::insert_newline,
            })
    }

    /// Builder-style [`Keymap::push`].
    pub fn with_binding(mut self, binding: KeyBinding) -> Self {
        self.push(binding);
        self
    }

    /// Add a binding with the lowest priority.
    pub fn push(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
    }

    /// Add a binding with the highest priority.
    pub fn prepend(&mut self, binding: KeyBinding) {
        self.bindings.insert(0, binding);
    }

    /// The bindings, highest priority first.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Offer `key` to the bindings in order; returns `true` once one handles it.
    pub fn run(
        &self,
        key: &str,
        state: &EditorState,
        dispatch: &mut dyn FnMut(Transaction),
    ) -> bool {
        for binding in self.bindings.iter().filter(|b| b.key == key) {
            if (binding.run)(state, dispatch) {
                tracing::trace!(key, "key handled");
                return true;
            }
        }
        tracing::trace!(key, "key not handled");
        false
    }
}
