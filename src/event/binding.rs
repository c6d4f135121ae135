//! Key binding registry for picker navigation.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to
//! [`PickerAction`]s. The `with_defaults()` constructor installs arrow-key,
//! vi-style and Tab navigation.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// PickerAction
// ---------------------------------------------------------------------------

/// What a key press does to a composite picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Move the focused column's selection by this many items.
    Step(i32),
    /// Select the first value of the focused column.
    First,
    /// Select the last value of the focused column.
    Last,
    /// Focus the next column.
    FocusNext,
    /// Focus the previous column.
    FocusPrevious,
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> PickerAction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), PickerAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard bindings.
    ///
    /// - `Up`/`k` and `Down`/`j` step by one, `PageUp`/`PageDown` by five
    /// - `Home`/`End` jump to the first/last value
    /// - `Right`/`Tab`/`l` and `Left`/`BackTab`/`h` move column focus
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let none = Modifiers::NONE;
        registry.bind(Key::Up, none, PickerAction::Step(-1));
        registry.bind(Key::Char('k'), none, PickerAction::Step(-1));
        registry.bind(Key::Down, none, PickerAction::Step(1));
        registry.bind(Key::Char('j'), none, PickerAction::Step(1));
        registry.bind(Key::PageUp, none, PickerAction::Step(-5));
        registry.bind(Key::PageDown, none, PickerAction::Step(5));
        registry.bind(Key::Home, none, PickerAction::First);
        registry.bind(Key::End, none, PickerAction::Last);
        registry.bind(Key::Right, none, PickerAction::FocusNext);
        registry.bind(Key::Tab, none, PickerAction::FocusNext);
        registry.bind(Key::Char('l'), none, PickerAction::FocusNext);
        registry.bind(Key::Left, none, PickerAction::FocusPrevious);
        registry.bind(Key::BackTab, none, PickerAction::FocusPrevious);
        registry.bind(Key::Char('h'), none, PickerAction::FocusPrevious);
        registry
    }

    /// Register a key binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: PickerAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding, returning the removed action.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<PickerAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a key event (exact key + modifiers match).
    pub fn resolve(&self, event: &KeyEvent) -> Option<PickerAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
