//! Script document
//!
//! Models the `<script>` elements of an exported page. Elements keep a stable
//! [`ScriptKey`] while the document order is tracked separately, so an
//! element can be swapped for a patched copy at the same position.

use slotmap::{new_key_type, SlotMap};

use crate::error::EngineError;

new_key_type! {
    /// Handle for a script element
    pub struct ScriptKey;
}

/// A single `<script>` element
#[derive(Debug, Clone)]
pub struct ScriptElement {
    text: String,
}

impl ScriptElement {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered collection of script elements
#[derive(Debug, Default)]
pub struct ScriptDocument {
    elements: SlotMap<ScriptKey, ScriptElement>,
    order: Vec<ScriptKey>,
    current: Option<ScriptKey>,
}

impl ScriptDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a script element at the end of the document
    pub fn append(&mut self, text: impl Into<String>) -> ScriptKey {
        let key = self.elements.insert(ScriptElement { text: text.into() });
        self.order.push(key);
        key
    }

    /// Iterate elements in document order
    pub fn iter(&self) -> impl Iterator<Item = (ScriptKey, &ScriptElement)> {
        self.order
            .iter()
            .filter_map(|key| self.elements.get(*key).map(|el| (*key, el)))
    }

    /// Text of an element
    pub fn text(&self, key: ScriptKey) -> Option<&str> {
        self.elements.get(key).map(ScriptElement::text)
    }

    /// Position of an element in document order
    pub fn position(&self, key: ScriptKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// The script currently executing, which injections never target
    pub fn current_script(&self) -> Option<ScriptKey> {
        self.current
    }

    pub fn set_current_script(&mut self, key: Option<ScriptKey>) {
        self.current = key;
    }

    /// Replace `old` with a new element holding `text` at the same position
    ///
    /// The new element is inserted directly after the old one and the old one
    /// is then removed.
    pub fn replace(&mut self, old: ScriptKey, text: impl Into<String>) -> Result<ScriptKey, EngineError> {
        let index = self.position(old).ok_or(EngineError::UnknownScript)?;

        let key = self.elements.insert(ScriptElement { text: text.into() });
        self.order.insert(index + 1, key);
        self.remove(old);

        Ok(key)
    }

    /// Remove an element from the document
    pub fn remove(&mut self, key: ScriptKey) -> bool {
        if self.elements.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| *k != key);
        if self.current == Some(key) {
            self.current = None;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
