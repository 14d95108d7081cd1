//! Item model: kinds, metadata, and stacks.
//!
//! An [`ItemStack`] is a quantity of one kind of item plus its metadata.
//! Stacks are plain values; the stock container represents an empty slot
//! as `None` rather than a zero-amount stack.
//!
//! Two stacks are *similar* when their kind and metadata match, regardless
//! of amount. Similarity is the identity used to key offers and to match a
//! counterpart's presented items against a recipe's nominal cost items.

use serde::{Deserialize, Serialize};

/// Default stack-size ceiling for item kinds that do not override it.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// The type identity of an item (e.g. `"emerald"`, `"written_book"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(pub String);

impl ItemKind {
    /// Create an item kind from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The kind name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemKind {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Item metadata attached to a stack.
///
/// Only the fields the trading engine cares about: a display name, a book
/// title (used by title-keyed offers), and lore lines. All fields default
/// to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Custom display name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Book title extracted from the item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Lore lines, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<String>,
}

impl ItemMeta {
    /// Whether no metadata is set at all.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.title.is_none() && self.lore.is_empty()
    }
}

/// How presented items are compared against required items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMatching {
    /// Kind and full metadata must match (default).
    #[default]
    Strict,
    /// Only the kind must match; metadata may differ.
    Kind,
}

/// The similarity identity of a stack: kind plus metadata, without amount.
///
/// Used to key offers ("one offer per distinct traded-item identity") and
/// to aggregate container contents when counting stock.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    /// The item kind.
    pub kind: ItemKind,
    /// The item metadata.
    pub meta: ItemMeta,
}

/// A quantity of one kind of item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item kind.
    pub kind: ItemKind,
    /// The item metadata.
    #[serde(default)]
    pub meta: ItemMeta,
    /// The stack amount. Always at least 1 in a container slot; empty slots
    /// are `None`, never a zero-amount stack.
    pub amount: u32,
    /// The stack-size ceiling for this item kind.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

/// Serde default for [`ItemStack::max_stack`].
const fn default_max_stack() -> u32 {
    DEFAULT_MAX_STACK
}

impl ItemStack {
    /// Create a stack with default metadata and the default stack ceiling.
    pub fn new(kind: impl Into<ItemKind>, amount: u32) -> Self {
        Self {
            kind: kind.into(),
            meta: ItemMeta::default(),
            amount,
            max_stack: DEFAULT_MAX_STACK,
        }
    }

    /// Attach metadata to the stack.
    #[must_use]
    pub fn with_meta(mut self, meta: ItemMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Attach a book title to the stack's metadata.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    /// Override the stack-size ceiling.
    #[must_use]
    pub const fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack;
        self
    }

    /// Return a copy of this stack with a different amount.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        let mut copy = self.clone();
        copy.amount = amount;
        copy
    }

    /// The similarity identity of this stack (kind + metadata, no amount).
    pub fn key(&self) -> ItemKey {
        ItemKey {
            kind: self.kind.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Whether this stack is similar to another: same kind and metadata,
    /// amounts ignored.
    pub fn is_similar(&self, other: &Self) -> bool {
        self.kind == other.kind && self.meta == other.meta
    }

    /// Whether this stack matches another under the given comparison mode.
    pub fn matches(&self, other: &Self, matching: ItemMatching) -> bool {
        match matching {
            ItemMatching::Strict => self.is_similar(other),
            ItemMatching::Kind => self.kind == other.kind,
        }
    }

    /// The title stored in this stack's metadata, if any.
    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }

    /// Whether the stack is at its stack-size ceiling.
    pub const fn is_full(&self) -> bool {
        self.amount >= self.max_stack
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn similarity_ignores_amount() {
        let a = ItemStack::new("emerald", 3);
        let b = ItemStack::new("emerald", 60);
        assert!(a.is_similar(&b));
    }

    #[test]
    fn similarity_respects_metadata() {
        let plain = ItemStack::new("sword", 1);
        let named = ItemStack::new("sword", 1).with_meta(ItemMeta {
            display_name: Some(String::from("Excalibur")),
            title: None,
            lore: Vec::new(),
        });
        assert!(!plain.is_similar(&named));
    }

    #[test]
    fn kind_matching_ignores_metadata() {
        let plain = ItemStack::new("sword", 1);
        let named = ItemStack::new("sword", 1).with_meta(ItemMeta {
            display_name: Some(String::from("Excalibur")),
            title: None,
            lore: Vec::new(),
        });
        assert!(plain.matches(&named, ItemMatching::Kind));
        assert!(!plain.matches(&named, ItemMatching::Strict));
    }

    #[test]
    fn key_equality_matches_similarity() {
        let a = ItemStack::new("stone", 10);
        let b = ItemStack::new("stone", 2);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn title_comes_from_metadata() {
        let book = ItemStack::new("written_book", 1).with_title("Atlas");
        assert_eq!(book.title(), Some("Atlas"));
        assert_eq!(ItemStack::new("written_book", 1).title(), None);
    }

    #[test]
    fn stack_serde_roundtrip_defaults_max_stack() {
        let json = r#"{"kind":"emerald","amount":5}"#;
        let stack: ItemStack = serde_json::from_str(json).unwrap();
        assert_eq!(stack.max_stack, DEFAULT_MAX_STACK);
        assert!(stack.meta.is_empty());
    }
}
