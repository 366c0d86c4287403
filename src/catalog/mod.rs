//! Catalog entry keys and aspect slot rules.
//!
//! A catalog entry is an item id, optionally narrowed to a single variant.
//! Matching is wildcard-aware and lives in an explicit function rather than
//! `PartialEq`, so registries can keep hash-free, insertion-ordered lookups
//! without a wildcard value colliding with concrete ones.

use serde::{Deserialize, Serialize};

use crate::aspect::{AspectTier, AspectType};

/// Identity of a registrable item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog entry key. `variant: None` is a wildcard covering every variant of
/// the item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub item: ItemId,
    pub variant: Option<u32>,
}

impl ItemKey {
    /// Key for one concrete variant of an item.
    pub fn exact(item: impl Into<ItemId>, variant: u32) -> Self {
        Self {
            item: item.into(),
            variant: Some(variant),
        }
    }

    /// Wildcard key covering every variant of an item.
    pub fn any(item: impl Into<ItemId>) -> Self {
        Self {
            item: item.into(),
            variant: None,
        }
    }

    /// Wildcard-aware match: item ids equal, and the variants equal or either
    /// side is a wildcard. Symmetric, but intentionally weaker than equality.
    pub fn matches(&self, other: &ItemKey) -> bool {
        self.item == other.item
            && match (self.variant, other.variant) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}#{}", self.item, variant),
            None => write!(f, "{}#*", self.item),
        }
    }
}

/// One requested aspect slot for a catalog entry.
///
/// A slot accepts any definition whose tier and type equal the rule's; the
/// multiplier and variation shape the granted amount. Registering the same
/// rule several times requests several slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSlotRule {
    pub key: ItemKey,
    pub tier: AspectTier,
    pub kind: AspectType,
    pub amount_multiplier: f32,
    /// Relative amount jitter in 0..1. Values above 1.0 are accepted and can
    /// drive computed amounts negative.
    pub amount_variation: f32,
}

impl AspectSlotRule {
    pub fn new(
        key: ItemKey,
        tier: AspectTier,
        kind: AspectType,
        amount_multiplier: f32,
        amount_variation: f32,
    ) -> Self {
        Self {
            key,
            tier,
            kind,
            amount_multiplier,
            amount_variation,
        }
    }
}
