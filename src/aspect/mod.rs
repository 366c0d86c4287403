//! Aspect identity and definition types.
//!
//! Aspects are weighted property tags handed out to catalog items by the
//! seeded allocator. A definition classifies one aspect on two axes (tier and
//! type) and carries the base amount a single allocation grants. Registering
//! the same aspect id twice is legal and doubles its draw weight.

use serde::{Deserialize, Serialize};

use crate::catalog::AspectSlotRule;

/// Identity of an aspect. Merging and pool depletion key on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectId(String);

impl AspectId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AspectId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for AspectId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for AspectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rarity tier of an aspect definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectTier {
    Common,
    Uncommon,
    Rare,
}

/// Thematic classification of an aspect definition. The allocator treats this
/// opaquely; it only matters for matching rules to definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Herb,
    Root,
    Fungus,
}

/// One drawable instance of an aspect in the allocation pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub id: AspectId,
    pub tier: AspectTier,
    pub kind: AspectType,
    pub base_amount: f32,
}

impl AspectDefinition {
    pub fn new(
        id: impl Into<AspectId>,
        tier: AspectTier,
        kind: AspectType,
        base_amount: f32,
    ) -> Self {
        Self {
            id: id.into(),
            tier,
            kind,
            base_amount,
        }
    }

    /// True when this definition satisfies a rule's tier/type constraint.
    pub fn matches_rule(&self, rule: &AspectSlotRule) -> bool {
        self.tier == rule.tier && self.kind == rule.kind
    }
}

/// An aspect amount computed for one catalog entry by a load pass.
///
/// Amounts are positive in expectation but are deliberately not clamped: a
/// variation above 1.0 combined with an extreme draw can push them negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedAspect {
    pub id: AspectId,
    pub amount: f32,
}
