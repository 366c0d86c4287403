//! Built-in content tables.
//!
//! The standard roster of fourteen named aspects and a small default item
//! catalog, embedded as RON. Hosts shipping their own content feed
//! [`definitions_from_ron`] / [`rules_from_ron`] with external tables instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aspect::AspectDefinition;
use crate::catalog::AspectSlotRule;
use crate::registry::{AspectRegistry, RegistryError};

const STANDARD_ASPECTS: &str = include_str!("aspects.ron");
const STANDARD_ITEM_RULES: &str = include_str!("item_rules.ron");

/// Content table errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content table: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("rejected rule: {0}")]
    Rule(#[from] RegistryError),
}

/// One catalog line in a rule table: the rule plus how many slots it requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub rule: AspectSlotRule,
    #[serde(default = "default_slots")]
    pub slots: u32,
}

fn default_slots() -> u32 {
    1
}

/// Parse an aspect definition table from RON.
pub fn definitions_from_ron(source: &str) -> Result<Vec<AspectDefinition>, ContentError> {
    Ok(ron::from_str(source)?)
}

/// Parse an item rule table from RON.
pub fn rules_from_ron(source: &str) -> Result<Vec<RuleEntry>, ContentError> {
    Ok(ron::from_str(source)?)
}

/// Register every rule-table entry into `registry`, preserving table order.
pub fn apply_rules(
    registry: &mut AspectRegistry,
    entries: Vec<RuleEntry>,
) -> Result<(), ContentError> {
    for entry in entries {
        registry.add_rule_n(entry.rule, entry.slots)?;
    }
    Ok(())
}

/// The built-in aspect roster.
pub fn standard_definitions() -> Vec<AspectDefinition> {
    definitions_from_ron(STANDARD_ASPECTS).expect("embedded aspect table is valid")
}

/// A registry populated with the built-in aspects and item catalog, not yet
/// loaded: call `load(seed)` on the result.
pub fn standard_registry() -> AspectRegistry {
    let mut registry = AspectRegistry::new();
    for definition in standard_definitions() {
        registry.register_aspect(definition);
    }
    let rules = rules_from_ron(STANDARD_ITEM_RULES).expect("embedded rule table is valid");
    apply_rules(&mut registry, rules).expect("embedded rule table slots are nonzero");
    registry
}
