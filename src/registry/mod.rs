//! Aspect registry: registration, seeded load, and result lookup.
//!
//! Registration is additive and happens during setup; `load` then computes one
//! merged aspect list per catalog entry and publishes the whole snapshot at
//! once. Reloading with the same seed and registrations reproduces identical
//! results. Adding registrations between loads shifts the shared pool for
//! every entry, not just the new ones.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocator;
use crate::aspect::{AspectDefinition, AspectId, ComputedAspect};
use crate::catalog::{AspectSlotRule, ItemKey};

/// Registration-boundary errors. Lookups never error: unknown keys read empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("rule multiplicity must be at least 1")]
    ZeroMultiplicity,
}

/// Holds the definition list, the per-item slot rules, and the results
/// published by the latest load.
///
/// Both maps are insertion-ordered vectors: with a fixed seed the exact output
/// depends on registration order, and wildcard keys rule out plain hash
/// lookups anyway.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AspectRegistry {
    definitions: Vec<AspectDefinition>,
    rules_by_entry: Vec<(ItemKey, Vec<AspectSlotRule>)>,
    results_by_entry: Vec<(ItemKey, Vec<ComputedAspect>)>,
}

impl AspectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. No duplicate check: a second instance of the same
    /// aspect id doubles its draw weight.
    pub fn register_aspect(&mut self, definition: AspectDefinition) {
        self.definitions.push(definition);
    }

    /// Request one aspect slot for the rule's item.
    pub fn add_rule(&mut self, rule: AspectSlotRule) {
        self.push_rule_copies(rule, 1);
    }

    /// Request `multiplicity` slots at once. Zero slots is a caller mistake
    /// and is rejected rather than silently registering an empty request.
    pub fn add_rule_n(
        &mut self,
        rule: AspectSlotRule,
        multiplicity: u32,
    ) -> Result<(), RegistryError> {
        if multiplicity == 0 {
            return Err(RegistryError::ZeroMultiplicity);
        }
        self.push_rule_copies(rule, multiplicity);
        Ok(())
    }

    fn push_rule_copies(&mut self, rule: AspectSlotRule, count: u32) {
        let copies = std::iter::repeat_with(|| rule.clone()).take(count as usize);
        match self
            .rules_by_entry
            .iter_mut()
            .find(|(key, _)| key.matches(&rule.key))
        {
            // The first-seen key stays the canonical one for this entry.
            Some((_, list)) => list.extend(copies),
            None => {
                let list = copies.collect();
                self.rules_by_entry.push((rule.key.clone(), list));
            }
        }
    }

    /// Recompute every entry's aspects from `seed` and publish the snapshot,
    /// replacing the previous one wholesale.
    pub fn load(&mut self, seed: u64) {
        let span = tracing::info_span!(
            "aspect_load",
            seed,
            entries = self.rules_by_entry.len(),
            pool = self.definitions.len(),
        );
        let _guard = span.enter();

        let merged = allocator::allocate(&self.definitions, &self.rules_by_entry, seed);
        self.results_by_entry = self
            .rules_by_entry
            .iter()
            .map(|(key, _)| key.clone())
            .zip(merged)
            .collect();

        tracing::debug!(results = self.results_by_entry.len(), "aspect load complete");
    }

    /// Merged aspects for `key` from the latest load, wildcard-aware. Unknown
    /// keys read empty.
    pub fn computed_aspects(&self, key: &ItemKey) -> &[ComputedAspect] {
        self.results_by_entry
            .iter()
            .find(|(entry, _)| entry.matches(key))
            .map(|(_, aspects)| aspects.as_slice())
            .unwrap_or(&[])
    }

    /// Aspect ids only, for consumers that ignore amounts.
    pub fn aspect_ids(&self, key: &ItemKey) -> Vec<AspectId> {
        self.computed_aspects(key)
            .iter()
            .map(|aspect| aspect.id.clone())
            .collect()
    }

    /// Every published result in entry registration order.
    pub fn results(&self) -> &[(ItemKey, Vec<ComputedAspect>)] {
        &self.results_by_entry
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    /// Every registered entry with its slot rules, in registration order.
    pub fn rules(&self) -> &[(ItemKey, Vec<AspectSlotRule>)] {
        &self.rules_by_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::{AspectTier, AspectType};

    fn herb(id: &str, tier: AspectTier, base: f32) -> AspectDefinition {
        AspectDefinition::new(id, tier, AspectType::Herb, base)
    }

    fn rule_for(key: ItemKey, tier: AspectTier) -> AspectSlotRule {
        AspectSlotRule::new(key, tier, AspectType::Herb, 1.0, 0.0)
    }

    #[test]
    fn test_single_definition_exact_amount() {
        let mut registry = AspectRegistry::new();
        registry.register_aspect(herb("azuwynn", AspectTier::Common, 10.0));
        registry.add_rule(rule_for(ItemKey::any("swamp_reed"), AspectTier::Common));
        registry.load(77);

        let aspects = registry.computed_aspects(&ItemKey::any("swamp_reed"));
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].id, AspectId::new("azuwynn"));
        assert_eq!(aspects[0].amount, 10.0);
    }

    #[test]
    fn test_load_is_reproducible() {
        let mut registry = AspectRegistry::new();
        for (id, tier) in [
            ("azuwynn", AspectTier::Common),
            ("byariis", AspectTier::Rare),
            ("celawynn", AspectTier::Common),
            ("dayuniis", AspectTier::Uncommon),
        ] {
            registry.register_aspect(herb(id, tier, 8.0));
        }
        registry.add_rule(rule_for(ItemKey::any("swamp_reed"), AspectTier::Common));
        registry.add_rule(rule_for(ItemKey::any("moss"), AspectTier::Common));
        registry.add_rule(rule_for(ItemKey::any("moss"), AspectTier::Uncommon));

        registry.load(1234);
        let first = registry.results().to_vec();
        registry.load(1234);
        assert_eq!(registry.results(), first.as_slice());
    }

    #[test]
    fn test_wildcard_rule_key_collects_variant_rules() {
        let mut registry = AspectRegistry::new();
        registry.register_aspect(herb("azuwynn", AspectTier::Common, 10.0));
        registry.register_aspect(herb("celawynn", AspectTier::Common, 6.0));

        // Wildcard key first, then a variant-specific rule for the same item:
        // both land on the wildcard entry.
        registry.add_rule(rule_for(ItemKey::any("swamp_plant"), AspectTier::Common));
        registry.add_rule(rule_for(
            ItemKey::exact("swamp_plant", 2),
            AspectTier::Common,
        ));
        registry.load(9);

        assert_eq!(registry.results().len(), 1);
        let aspects = registry.computed_aspects(&ItemKey::exact("swamp_plant", 2));
        assert!(!aspects.is_empty());
        assert!(aspects.len() <= 2);
    }

    #[test]
    fn test_multiplicity_requests_extra_slots() {
        let mut registry = AspectRegistry::new();
        registry.register_aspect(herb("azuwynn", AspectTier::Common, 10.0));
        registry.register_aspect(herb("celawynn", AspectTier::Common, 6.0));
        registry.register_aspect(herb("fergalaz", AspectTier::Common, 4.0));
        registry
            .add_rule_n(rule_for(ItemKey::any("moss"), AspectTier::Common), 3)
            .unwrap();
        registry.load(3);

        let aspects = registry.computed_aspects(&ItemKey::any("moss"));
        // Three slots, three distinct commons available.
        assert_eq!(aspects.len(), 3);
    }

    #[test]
    fn test_zero_multiplicity_is_rejected() {
        let mut registry = AspectRegistry::new();
        let result = registry.add_rule_n(rule_for(ItemKey::any("moss"), AspectTier::Common), 0);
        assert_eq!(result, Err(RegistryError::ZeroMultiplicity));
        registry.load(1);
        assert!(registry.results().is_empty());
    }

    #[test]
    fn test_unknown_key_reads_empty() {
        let mut registry = AspectRegistry::new();
        registry.register_aspect(herb("azuwynn", AspectTier::Common, 10.0));
        registry.add_rule(rule_for(ItemKey::any("swamp_reed"), AspectTier::Common));
        registry.load(4);

        assert!(registry.computed_aspects(&ItemKey::any("bog_bean")).is_empty());
        assert!(registry.aspect_ids(&ItemKey::any("bog_bean")).is_empty());
    }

    #[test]
    fn test_result_keys_track_rule_keys() {
        let mut registry = AspectRegistry::new();
        registry.register_aspect(herb("azuwynn", AspectTier::Common, 10.0));
        registry.add_rule(rule_for(ItemKey::any("swamp_reed"), AspectTier::Common));
        registry.add_rule(rule_for(ItemKey::exact("moss", 1), AspectTier::Rare));
        registry.load(8);

        let result_keys: Vec<&ItemKey> = registry.results().iter().map(|(k, _)| k).collect();
        assert_eq!(
            result_keys,
            vec![&ItemKey::any("swamp_reed"), &ItemKey::exact("moss", 1)]
        );
    }
}
