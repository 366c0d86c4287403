//! Seeded aspect allocation.
//!
//! One pass per load: every catalog entry draws from a single shared pool of
//! definitions, in registration order. Aspects handed to one entry are removed
//! from the pool before the next entry draws, which makes each aspect a scarce
//! resource across the whole catalog. An entry the depleted pool can no longer
//! serve at all retries against the full definition list instead of ending
//! empty, trading global uniqueness for coverage.
//!
//! All randomness flows through one generator seeded from the caller's seed,
//! consumed in a fixed sequence, so a pass is fully reproducible for a given
//! seed and registration order.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sha3::{Digest, Sha3_256};

use crate::aspect::{AspectDefinition, ComputedAspect};
use crate::catalog::{AspectSlotRule, ItemKey};

/// Expand a caller seed into the pass generator. Sha3 spreads the 8 seed
/// bytes over the full 32-byte generator state.
pub fn seeded_rng(seed: u64) -> Xoshiro256PlusPlus {
    let mut hasher = Sha3_256::new();
    hasher.update(seed.to_le_bytes());
    let digest = hasher.finalize();
    let mut state = [0u8; 32];
    state.copy_from_slice(&digest);
    Xoshiro256PlusPlus::from_seed(state)
}

/// Run one allocation pass, returning one merged aspect list per entry, in
/// entry order.
pub fn allocate(
    definitions: &[AspectDefinition],
    entries: &[(ItemKey, Vec<AspectSlotRule>)],
    seed: u64,
) -> Vec<Vec<ComputedAspect>> {
    let mut rng = seeded_rng(seed);
    let mut pool: Vec<AspectDefinition> = definitions.to_vec();
    let mut results = Vec::with_capacity(entries.len());

    for (key, rules) in entries {
        let mut pending = Vec::with_capacity(rules.len());
        if !fill_slots(&mut pending, rules, &pool, &mut rng) {
            tracing::debug!(entry = %key, "pool depleted, retrying against full definition list");
            fill_slots(&mut pending, rules, definitions, &mut rng);
        }
        deplete_pool(&mut pool, &pending);
        results.push(merge_pending(pending));
    }

    results
}

/// Fill one entry's slots from `pool`, appending a draw per slot to `pending`.
/// Returns false when the pool holds no matching definition at all, leaving
/// `pending` untouched so the caller can retry against another pool.
fn fill_slots(
    pending: &mut Vec<ComputedAspect>,
    rules: &[AspectSlotRule],
    pool: &[AspectDefinition],
    rng: &mut Xoshiro256PlusPlus,
) -> bool {
    let mut possible = gather_possible(rules, pool, None);
    let initial_count = possible.len();
    if initial_count == 0 {
        return false;
    }

    let slots = rules.len();
    for _ in 0..slots {
        if possible.is_empty() {
            possible = replenish(rules, pool, pending, slots, initial_count);
        }

        let drawn = possible.remove(rng.gen_range(0..possible.len()));
        let definition = &pool[drawn];

        // Randomize which multiplier/variation applies when several rules
        // accept the drawn definition.
        let mut order: Vec<usize> = (0..rules.len()).collect();
        order.shuffle(rng);
        let Some(rule) = order
            .iter()
            .map(|&i| &rules[i])
            .find(|rule| definition.matches_rule(rule))
        else {
            // Gathered definitions always match at least one rule.
            continue;
        };

        let base = definition.base_amount * rule.amount_multiplier;
        let jitter = base * rule.amount_variation * (rng.gen::<f32>() * 2.0 - 1.0);
        pending.push(ComputedAspect {
            id: definition.id.clone(),
            amount: base + jitter,
        });
    }

    true
}

/// Rebuild the working set after mid-loop exhaustion. When more distinct
/// matches existed than slots, aspect ids already placed for this entry are
/// excluded to maximize per-entry diversity; exclusion is skipped whenever it
/// would leave fewer candidates than unfilled slots, so it never blocks.
fn replenish(
    rules: &[AspectSlotRule],
    pool: &[AspectDefinition],
    pending: &[ComputedAspect],
    slots: usize,
    initial_count: usize,
) -> Vec<usize> {
    let remaining = slots.saturating_sub(pending.len());
    if initial_count > slots {
        let diverse = gather_possible(rules, pool, Some(pending));
        if diverse.len() >= remaining {
            return diverse;
        }
    }
    gather_possible(rules, pool, None)
}

/// Indices of distinct pool definitions satisfying at least one rule, gathered
/// rule-major so candidate order tracks rule registration order. `exclude`
/// drops definitions whose aspect id was already placed for the current entry.
fn gather_possible(
    rules: &[AspectSlotRule],
    pool: &[AspectDefinition],
    exclude: Option<&[ComputedAspect]>,
) -> Vec<usize> {
    let mut possible = Vec::new();
    for rule in rules {
        for (idx, definition) in pool.iter().enumerate() {
            if definition.matches_rule(rule)
                && !possible.contains(&idx)
                && exclude.map_or(true, |placed| placed.iter().all(|p| p.id != definition.id))
            {
                possible.push(idx);
            }
        }
    }
    possible
}

/// Remove every pool instance of each aspect id placed for an entry. Once an
/// aspect is handed out it is unavailable for the rest of the pass.
fn deplete_pool(pool: &mut Vec<AspectDefinition>, placed: &[ComputedAspect]) {
    pool.retain(|definition| placed.iter().all(|p| p.id != definition.id));
}

/// Collapse duplicate aspect ids, summing amounts. The first occurrence keeps
/// its position.
fn merge_pending(pending: Vec<ComputedAspect>) -> Vec<ComputedAspect> {
    let mut merged: Vec<ComputedAspect> = Vec::with_capacity(pending.len());
    for aspect in pending {
        match merged.iter_mut().find(|m| m.id == aspect.id) {
            Some(existing) => existing.amount += aspect.amount,
            None => merged.push(aspect),
        }
    }
    merged
}
