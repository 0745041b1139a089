//! Progression transitions over `ProgressionState`.
//!
//! Every transition either applies completely or leaves the state exactly
//! as it was. Rejections (unknown id, locked producer, short balance) are
//! reported through the `bool` return value and are never errors.

use tracing::debug;

use super::catalog::{EffectKind, GameDefinition, UpgradeCatalog, UpgradeEffect, GLOBAL_TARGET};
use super::number::{fraction, whole};
use super::save::{self, Snapshot};
use super::state::{Metadata, ProducerState, ProgressionState, Settings, Statistics};

/// Fresh state for a game: no units owned, balance at the starting resource.
pub fn initialize(def: &GameDefinition) -> ProgressionState {
    let mut state = ProgressionState {
        score: def.starting_resource,
        producers: def.producers.iter().map(ProducerState::from_tier).collect(),
        purchased_upgrades: Vec::new(),
        statistics: Statistics {
            lifetime_resource: def.starting_resource,
            manual_grants: 0,
        },
        settings: Settings::default(),
        metadata: Metadata {
            manual_grant_amount: def.manual_grant_amount,
        },
    };
    state.refresh_unlocks();
    state
}

/// Rebuild a state from a persisted snapshot, reconciled against the
/// current definition. Derived values are never read from the snapshot.
pub fn rehydrate(def: &GameDefinition, snapshot: &Snapshot) -> ProgressionState {
    let mut state = save::reconcile(initialize(def), def, snapshot);
    let unlocked = state.refresh_unlocks();
    if !unlocked.is_empty() {
        debug!(game = %def.id, ?unlocked, "producers unlocked on rehydrate");
    }
    state
}

/// Manual grant ("cast"/"click"). Always succeeds.
pub fn grant_manual(state: &mut ProgressionState) {
    state.earn(state.metadata.manual_grant_amount);
    state.statistics.manual_grants = state.statistics.manual_grants.saturating_add(1);
    log_unlocks(state.refresh_unlocks());
}

/// Buy one unit of a producer. Returns true if successful.
pub fn purchase_producer(state: &mut ProgressionState, producer_id: &str) -> bool {
    let score = state.score;
    let Some(producer) = state.producer_mut(producer_id) else {
        return false;
    };
    if !producer.is_unlocked {
        return false;
    }
    let cost = producer.current_cost();
    if score < cost {
        return false;
    }

    producer.count = producer.count.saturating_add(1);
    state.score -= cost;
    true
}

/// Buy an upgrade from `catalog` and apply its effects in order.
/// Returns true if successful.
pub fn purchase_upgrade(
    state: &mut ProgressionState,
    upgrade_id: &str,
    catalog: &UpgradeCatalog,
) -> bool {
    let Some(upgrade) = catalog.get(upgrade_id) else {
        return false;
    };
    if state.is_purchased(upgrade_id) || state.score < upgrade.cost {
        return false;
    }

    state.score -= upgrade.cost;
    state.purchased_upgrades.push(upgrade.id.clone());
    for effect in &upgrade.effects {
        apply_effect(state, effect);
    }
    true
}

/// Apply a single upgrade effect. Effects aimed at producers this state
/// does not have are skipped.
fn apply_effect(state: &mut ProgressionState, effect: &UpgradeEffect) {
    match effect.kind {
        EffectKind::FlatBonus => {
            if let Some(p) = state.producer_mut(&effect.target_id) {
                p.modifiers.flat_bonus += fraction(effect.value, 0.0);
            }
        }
        EffectKind::Multiplier => {
            if let Some(p) = state.producer_mut(&effect.target_id) {
                p.modifiers.stack_multiplier(fraction(effect.value, 1.0));
            }
        }
        EffectKind::SetBaseValue => {
            if let Some(p) = state.producer_mut(&effect.target_id) {
                p.base_value = whole(effect.value, 0);
            }
        }
        EffectKind::GlobalMultiplier => {
            if effect.target_id != GLOBAL_TARGET {
                return;
            }
            // Producers still locked at purchase time do not receive it.
            let factor = fraction(effect.value, 1.0);
            for p in state.producers.iter_mut().filter(|p| p.is_unlocked) {
                p.modifiers.stack_multiplier(factor);
            }
        }
    }
}

/// Credit one tick of passive production. Returns the amount produced.
pub fn tick(state: &mut ProgressionState) -> u64 {
    let produced = state.total_per_second();
    if produced == 0 {
        return 0;
    }
    state.earn(produced);
    log_unlocks(state.refresh_unlocks());
    produced
}

/// Apply `ticks` ticks in a row. Returns the total produced.
pub fn tick_many(state: &mut ProgressionState, ticks: u32) -> u64 {
    (0..ticks).fold(0u64, |acc, _| acc.saturating_add(tick(state)))
}

fn log_unlocks(unlocked: Vec<String>) {
    for id in unlocked {
        debug!(producer = %id, "producer unlocked");
    }
}
