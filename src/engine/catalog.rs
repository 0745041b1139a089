//! Static game definitions: producer tiers and upgrades.
//!
//! Definitions are shared read-only between sessions. Lookups hand out
//! shared references; anything a caller wants to modify is cloned out
//! first (see [`UpgradeCatalog::to_map`] and [`AvailableUpgrade`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::ProgressionState;
use super::unlock::{evaluate_unlock, UnlockConditions};

/// Target id used by [`EffectKind::GlobalMultiplier`] effects.
pub const GLOBAL_TARGET: &str = "GLOBAL";

/// Definition of a producer tier, copied into a fresh `ProducerState`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProducerTier {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lore: String,
    pub base_cost: u64,
    pub cost_multiplier: f64,
    pub base_value: u64,
    pub unlock_threshold: u64,
}

impl ProducerTier {
    pub fn new(
        id: &str,
        name: &str,
        base_cost: u64,
        cost_multiplier: f64,
        base_value: u64,
        unlock_threshold: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            lore: String::new(),
            base_cost,
            cost_multiplier,
            base_value,
            unlock_threshold,
        }
    }

    pub fn describe(mut self, description: &str, lore: &str) -> Self {
        self.description = description.into();
        self.lore = lore.into();
        self
    }
}

/// What an upgrade effect does to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    /// `flat_bonus += value`
    FlatBonus,
    /// `multiplier = round4(multiplier * value)`
    Multiplier,
    /// `base_value = value` (absolute override)
    SetBaseValue,
    /// Multiplier stacking on every unlocked producer.
    GlobalMultiplier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeEffect {
    /// A producer id, or [`GLOBAL_TARGET`].
    pub target_id: String,
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub value: f64,
}

impl UpgradeEffect {
    pub fn flat_bonus(target: &str, value: f64) -> Self {
        Self {
            target_id: target.into(),
            kind: EffectKind::FlatBonus,
            value,
        }
    }

    pub fn multiplier(target: &str, value: f64) -> Self {
        Self {
            target_id: target.into(),
            kind: EffectKind::Multiplier,
            value,
        }
    }

    pub fn set_base_value(target: &str, value: f64) -> Self {
        Self {
            target_id: target.into(),
            kind: EffectKind::SetBaseValue,
            value,
        }
    }

    pub fn global_multiplier(value: f64) -> Self {
        Self {
            target_id: GLOBAL_TARGET.into(),
            kind: EffectKind::GlobalMultiplier,
            value,
        }
    }
}

/// A one-time purchase that permanently modifies producers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: u64,
    /// Applied in list order.
    pub effects: Vec<UpgradeEffect>,
    /// `None` means unconditionally unlocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_conditions: Option<UnlockConditions>,
}

impl UpgradeDefinition {
    pub fn new(id: &str, name: &str, description: &str, cost: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            cost,
            effects: Vec::new(),
            unlock_conditions: None,
        }
    }

    pub fn effect(mut self, effect: UpgradeEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn unlocked_when(mut self, conditions: UnlockConditions) -> Self {
        self.unlock_conditions = Some(conditions);
        self
    }
}

/// An upgrade as shown to the player, annotated for the current state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableUpgrade {
    #[serde(flatten)]
    pub definition: UpgradeDefinition,
    pub is_affordable: bool,
    pub is_purchased: bool,
}

/// Ordered registry of upgrade definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpgradeCatalog {
    upgrades: Vec<UpgradeDefinition>,
}

impl UpgradeCatalog {
    /// Build a catalog. Later definitions with an id already present are dropped.
    pub fn new(definitions: Vec<UpgradeDefinition>) -> Self {
        let mut upgrades: Vec<UpgradeDefinition> = Vec::with_capacity(definitions.len());
        for def in definitions {
            if upgrades.iter().any(|u| u.id == def.id) {
                continue;
            }
            upgrades.push(def);
        }
        Self { upgrades }
    }

    /// Parse a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let definitions: Vec<UpgradeDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(definitions))
    }

    pub fn get(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.upgrades.iter()
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    /// Owned id → definition map, independent of the shared catalog.
    pub fn to_map(&self) -> HashMap<String, UpgradeDefinition> {
        self.upgrades
            .iter()
            .map(|u| (u.id.clone(), u.clone()))
            .collect()
    }

    /// Upgrades the player can currently see, in catalog order.
    ///
    /// Unpurchased upgrades are listed when their unlock conditions hold.
    /// Purchased ones are listed only with `show_purchased_upgrades` set,
    /// and also only while their conditions hold.
    pub fn available(&self, state: &ProgressionState) -> Vec<AvailableUpgrade> {
        self.upgrades
            .iter()
            .filter_map(|def| {
                let purchased = state.is_purchased(&def.id);
                if purchased && !state.settings.show_purchased_upgrades {
                    return None;
                }
                if !evaluate_unlock(def.unlock_conditions.as_ref(), state) {
                    return None;
                }
                Some(AvailableUpgrade {
                    definition: def.clone(),
                    is_affordable: state.can_afford(def.cost),
                    is_purchased: purchased,
                })
            })
            .collect()
    }
}

/// Everything needed to start one game variant.
#[derive(Clone, Debug, PartialEq)]
pub struct GameDefinition {
    /// Also the storage key suffix.
    pub id: String,
    pub title: String,
    pub blurb: String,
    /// Display name of the resource ("lumens", ...).
    pub resource_name: String,
    pub starting_resource: u64,
    pub manual_grant_amount: u64,
    /// Listed in the game-selection menu. Hidden games stay reachable by id.
    pub available: bool,
    /// Ordered by tier.
    pub producers: Vec<ProducerTier>,
    pub upgrades: UpgradeCatalog,
}
