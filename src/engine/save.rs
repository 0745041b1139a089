//! Persisted snapshot of a `ProgressionState`.
//!
//! ## Format
//!
//! One JSON object per game with camelCase keys: `score`, `producers`,
//! `purchasedUpgrades`, `statistics`, `settings`, `metadata`. Only inputs
//! are written; derived values (cost, production, per-second total) are
//! recomputed on load, and stale copies of them in old saves are ignored.
//!
//! ## Reconciliation
//!
//! Every field is optional. Whole quantities are written as JSON integers
//! and read back as either integers or floats, then sanitized, so integers
//! survive exactly and float-shaped older saves still load.
//! A missing field keeps the fresh default. For producers the current
//! definition wins for static fields (names, cost curve, unlock threshold);
//! the save wins for progress (count, base value, modifiers, unlock flag).
//! Producers the current definition no longer has are kept as saved.

use serde::{Deserialize, Serialize};

use super::catalog::GameDefinition;
use super::number::{fraction, whole};
use super::state::{ProducerState, ProgressionState, UpgradeModifiers};

/// Fallback growth rate for saved producers with no usable cost multiplier.
const DEFAULT_COST_MULTIPLIER: f64 = 1.15;

/// A whole quantity as stored: an exact integer, or any other JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedNumber {
    Whole(u64),
    Real(f64),
}

impl SavedNumber {
    /// Sanitized whole value; `fallback` when negative or not finite.
    pub fn whole(self, fallback: u64) -> u64 {
        match self {
            SavedNumber::Whole(n) => n,
            SavedNumber::Real(x) => whole(x, fallback),
        }
    }

    fn whole_u32(self, fallback: u32) -> u32 {
        u32::try_from(self.whole(u64::from(fallback))).unwrap_or(u32::MAX)
    }
}

impl From<u64> for SavedNumber {
    fn from(n: u64) -> Self {
        SavedNumber::Whole(n)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<SavedNumber>,
    pub producers: Vec<ProducerSave>,
    pub purchased_upgrades: Vec<String>,
    pub statistics: StatisticsSave,
    pub settings: SettingsSave,
    pub metadata: MetadataSave,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProducerSave {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<SavedNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_cost: Option<SavedNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_value: Option<SavedNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_modifiers: Option<ModifiersSave>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_threshold: Option<SavedNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unlocked: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifiersSave {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsSave {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_resource: Option<SavedNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_grants: Option<SavedNumber>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsSave {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_purchased_upgrades: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataSave {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_grant_amount: Option<SavedNumber>,
}

impl Snapshot {
    /// Extract the persisted fields of a state.
    pub fn capture(state: &ProgressionState) -> Self {
        Self {
            score: Some(state.score.into()),
            producers: state.producers.iter().map(ProducerSave::capture).collect(),
            purchased_upgrades: state.purchased_upgrades.clone(),
            statistics: StatisticsSave {
                lifetime_resource: Some(state.statistics.lifetime_resource.into()),
                manual_grants: Some(state.statistics.manual_grants.into()),
            },
            settings: SettingsSave {
                show_purchased_upgrades: Some(state.settings.show_purchased_upgrades),
            },
            metadata: MetadataSave {
                manual_grant_amount: Some(state.metadata.manual_grant_amount.into()),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ProducerSave {
    fn capture(p: &ProducerState) -> Self {
        Self {
            id: p.id.clone(),
            name: Some(p.name.clone()),
            description: Some(p.description.clone()),
            lore: Some(p.lore.clone()),
            count: Some(u64::from(p.count).into()),
            base_cost: Some(p.base_cost.into()),
            cost_multiplier: Some(p.cost_multiplier),
            base_value: Some(p.base_value.into()),
            upgrade_modifiers: Some(ModifiersSave {
                flat_bonus: Some(p.modifiers.flat_bonus),
                multiplier: Some(p.modifiers.multiplier),
            }),
            unlock_threshold: Some(p.unlock_threshold.into()),
            is_unlocked: Some(p.is_unlocked),
        }
    }

    /// Overlay saved progress onto a producer known to the definition.
    fn apply_progress(&self, p: &mut ProducerState) {
        if let Some(count) = self.count {
            p.count = count.whole_u32(p.count);
        }
        if let Some(base) = self.base_value {
            p.base_value = base.whole(p.base_value);
        }
        if let Some(m) = &self.upgrade_modifiers {
            p.modifiers = m.reconcile(&p.modifiers);
        }
        if self.is_unlocked == Some(true) {
            p.is_unlocked = true;
        }
    }

    /// Build a producer the definition does not know about.
    fn to_orphan(&self) -> ProducerState {
        let defaults = UpgradeModifiers::default();
        ProducerState {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            description: self.description.clone().unwrap_or_default(),
            lore: self.lore.clone().unwrap_or_default(),
            count: self.count.map_or(0, |c| c.whole_u32(0)),
            base_cost: self.base_cost.map_or(0, |c| c.whole(0)),
            cost_multiplier: self
                .cost_multiplier
                .map_or(DEFAULT_COST_MULTIPLIER, |m| fraction(m, DEFAULT_COST_MULTIPLIER)),
            base_value: self.base_value.map_or(0, |v| v.whole(0)),
            modifiers: self
                .upgrade_modifiers
                .as_ref()
                .map_or(defaults.clone(), |m| m.reconcile(&defaults)),
            unlock_threshold: self.unlock_threshold.map_or(0, |t| t.whole(0)),
            is_unlocked: self.is_unlocked.unwrap_or(false),
        }
    }
}

impl ModifiersSave {
    fn reconcile(&self, current: &UpgradeModifiers) -> UpgradeModifiers {
        UpgradeModifiers {
            flat_bonus: self
                .flat_bonus
                .map_or(current.flat_bonus, |v| fraction(v, current.flat_bonus)),
            multiplier: self
                .multiplier
                .map_or(current.multiplier, |v| fraction(v, current.multiplier)),
        }
    }
}

/// Merge `snapshot` over `fresh` (the output of `initialize` for `def`).
/// Unlock flags are not re-evaluated here; the caller does that once the
/// lifetime total is known.
pub fn reconcile(mut fresh: ProgressionState, def: &GameDefinition, snapshot: &Snapshot) -> ProgressionState {
    if let Some(score) = snapshot.score {
        fresh.score = score.whole(fresh.score);
    }

    for saved in snapshot.producers.iter().filter(|p| !p.id.is_empty()) {
        let known = def.producers.iter().any(|t| t.id == saved.id);
        match fresh.producer_mut(&saved.id) {
            Some(p) if known => saved.apply_progress(p),
            // Duplicate of an orphan already restored.
            Some(_) => {}
            None => fresh.producers.push(saved.to_orphan()),
        }
    }

    let mut purchased: Vec<String> = Vec::with_capacity(snapshot.purchased_upgrades.len());
    for id in &snapshot.purchased_upgrades {
        if !purchased.contains(id) {
            purchased.push(id.clone());
        }
    }
    fresh.purchased_upgrades = purchased;

    if let Some(lifetime) = snapshot.statistics.lifetime_resource {
        fresh.statistics.lifetime_resource = lifetime.whole(fresh.statistics.lifetime_resource);
    }
    if let Some(grants) = snapshot.statistics.manual_grants {
        fresh.statistics.manual_grants = grants.whole(0);
    }
    if let Some(show) = snapshot.settings.show_purchased_upgrades {
        fresh.settings.show_purchased_upgrades = show;
    }
    if let Some(amount) = snapshot.metadata.manual_grant_amount {
        fresh.metadata.manual_grant_amount = amount.whole(fresh.metadata.manual_grant_amount);
    }

    fresh
}
