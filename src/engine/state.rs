//! Progression state definitions shared by every game variant.
//!
//! Derived numbers (purchase cost, unit output, per-type output, total per
//! second) are methods over the stored inputs. Nothing derived is kept in a
//! field, so a producer can never disagree with its own count or modifiers.

use super::catalog::ProducerTier;
use super::number::{round4, whole};

/// Modifiers accumulated on a producer by purchased upgrades.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeModifiers {
    /// Added to the base value before the multiplier is applied.
    pub flat_bonus: f64,
    /// Product of every multiplier applied so far (default 1.0).
    pub multiplier: f64,
}

impl Default for UpgradeModifiers {
    fn default() -> Self {
        Self {
            flat_bonus: 0.0,
            multiplier: 1.0,
        }
    }
}

impl UpgradeModifiers {
    /// Stack a multiplier, rounding the product to 4 decimal places.
    pub fn stack_multiplier(&mut self, factor: f64) {
        self.multiplier = round4(self.multiplier * factor);
    }
}

/// One producer type owned by the player.
#[derive(Clone, Debug, PartialEq)]
pub struct ProducerState {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lore: String,
    /// Units owned.
    pub count: u32,
    pub base_cost: u64,
    /// Geometric growth base of the cost curve.
    pub cost_multiplier: f64,
    /// Per-unit output before modifiers.
    pub base_value: u64,
    pub modifiers: UpgradeModifiers,
    /// Lifetime resource required before the producer can be bought.
    pub unlock_threshold: u64,
    /// Once set, never cleared.
    pub is_unlocked: bool,
}

impl ProducerState {
    pub fn from_tier(tier: &ProducerTier) -> Self {
        Self {
            id: tier.id.clone(),
            name: tier.name.clone(),
            description: tier.description.clone(),
            lore: tier.lore.clone(),
            count: 0,
            base_cost: tier.base_cost,
            cost_multiplier: tier.cost_multiplier,
            base_value: tier.base_value,
            modifiers: UpgradeModifiers::default(),
            unlock_threshold: tier.unlock_threshold,
            is_unlocked: false,
        }
    }

    /// Cost of the next unit: `floor(base_cost * cost_multiplier ^ count)`.
    ///
    /// A cost too large to represent is reported as `u64::MAX`, which no
    /// balance can reach.
    pub fn current_cost(&self) -> u64 {
        let growth = i32::try_from(self.count)
            .map(|n| self.cost_multiplier.powi(n))
            .unwrap_or(f64::INFINITY);
        whole(self.base_cost as f64 * growth, u64::MAX)
    }

    /// Output of a single unit: `floor((base_value + flat_bonus) * multiplier)`.
    /// Locked producers never contribute.
    pub fn individual_production(&self) -> u64 {
        if !self.is_unlocked {
            return 0;
        }
        let raw = (self.base_value as f64 + self.modifiers.flat_bonus) * self.modifiers.multiplier;
        whole(raw, 0)
    }

    /// Output of every unit of this type per tick.
    pub fn total_production(&self) -> u64 {
        u64::from(self.count).saturating_mul(self.individual_production())
    }

    /// Unlock if `lifetime` reached the threshold. Returns true when this
    /// call flipped the flag.
    pub fn unlock_if_reached(&mut self, lifetime: u64) -> bool {
        if self.is_unlocked || lifetime < self.unlock_threshold {
            return false;
        }
        self.is_unlocked = true;
        true
    }
}

/// Lifetime counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Everything ever earned. Never decreases, unlike `score`.
    pub lifetime_resource: u64,
    /// Number of manual grant actions performed.
    pub manual_grants: u64,
}

/// Persisted UI preferences. Not read by any formula.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub show_purchased_upgrades: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    /// Resource granted by one manual action.
    pub manual_grant_amount: u64,
}

/// Full progression of one game session.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionState {
    /// Spendable balance.
    pub score: u64,
    /// Ordered by tier; ids are unique.
    pub producers: Vec<ProducerState>,
    /// Upgrade ids in purchase order. Append-only, no duplicates.
    pub purchased_upgrades: Vec<String>,
    pub statistics: Statistics,
    pub settings: Settings,
    pub metadata: Metadata,
}

impl ProgressionState {
    /// Sum of every unlocked producer's output per tick.
    pub fn total_per_second(&self) -> u64 {
        self.producers
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.total_production()))
    }

    pub fn producer(&self, id: &str) -> Option<&ProducerState> {
        self.producers.iter().find(|p| p.id == id)
    }

    pub(crate) fn producer_mut(&mut self, id: &str) -> Option<&mut ProducerState> {
        self.producers.iter_mut().find(|p| p.id == id)
    }

    /// Producers with at least one unit.
    pub fn owned_producers(&self) -> impl Iterator<Item = &ProducerState> {
        self.producers.iter().filter(|p| p.count > 0)
    }

    pub fn is_purchased(&self, upgrade_id: &str) -> bool {
        self.purchased_upgrades.iter().any(|id| id == upgrade_id)
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.score >= cost
    }

    /// The nearest still-locked producer, if any: (id, threshold).
    pub fn next_unlock(&self) -> Option<(&str, u64)> {
        self.producers
            .iter()
            .filter(|p| !p.is_unlocked)
            .min_by_key(|p| p.unlock_threshold)
            .map(|p| (p.id.as_str(), p.unlock_threshold))
    }

    /// Credit earned resource to both the balance and the lifetime total.
    pub(crate) fn earn(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
        self.statistics.lifetime_resource = self.statistics.lifetime_resource.saturating_add(amount);
    }

    /// Unlock every producer whose threshold the lifetime total has reached.
    /// Returns the ids that were newly unlocked.
    pub fn refresh_unlocks(&mut self) -> Vec<String> {
        let lifetime = self.statistics.lifetime_resource;
        self.producers
            .iter_mut()
            .filter_map(|p| p.unlock_if_reached(lifetime).then(|| p.id.clone()))
            .collect()
    }
}
