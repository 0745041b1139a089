//! Unlock gating for upgrades.

use serde::{Deserialize, Serialize};

use super::state::ProgressionState;

/// Requires the named producer to own at least `count` units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerCountCondition {
    pub id: String,
    pub count: u32,
}

/// Conjunction of thresholds. Absent keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnlockConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime_resource: Option<u64>,
    #[serde(alias = "incrementerCount", skip_serializing_if = "Option::is_none")]
    pub producer_count: Option<ProducerCountCondition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub purchased_upgrades: Vec<String>,
}

impl UnlockConditions {
    pub fn score(threshold: u64) -> Self {
        Self {
            score: Some(threshold),
            ..Self::default()
        }
    }

    pub fn lifetime(threshold: u64) -> Self {
        Self {
            lifetime_resource: Some(threshold),
            ..Self::default()
        }
    }

    pub fn owning(producer_id: &str, count: u32) -> Self {
        Self {
            producer_count: Some(ProducerCountCondition {
                id: producer_id.into(),
                count,
            }),
            ..Self::default()
        }
    }

    pub fn after(upgrade_ids: &[&str]) -> Self {
        Self {
            purchased_upgrades: upgrade_ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn and_score(mut self, threshold: u64) -> Self {
        self.score = Some(threshold);
        self
    }

    pub fn and_lifetime(mut self, threshold: u64) -> Self {
        self.lifetime_resource = Some(threshold);
        self
    }
}

/// True when every present condition holds. `None` is always unlocked.
///
/// A `producer_count` naming a producer the state does not have fails.
pub fn evaluate_unlock(conditions: Option<&UnlockConditions>, state: &ProgressionState) -> bool {
    let Some(c) = conditions else {
        return true;
    };

    if c.score.is_some_and(|t| state.score < t) {
        return false;
    }
    if c
        .lifetime_resource
        .is_some_and(|t| state.statistics.lifetime_resource < t)
    {
        return false;
    }
    if let Some(req) = &c.producer_count {
        match state.producer(&req.id) {
            Some(p) if p.count >= req.count => {}
            _ => return false,
        }
    }
    c.purchased_upgrades.iter().all(|id| state.is_purchased(id))
}
