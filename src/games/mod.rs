//! Game registry: the static definitions every session is started from.

pub mod glimmerglass;
pub mod thingamabob;

use std::sync::OnceLock;

use crate::engine::GameDefinition;

/// Which game the player has selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameChoice {
    Glimmerglass,
    Thingamabob,
}

impl GameChoice {
    /// All games in menu order.
    pub fn all() -> &'static [GameChoice] {
        &[GameChoice::Glimmerglass, GameChoice::Thingamabob]
    }

    /// Shared definition for this game.
    pub fn definition(&self) -> &'static GameDefinition {
        match self {
            GameChoice::Glimmerglass => glimmerglass(),
            GameChoice::Thingamabob => thingamabob(),
        }
    }
}

static REGISTRY: OnceLock<Vec<GameDefinition>> = OnceLock::new();

/// Every registered definition, in menu order. Built on first use.
pub fn all() -> &'static [GameDefinition] {
    REGISTRY.get_or_init(|| vec![glimmerglass::definition(), thingamabob::definition()])
}

/// `(id, title)` pairs for a game-selection menu. Games marked
/// unavailable are left out.
pub fn available_games() -> Vec<(&'static str, &'static str)> {
    listed(all())
}

fn listed(defs: &[GameDefinition]) -> Vec<(&str, &str)> {
    defs.iter()
        .filter(|def| def.available)
        .map(|def| (def.id.as_str(), def.title.as_str()))
        .collect()
}

pub fn game_by_id(id: &str) -> Option<&'static GameDefinition> {
    all().iter().find(|def| def.id == id)
}

pub fn glimmerglass() -> &'static GameDefinition {
    &all()[0]
}

pub fn thingamabob() -> &'static GameDefinition {
    &all()[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EffectKind, GLOBAL_TARGET};

    #[test]
    fn registry_lists_both_games() {
        let games = available_games();
        assert_eq!(
            games,
            vec![
                ("glimmerglass", "Glimmerglass Workshop"),
                ("thingamabob", "Thingamabob Workshop"),
            ]
        );
    }

    #[test]
    fn unavailable_games_are_not_listed() {
        let mut defs = vec![glimmerglass::definition(), thingamabob::definition()];
        defs[0].available = false;
        assert_eq!(listed(&defs), vec![("thingamabob", "Thingamabob Workshop")]);
        // still reachable directly
        assert!(game_by_id("glimmerglass").is_some());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(game_by_id("thingamabob").map(|d| d.starting_resource), Some(10));
        assert!(game_by_id("missing").is_none());
        for choice in GameChoice::all() {
            assert!(game_by_id(&choice.definition().id).is_some());
        }
    }

    #[test]
    fn registry_is_built_once() {
        assert!(std::ptr::eq(glimmerglass(), GameChoice::Glimmerglass.definition()));
        assert!(std::ptr::eq(all().as_ptr(), all().as_ptr()));
    }

    #[test]
    fn producer_ids_are_unique() {
        for def in all() {
            for (i, tier) in def.producers.iter().enumerate() {
                assert!(
                    def.producers[i + 1..].iter().all(|t| t.id != tier.id),
                    "{}: duplicate producer {}",
                    def.id,
                    tier.id
                );
            }
        }
    }

    #[test]
    fn every_tier_cost_grows_by_at_least_one() {
        for def in all() {
            for tier in &def.producers {
                assert!(
                    tier.base_cost as f64 * (tier.cost_multiplier - 1.0) >= 1.0,
                    "{}: {} cost curve too flat",
                    def.id,
                    tier.id
                );
            }
        }
    }

    #[test]
    fn upgrade_targets_exist() {
        for def in all() {
            for upgrade in def.upgrades.iter() {
                for effect in &upgrade.effects {
                    if effect.kind == EffectKind::GlobalMultiplier {
                        assert_eq!(effect.target_id, GLOBAL_TARGET);
                    } else {
                        assert!(
                            def.producers.iter().any(|t| t.id == effect.target_id),
                            "{}: {} targets unknown producer {}",
                            def.id,
                            upgrade.id,
                            effect.target_id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn prerequisites_exist_in_same_catalog() {
        for def in all() {
            for upgrade in def.upgrades.iter() {
                let Some(c) = &upgrade.unlock_conditions else {
                    continue;
                };
                for id in &c.purchased_upgrades {
                    assert!(def.upgrades.get(id).is_some(), "{}: unknown prerequisite {}", upgrade.id, id);
                }
                if let Some(req) = &c.producer_count {
                    assert!(def.producers.iter().any(|t| t.id == req.id));
                }
            }
        }
    }
}
