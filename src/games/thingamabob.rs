//! Thingamabob Workshop: the original single-tier catalog on the shared engine.

use crate::engine::{GameDefinition, ProducerTier, UnlockConditions, UpgradeCatalog, UpgradeDefinition, UpgradeEffect};

pub const ID: &str = "thingamabob";
pub const THINGAMABOB: &str = "thingamabob";

pub fn definition() -> GameDefinition {
    GameDefinition {
        id: ID.into(),
        title: "Thingamabob Workshop".into(),
        blurb: "Build thingamabobs. Tweak them. Build more.".into(),
        resource_name: "points".into(),
        starting_resource: 10,
        manual_grant_amount: 1,
        available: true,
        producers: vec![ProducerTier::new(THINGAMABOB, "Thingamabob", 10, 1.15, 1, 0).describe(
            "A curious little gadget that does... something.",
            "",
        )],
        upgrades: upgrades(),
    }
}

fn flat_step(id: &str, name: &str, description: &str, cost: u64, after: Option<&str>) -> UpgradeDefinition {
    let upgrade = UpgradeDefinition::new(id, name, description, cost)
        .effect(UpgradeEffect::flat_bonus(THINGAMABOB, 0.2));
    match after {
        Some(prev) => upgrade.unlocked_when(UnlockConditions::after(&[prev])),
        None => upgrade,
    }
}

fn upgrades() -> UpgradeCatalog {
    UpgradeCatalog::new(vec![
        flat_step(
            "thingamabob_flat_1",
            "Minor Tweak",
            "Slightly improves Thingamabob output. (+0.2 to base effectiveness)",
            20,
            None,
        ),
        flat_step(
            "thingamabob_flat_2",
            "Small Adjustment",
            "Another small boost to Thingamabobs. (+0.2 to base effectiveness)",
            30,
            Some("thingamabob_flat_1"),
        ),
        flat_step(
            "thingamabob_flat_3",
            "Fine Tuning",
            "More fine tuning for Thingamabobs. (+0.2 to base effectiveness)",
            45,
            Some("thingamabob_flat_2"),
        ),
        flat_step(
            "thingamabob_flat_4",
            "Calibration",
            "Calibrating Thingamabobs. (+0.2 to base effectiveness)",
            65,
            Some("thingamabob_flat_3"),
        ),
        flat_step(
            "thingamabob_flat_5_milestone",
            "Efficiency Breakthrough!",
            "Thingamabobs are now noticeably better! (+0.2, five of these double the base output)",
            100,
            Some("thingamabob_flat_4"),
        ),
        UpgradeDefinition::new("thingamabob_mult_1", "Thingamabob Gearing", "Improves Thingamabob output by 5%.", 150)
            .effect(UpgradeEffect::multiplier(THINGAMABOB, 1.05))
            .unlocked_when(UnlockConditions::owning(THINGAMABOB, 10)),
        UpgradeDefinition::new("global_mult_1", "Universal Production Boost I", "All incrementers produce 2% more.", 500)
            .effect(UpgradeEffect::global_multiplier(1.02))
            .unlocked_when(UnlockConditions::score(1_000)),
        UpgradeDefinition::new(
            "global_mult_2",
            "Universal Production Boost II",
            "All incrementers produce an additional 3% more.",
            2_500,
        )
        .effect(UpgradeEffect::global_multiplier(1.03))
        .unlocked_when(UnlockConditions::after(&["global_mult_1"]).and_score(5_000)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::logic;

    #[test]
    fn cost_curve_matches_classic_values() {
        let mut state = logic::initialize(&definition());
        state.score = 100;
        let mut costs = Vec::new();
        for _ in 0..3 {
            costs.push(state.producer(THINGAMABOB).unwrap().current_cost());
            logic::purchase_producer(&mut state, THINGAMABOB);
        }
        assert_eq!(costs, vec![10, 11, 13]);
    }

    #[test]
    fn flat_chain_unlocks_one_at_a_time() {
        let def = definition();
        let mut state = logic::initialize(&def);
        state.score = 1_000_000;
        let ids = |state: &crate::engine::ProgressionState| -> Vec<String> {
            def.upgrades
                .available(state)
                .into_iter()
                .map(|u| u.definition.id)
                .filter(|id| id.starts_with("thingamabob_flat"))
                .collect()
        };
        assert_eq!(ids(&state), vec!["thingamabob_flat_1".to_string()]);
        logic::purchase_upgrade(&mut state, "thingamabob_flat_1", &def.upgrades);
        assert_eq!(ids(&state), vec!["thingamabob_flat_2".to_string()]);
    }

    #[test]
    fn five_flat_steps_double_output() {
        let def = definition();
        let mut state = logic::initialize(&def);
        state.score = 10_000;
        logic::purchase_producer(&mut state, THINGAMABOB);
        for id in [
            "thingamabob_flat_1",
            "thingamabob_flat_2",
            "thingamabob_flat_3",
            "thingamabob_flat_4",
        ] {
            assert!(logic::purchase_upgrade(&mut state, id, &def.upgrades));
        }
        // 1 + 0.8 floors to 1
        assert_eq!(state.producer(THINGAMABOB).unwrap().individual_production(), 1);
        assert!(logic::purchase_upgrade(&mut state, "thingamabob_flat_5_milestone", &def.upgrades));
        assert_eq!(state.producer(THINGAMABOB).unwrap().individual_production(), 2);
    }

    #[test]
    fn gearing_requires_ten_thingamabobs() {
        let def = definition();
        let mut state = logic::initialize(&def);
        state.score = 10_000;
        let has_gearing =
            |s: &crate::engine::ProgressionState| def.upgrades.available(s).iter().any(|u| u.definition.id == "thingamabob_mult_1");
        for _ in 0..9 {
            logic::purchase_producer(&mut state, THINGAMABOB);
        }
        assert!(!has_gearing(&state));
        logic::purchase_producer(&mut state, THINGAMABOB);
        assert!(has_gearing(&state));
    }
}
