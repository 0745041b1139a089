//! Glimmerglass Workshop: gather light, grind lenses, light up the bay.

use crate::engine::{GameDefinition, ProducerTier, UnlockConditions, UpgradeCatalog, UpgradeDefinition, UpgradeEffect};

pub const ID: &str = "glimmerglass";

pub const SPARK_GATHERER: &str = "spark_gatherer";
pub const PRISM_POLISHER: &str = "prism_polisher";
pub const LENS_GRINDER: &str = "lens_grinder";
pub const TIDE_LANTERN: &str = "tide_lantern";
pub const HARBOR_BEACON: &str = "harbor_beacon";
pub const AURORA_LOOM: &str = "aurora_loom";

pub fn definition() -> GameDefinition {
    GameDefinition {
        id: ID.into(),
        title: "Glimmerglass Workshop".into(),
        blurb: "Catch stray light and grow a lantern-maker's empire.".into(),
        resource_name: "lumens".into(),
        starting_resource: 25,
        manual_grant_amount: 1,
        available: true,
        producers: producers(),
        upgrades: upgrades(),
    }
}

fn producers() -> Vec<ProducerTier> {
    vec![
        ProducerTier::new(SPARK_GATHERER, "Spark Gatherer", 10, 1.15, 1, 0).describe(
            "Collects stray sparks from the workshop floor.",
            "Apprentices start here, sweeping light into jars.",
        ),
        ProducerTier::new(PRISM_POLISHER, "Prism Polisher", 100, 1.15, 5, 75).describe(
            "Polishes raw crystal until it splits light cleanly.",
            "A good polisher can tell a flaw by its colour.",
        ),
        ProducerTier::new(LENS_GRINDER, "Lens Grinder", 1_100, 1.15, 30, 800).describe(
            "Grinds lenses that focus whole rooms of light.",
            "The wheel never stops; neither does the dust.",
        ),
        ProducerTier::new(TIDE_LANTERN, "Tide Lantern", 12_000, 1.15, 150, 9_000).describe(
            "Lanterns that drink moonlight off the water.",
            "Fishermen swear the tide runs brighter near them.",
        ),
        ProducerTier::new(HARBOR_BEACON, "Harbor Beacon", 130_000, 1.15, 900, 100_000).describe(
            "A beacon whose beam sweeps the entire bay.",
            "Ships no longer wreck here. Moths are less lucky.",
        ),
        ProducerTier::new(AURORA_LOOM, "Aurora Loom", 1_400_000, 1.15, 5_000, 1_000_000).describe(
            "Weaves the northern lights into bolts of glow.",
            "Nobody remembers who built the first one.",
        ),
    ]
}

fn upgrades() -> UpgradeCatalog {
    UpgradeCatalog::new(vec![
        UpgradeDefinition::new("steady_hands", "Steady Hands", "Spark Gatherers produce +1 lumen each.", 50)
            .effect(UpgradeEffect::flat_bonus(SPARK_GATHERER, 1.0))
            .unlocked_when(UnlockConditions::owning(SPARK_GATHERER, 1)),
        UpgradeDefinition::new("copper_reflectors", "Copper Reflectors", "Spark Gatherers produce 50% more.", 200)
            .effect(UpgradeEffect::multiplier(SPARK_GATHERER, 1.5))
            .unlocked_when(UnlockConditions::after(&["steady_hands"])),
        UpgradeDefinition::new("polished_facets", "Polished Facets", "Prism Polishers produce +2 lumens each.", 500)
            .effect(UpgradeEffect::flat_bonus(PRISM_POLISHER, 2.0))
            .unlocked_when(UnlockConditions::owning(PRISM_POLISHER, 5)),
        UpgradeDefinition::new("etched_prisms", "Etched Prisms", "Prism Polishers produce 25% more.", 2_000)
            .effect(UpgradeEffect::multiplier(PRISM_POLISHER, 1.25))
            .unlocked_when(UnlockConditions::after(&["polished_facets"]).and_lifetime(2_500)),
        UpgradeDefinition::new("ground_glass", "Ground Glass", "Lens Grinders produce +10 lumens each.", 6_000)
            .effect(UpgradeEffect::flat_bonus(LENS_GRINDER, 10.0))
            .unlocked_when(UnlockConditions::owning(LENS_GRINDER, 5)),
        UpgradeDefinition::new("tide_tables", "Tide Tables", "Tide Lanterns produce 50% more.", 60_000)
            .effect(UpgradeEffect::multiplier(TIDE_LANTERN, 1.5))
            .unlocked_when(UnlockConditions::owning(TIDE_LANTERN, 5)),
        UpgradeDefinition::new(
            "beacon_rebuild",
            "Beacon Rebuild",
            "Harbor Beacons are rebuilt to produce 1200 lumens base.",
            400_000,
        )
        .effect(UpgradeEffect::set_base_value(HARBOR_BEACON, 1_200.0))
        .unlocked_when(UnlockConditions::owning(HARBOR_BEACON, 1)),
        UpgradeDefinition::new("harbor_glow", "Harbor Glow", "Every unlocked producer produces 10% more.", 1_000)
            .effect(UpgradeEffect::global_multiplier(1.1))
            .unlocked_when(UnlockConditions::lifetime(1_500)),
        UpgradeDefinition::new(
            "bay_resonance",
            "Bay Resonance",
            "Every unlocked producer produces another 15% more.",
            25_000,
        )
        .effect(UpgradeEffect::global_multiplier(1.15))
        .unlocked_when(UnlockConditions::after(&["harbor_glow"]).and_lifetime(30_000)),
        UpgradeDefinition::new(
            "lumen_covenant",
            "Lumen Covenant",
            "Spark Gatherers +2 lumens each, Prism Polishers 10% more.",
            10_000,
        )
        .effect(UpgradeEffect::flat_bonus(SPARK_GATHERER, 2.0))
        .effect(UpgradeEffect::multiplier(PRISM_POLISHER, 1.1))
        .unlocked_when(UnlockConditions::score(8_000)),
    ])
}
