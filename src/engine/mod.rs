//! Progression engine shared by every game variant.
//!
//! `state` holds the data model, `logic` the transitions over it, `save`
//! the persisted snapshot. Nothing in here touches storage or rendering.

pub mod actions;
pub mod catalog;
pub mod logic;
pub mod number;
pub mod save;
pub mod state;
pub mod unlock;

pub use actions::{apply, step, Intent};
pub use catalog::{
    AvailableUpgrade, EffectKind, GameDefinition, ProducerTier, UpgradeCatalog, UpgradeDefinition,
    UpgradeEffect, GLOBAL_TARGET,
};
pub use logic::{grant_manual, initialize, purchase_producer, purchase_upgrade, rehydrate, tick};
pub use save::{SavedNumber, Snapshot};
pub use state::{ProducerState, ProgressionState, UpgradeModifiers};
pub use unlock::{evaluate_unlock, UnlockConditions};
