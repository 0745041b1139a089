//! Player and host intents, and the dispatcher that applies them.
//!
//! The presentation layer turns clicks and key presses into [`Intent`]s;
//! the host's timer produces [`Intent::Tick`].

use super::catalog::UpgradeCatalog;
use super::logic;
use super::state::ProgressionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Manual "cast"/"click".
    GrantManual,
    PurchaseProducer(String),
    PurchaseUpgrade(String),
    Tick,
    /// Flip the "show purchased upgrades" filter.
    ToggleShowPurchased,
}

/// Apply `intent` in place. Returns true when the state changed.
pub fn apply(state: &mut ProgressionState, intent: &Intent, catalog: &UpgradeCatalog) -> bool {
    match intent {
        Intent::GrantManual => {
            logic::grant_manual(state);
            true
        }
        Intent::PurchaseProducer(id) => logic::purchase_producer(state, id),
        Intent::PurchaseUpgrade(id) => logic::purchase_upgrade(state, id, catalog),
        Intent::Tick => logic::tick(state) > 0,
        Intent::ToggleShowPurchased => {
            state.settings.show_purchased_upgrades = !state.settings.show_purchased_upgrades;
            true
        }
    }
}

/// Pure form of [`apply`]: returns the next state, leaving `state` alone.
pub fn step(state: &ProgressionState, intent: &Intent, catalog: &UpgradeCatalog) -> ProgressionState {
    let mut next = state.clone();
    apply(&mut next, intent, catalog);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games;

    #[test]
    fn step_does_not_mutate_input() {
        let def = games::glimmerglass();
        let state = logic::initialize(def);
        let next = step(&state, &Intent::GrantManual, &def.upgrades);
        assert_eq!(state.score, 25);
        assert_eq!(next.score, 26);
    }

    #[test]
    fn rejected_intent_returns_equal_state() {
        let def = games::glimmerglass();
        let state = logic::initialize(def);
        let next = step(&state, &Intent::PurchaseUpgrade("missing".into()), &def.upgrades);
        assert_eq!(next, state);
        let next = step(&state, &Intent::Tick, &def.upgrades);
        assert_eq!(next, state);
    }

    #[test]
    fn apply_reports_change() {
        let def = games::glimmerglass();
        let mut state = logic::initialize(def);
        assert!(!apply(&mut state, &Intent::Tick, &def.upgrades));
        assert!(apply(&mut state, &Intent::PurchaseProducer("spark_gatherer".into()), &def.upgrades));
        assert!(apply(&mut state, &Intent::Tick, &def.upgrades));
        assert!(apply(&mut state, &Intent::ToggleShowPurchased, &def.upgrades));
        assert!(state.settings.show_purchased_upgrades);
    }
}
