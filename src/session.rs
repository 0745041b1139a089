//! Host glue: one running game wired to a clock and a save slot.
//!
//! A presentation layer owns a `Session`, forwards player intents to
//! [`Session::dispatch`], and calls [`Session::advance`] from its frame or
//! interval callback. Every committed change is saved immediately; save
//! failures are logged by [`SaveSystem`] and never reach the caller.

use tracing::{debug, info};

use crate::engine::{actions, logic, AvailableUpgrade, GameDefinition, Intent, ProgressionState};
use crate::storage::{SaveSystem, StorageBackend};
use crate::time::GameTime;

pub struct Session<'a, B: StorageBackend> {
    definition: &'a GameDefinition,
    state: ProgressionState,
    saves: SaveSystem<B>,
    clock: GameTime,
}

impl<'a, B: StorageBackend> Session<'a, B> {
    /// Resume the saved game for `definition`, or start a new one.
    pub fn start(definition: &'a GameDefinition, backend: B) -> Self {
        let mut saves = SaveSystem::new(backend);
        let state = match saves.load(&definition.id) {
            Some(snapshot) => logic::rehydrate(definition, &snapshot),
            None => {
                info!(game = %definition.id, "starting new game");
                logic::initialize(definition)
            }
        };
        Self {
            definition,
            state,
            saves,
            clock: GameTime::default(),
        }
    }

    /// Replace the default one-tick-per-second clock.
    pub fn with_clock(mut self, clock: GameTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn definition(&self) -> &'a GameDefinition {
        self.definition
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn saves(&self) -> &SaveSystem<B> {
        &self.saves
    }

    /// Hand back the storage backend, e.g. to resume in a new session.
    pub fn into_backend(self) -> B {
        self.saves.into_inner()
    }

    pub fn available_upgrades(&self) -> Vec<AvailableUpgrade> {
        self.definition.upgrades.available(&self.state)
    }

    /// Apply a player intent. Returns true (and saves) if the state changed.
    pub fn dispatch(&mut self, intent: &Intent) -> bool {
        let changed = actions::apply(&mut self.state, intent, &self.definition.upgrades);
        if changed {
            self.saves.save(&self.definition.id, &self.state);
        }
        changed
    }

    /// Feed the host clock and run the ticks that elapsed. Saves once if
    /// anything was produced. Returns the number of ticks run.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let ticks = self.clock.update(now_ms);
        if ticks == 0 {
            return 0;
        }
        let produced = logic::tick_many(&mut self.state, ticks);
        debug!(ticks, produced, "advanced");
        if produced > 0 {
            self.saves.save(&self.definition.id, &self.state);
        }
        ticks
    }

    /// Delete the save and start over from the definition.
    pub fn reset(&mut self) {
        self.saves.reset(&self.definition.id);
        self.state = logic::initialize(self.definition);
        info!(game = %self.definition.id, "game reset");
    }
}
