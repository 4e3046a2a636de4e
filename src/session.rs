//! Session: the fixed-step control loop state around a [`GameState`].
//!
//! Owns the concerns the engine leaves out: pause and quit. Each step takes
//! at most one command, applies it, then advances the engine by one tick
//! unless paused.

use log::info;

use crate::core::{GameSnapshot, GameState};
use crate::types::{GameAction, LockEvent};

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    paused: bool,
    quit: bool,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        info!("new session, seed {}", seed);
        Self {
            game: GameState::new(seed),
            paused: false,
            quit: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Apply one command. Returns true if it changed anything.
    ///
    /// `Pause` toggles while the game runs; `Reset` also unpauses. Moves are
    /// dropped while paused.
    pub fn handle(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.game.game_over() {
                    return false;
                }
                self.paused = !self.paused;
                info!("{}", if self.paused { "paused" } else { "resumed" });
                true
            }
            GameAction::Reset => {
                self.paused = false;
                self.game.apply_action(action)
            }
            _ if self.paused => false,
            _ => self.game.apply_action(action),
        }
    }

    /// One fixed step: the optional command, then one engine tick unless paused.
    ///
    /// Returns the lock that happened during this step, if any.
    pub fn step(&mut self, action: Option<GameAction>) -> Option<LockEvent> {
        if let Some(action) = action {
            self.handle(action);
        }
        if !self.paused {
            self.game.tick();
        }
        self.game.take_last_event()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

/// Pick the one command a step will carry when another key arrives.
///
/// The first command wins, except that `Pause` and `Reset` replace a queued
/// move. A second control command does not replace the first.
pub fn queue_command(queued: Option<GameAction>, incoming: GameAction) -> Option<GameAction> {
    let is_control = |a: GameAction| matches!(a, GameAction::Pause | GameAction::Reset);
    match queued {
        None => Some(incoming),
        Some(current) if !is_control(current) && is_control(incoming) => Some(incoming),
        Some(current) => Some(current),
    }
}
