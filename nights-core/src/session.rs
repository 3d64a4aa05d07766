//! GameSession - the primary public API for running the game.
//!
//! Wraps the engine and the timer table into a single object with two entry
//! points: `dispatch` for player/service events and `tick` for the passage
//! of time. Timer effects are consumed here; everything else (speech, sound,
//! service requests) is returned for the frontend to execute.
//!
//! The session enforces timer ownership: a timer belongs to the phase that
//! was current when it was armed, and transitioning away from that phase
//! cancels it. That rule is what makes "skip the video early" and "restart
//! from the game-over screen" safe against stale transitions.

use std::time::Duration;

use crate::engine::{submission_outcome, Engine};
use crate::event::{Effect, GameEvent, KeyInput};
use crate::grammar::GrammarPaper;
use crate::phase::GamePhase;
use crate::scheduler::Scheduler;
use crate::state::GameState;
use crate::walk::WalkController;

/// A running playthrough.
pub struct GameSession {
    engine: Engine,
    scheduler: Scheduler,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Pin the lobby tape spawn (useful for testing).
    pub fn with_tape_position(mut self, x: f32) -> Self {
        self.engine = Engine::new().with_tape_position(x);
        self
    }

    /// Feed one event through the engine. `now` is any monotonic clock the
    /// driver keeps; the session only compares values from it.
    pub fn dispatch(&mut self, event: GameEvent, now: Duration) -> Vec<Effect> {
        if matches!(event, GameEvent::Restart) {
            // A full reset owes nothing to any previous phase.
            self.scheduler.clear();
        }
        let before = self.engine.phase();
        let effects = self.engine.advance(event);
        self.route_effects(effects, before, now)
    }

    /// Fire every timer due at `now`, in deadline order.
    pub fn tick(&mut self, now: Duration) -> Vec<Effect> {
        let mut external = Vec::new();
        for tag in self.scheduler.due(now) {
            // A tag drained here may have been invalidated by an earlier
            // firing in the same batch; the engine's phase gates absorb it.
            let before = self.engine.phase();
            let effects = self.engine.advance(GameEvent::TimerFired(tag));
            external.extend(self.route_effects(effects, before, now));
        }
        external
    }

    fn route_effects(
        &mut self,
        effects: Vec<Effect>,
        before: GamePhase,
        now: Duration,
    ) -> Vec<Effect> {
        let after = self.engine.phase();
        if after != before {
            self.scheduler.cancel_owner(before);
        }

        let mut external = Vec::new();
        for effect in effects {
            match effect {
                // Arms always trail any transition in the same advance, so
                // the post-advance phase is the owning phase.
                Effect::StartTimer { tag, delay } => {
                    self.scheduler.schedule(tag, after, now, delay)
                }
                Effect::CancelTimer(tag) => {
                    self.scheduler.cancel(tag);
                }
                other => external.push(other),
            }
        }
        external
    }

    // ========================================================================
    // Convenience wrappers
    // ========================================================================

    /// Press a key.
    pub fn press(&mut self, key: KeyInput, now: Duration) -> Vec<Effect> {
        self.dispatch(GameEvent::Key(key), now)
    }

    /// Request the next dialogue beat.
    pub fn advance_dialogue(&mut self, now: Duration) -> Vec<Effect> {
        self.dispatch(GameEvent::DialogueAdvance, now)
    }

    /// Submit whichever grammar paper is on the desk, if it is complete.
    pub fn submit_paper(&mut self, now: Duration) -> Vec<Effect> {
        let Some(paper) = self.engine.grammar() else {
            return Vec::new();
        };
        let Some(submission) = paper.submit() else {
            return Vec::new();
        };
        let outcome = submission_outcome(paper, submission);
        self.dispatch(GameEvent::Minigame(outcome), now)
    }

    // ========================================================================
    // State queries
    // ========================================================================

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn day(&self) -> u32 {
        self.engine.state().day
    }

    pub fn walk(&self) -> Option<&WalkController> {
        self.engine.walk()
    }

    pub fn grammar(&self) -> Option<&GrammarPaper> {
        self.engine.grammar()
    }

    pub fn grammar_mut(&mut self) -> Option<&mut GrammarPaper> {
        self.engine.grammar_mut()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
