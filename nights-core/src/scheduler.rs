//! Deferred transitions as owned, cancelable records.
//!
//! Every scripted "and then, three seconds later..." beat is a row in this
//! table instead of a dangling callback. Each row remembers the phase that
//! armed it; when the game moves to a different phase the session cancels
//! the old phase's rows, so a stale timer can never fire a transition into
//! a scene it no longer belongs to.

use std::time::Duration;

use crate::event::TimerTag;
use crate::phase::GamePhase;

/// One armed timer.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub tag: TimerTag,
    /// The phase that was current when the timer was armed.
    pub owner: GamePhase,
    pub fires_at: Duration,
}

/// The timer table. Time is whatever monotonic value the driver supplies;
/// the table only compares it.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer. An already-armed timer with the same tag is replaced,
    /// which is also how per-keystroke deadlines get pushed back.
    pub fn schedule(&mut self, tag: TimerTag, owner: GamePhase, now: Duration, delay: Duration) {
        self.tasks.retain(|t| t.tag != tag);
        self.tasks.push(ScheduledTask {
            tag,
            owner,
            fires_at: now + delay,
        });
    }

    /// Disarm a timer. Returns whether one was pending.
    pub fn cancel(&mut self, tag: TimerTag) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.tag != tag);
        self.tasks.len() != before
    }

    /// Disarm every timer owned by the given phase.
    pub fn cancel_owner(&mut self, owner: GamePhase) {
        self.tasks.retain(|t| t.owner != owner);
    }

    /// Drain all timers due at `now`, earliest first.
    pub fn due(&mut self, now: Duration) -> Vec<TimerTag> {
        let mut fired: Vec<ScheduledTask> = Vec::new();
        self.tasks.retain(|t| {
            if t.fires_at <= now {
                fired.push(t.clone());
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|t| t.fires_at);
        fired.into_iter().map(|t| t.tag).collect()
    }

    pub fn is_armed(&self, tag: TimerTag) -> bool {
        self.tasks.iter().any(|t| t.tag == tag)
    }

    pub fn pending(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
