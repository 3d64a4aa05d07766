//! Proximity-walk segments.
//!
//! Every "walk down the corridor and press E at the right spot" beat runs on
//! this controller: a clamped position, a step size, and a list of targets
//! with a shared proximity threshold. Free-roam variants ignore targets and
//! end on a timer instead; the engine arms that timer on entry.
//!
//! The interaction prompt is derived from the same `is_near` check that
//! gates `interact`, so the prompt can never promise an interaction that
//! would not fire.

use crate::event::KeyInput;

/// What a walk target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkTarget {
    Locker,
    Door,
    Tape,
    TheaterDoor,
}

/// One interactable spot along the corridor.
#[derive(Debug, Clone)]
pub struct TargetSpot {
    pub target: WalkTarget,
    pub x: f32,
    /// Disabled spots neither prompt nor interact (a collected tape), unless
    /// they carry a locked hint (a sealed door).
    pub enabled: bool,
    /// Prompt shown while near and enabled.
    pub prompt: &'static str,
    /// Prompt shown while near but disabled.
    pub locked_hint: Option<&'static str>,
}

/// The derived view-layer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkPrompt {
    pub text: &'static str,
    /// False for "locked" hints; pressing E does nothing.
    pub interactable: bool,
}

const MIN_X: f32 = 5.0;
const MAX_X: f32 = 95.0;
const MIN_Y: f32 = 10.0;
const MAX_Y: f32 = 90.0;

/// Position state and targets for one walking segment.
#[derive(Debug, Clone)]
pub struct WalkController {
    pub x: f32,
    pub y: f32,
    step: f32,
    /// Free-roam segments move on both axes and complete on a timer.
    free_roam: bool,
    threshold: f32,
    targets: Vec<TargetSpot>,
}

impl WalkController {
    /// The day-4 / day-7 hallway: one marked locker.
    pub fn hallway() -> Self {
        Self {
            x: 10.0,
            y: 80.0,
            step: 2.0,
            free_roam: false,
            threshold: 10.0,
            targets: vec![TargetSpot {
                target: WalkTarget::Locker,
                x: 70.0,
                enabled: true,
                prompt: "PRESS [E] TO OPEN",
                locked_hint: None,
            }],
        }
    }

    /// The night-5 / day-6 corridor toward the library door.
    pub fn library() -> Self {
        Self {
            x: 10.0,
            y: 80.0,
            step: 2.5,
            free_roam: false,
            threshold: 15.0,
            targets: vec![TargetSpot {
                target: WalkTarget::Door,
                x: 85.0,
                enabled: true,
                prompt: "PRESS [E] TO OPEN DOOR",
                locked_hint: None,
            }],
        }
    }

    /// The night-6 corridor toward the music room.
    pub fn music() -> Self {
        Self {
            x: 10.0,
            y: 80.0,
            step: 2.5,
            free_roam: false,
            threshold: 15.0,
            targets: vec![TargetSpot {
                target: WalkTarget::Door,
                x: 85.0,
                enabled: true,
                prompt: "PRESS [E] TO OPEN DOOR",
                locked_hint: None,
            }],
        }
    }

    /// The night-7 lobby: a tape at a spawned position and the theater door,
    /// which stays sealed until the tape is held.
    pub fn lobby(tape_x: f32) -> Self {
        Self {
            x: 50.0,
            y: 80.0,
            step: 3.0,
            free_roam: false,
            threshold: 10.0,
            targets: vec![
                TargetSpot {
                    target: WalkTarget::Tape,
                    x: tape_x,
                    enabled: true,
                    prompt: "PRESS [E] TO PICK UP TAPE",
                    locked_hint: None,
                },
                TargetSpot {
                    target: WalkTarget::TheaterDoor,
                    x: 90.0,
                    enabled: false,
                    prompt: "PRESS [E] TO ENTER THEATER",
                    locked_hint: Some("LOCKED - FIND TAPE FIRST"),
                },
            ],
        }
    }

    /// A targetless segment that completes on a timer.
    pub fn free_roam() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            step: 2.0,
            free_roam: true,
            threshold: 0.0,
            targets: Vec::new(),
        }
    }

    /// Apply one movement key. Position is clamped to the walkable range;
    /// vertical keys only matter in free-roam segments.
    pub fn apply_key(&mut self, key: KeyInput) {
        match key {
            KeyInput::Left => self.x = (self.x - self.step).max(MIN_X),
            KeyInput::Right => self.x = (self.x + self.step).min(MAX_X),
            KeyInput::Up if self.free_roam => self.y = (self.y - self.step).max(MIN_Y),
            KeyInput::Down if self.free_roam => self.y = (self.y + self.step).min(MAX_Y),
            _ => {}
        }
    }

    /// Distance check against a spot.
    pub fn is_near(&self, spot: &TargetSpot) -> bool {
        (self.x - spot.x).abs() < self.threshold
    }

    /// Whether the player is near the given target kind.
    pub fn is_near_target(&self, target: WalkTarget) -> bool {
        self.targets
            .iter()
            .any(|s| s.target == target && self.is_near(s))
    }

    /// The interact key. Returns the first enabled target in range; a press
    /// anywhere else (or at a disabled target) is a no-op.
    pub fn interact(&self) -> Option<WalkTarget> {
        self.targets
            .iter()
            .find(|s| s.enabled && self.is_near(s))
            .map(|s| s.target)
    }

    /// The prompt to display, recomputed from the current position.
    pub fn prompt(&self) -> Option<WalkPrompt> {
        for spot in &self.targets {
            if !self.is_near(spot) {
                continue;
            }
            if spot.enabled {
                return Some(WalkPrompt {
                    text: spot.prompt,
                    interactable: true,
                });
            }
            if let Some(hint) = spot.locked_hint {
                return Some(WalkPrompt {
                    text: hint,
                    interactable: false,
                });
            }
        }
        None
    }

    /// Enable or disable a target (tape collected, door unsealed).
    pub fn set_enabled(&mut self, target: WalkTarget, enabled: bool) {
        for spot in &mut self.targets {
            if spot.target == target {
                spot.enabled = enabled;
            }
        }
    }

    pub fn targets(&self) -> &[TargetSpot] {
        &self.targets
    }

    pub fn is_free_roam(&self) -> bool {
        self.free_roam
    }
}
