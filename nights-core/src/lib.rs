//! Story engine for "100 Nights in a School - Part 1".
//!
//! This crate provides:
//! - The phase state machine driving the whole narrative
//! - Content-matched dialogue tables for every scripted scene
//! - The grammar-paper, proximity-walk, journal, and dunk minigames
//! - A cancelable timer table for jumpscares and cutscene beats
//! - AI grading and night-text generation with deterministic fallbacks
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use nights_core::{GameEvent, GamePhase, GameSession, KeyInput};
//!
//! let mut session = GameSession::new();
//! let now = Duration::ZERO;
//!
//! // Enter the classroom from the title screen.
//! session.press(KeyInput::Confirm, now);
//! assert_eq!(session.phase(), GamePhase::IntroDialogue);
//!
//! // Walk the dialogue forward.
//! session.dispatch(GameEvent::DialogueAdvance, now);
//! assert_eq!(session.phase(), GamePhase::ClassroomLesson);
//! ```
//!
//! Rendering, audio, and speech are deliberately absent: the engine returns
//! [`Effect`]s describing what should happen, and the frontend decides how.

pub mod engine;
pub mod event;
pub mod grading;
pub mod grammar;
pub mod phase;
pub mod scheduler;
pub mod script;
pub mod session;
pub mod state;
pub mod testing;
pub mod typewriter;
pub mod walk;

// Primary public API
pub use engine::Engine;
pub use event::{Effect, GameEvent, KeyInput, MinigameOutcome, SoundCue, TimerTag};
pub use grading::{GradeReport, Grader, LetterGrade};
pub use grammar::{GrammarPaper, GrammarRole, GrammarSubmission, PaperMode, WordToken};
pub use phase::GamePhase;
pub use scheduler::Scheduler;
pub use script::{voice_profile, VoiceProfile};
pub use session::GameSession;
pub use state::{ArtColor, GameState, Item, ItemKind};
pub use testing::TestHarness;
pub use typewriter::{Advance, Typewriter};
pub use walk::{WalkController, WalkPrompt, WalkTarget};
