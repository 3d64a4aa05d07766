//! Events consumed by the engine and effects it requests in return.
//!
//! The engine never blocks and never touches a clock, a speaker, or the
//! network. Everything observable happens because a driver feeds a
//! [`GameEvent`] in and executes the [`Effect`]s that come back out.

use std::time::Duration;

use crate::grading::GradeReport;
use crate::grammar::GrammarSubmission;
use crate::state::ArtColor;

/// A key the game cares about. Everything else is dropped at the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    Up,
    Down,
    /// Enter or Space.
    Confirm,
    /// The E key.
    Interact,
}

/// Completion payloads fed back from minigames.
#[derive(Debug, Clone, PartialEq)]
pub enum MinigameOutcome {
    /// Classic grammar paper submitted (day 1).
    GrammarSubmitted(GrammarSubmission),
    /// Single-word suffix test submitted (day 7).
    SuffixSubmitted(GrammarSubmission),
    LockerOpened,
    LibraryDoorOpened,
    MusicDoorOpened,
    TapeFound,
    TheaterEntered,
}

/// Tags for every deferred beat in the script. A tag identifies at most one
/// armed timer; re-arming replaces the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTag {
    /// Classroom lesson line lingers before the paper is handed out.
    AssignmentHandout,
    /// The science video runs out and the accusation starts.
    VideoAccusation,
    /// Snickerdoodle jumpscare ends, day 4 begins.
    JumpscareOver,
    /// Blood starts dripping over the detention journal.
    BloodReveal,
    /// Blood fades into the night-5 intro.
    NightFiveIntro,
    /// Free-roam walking segments end on a clock, not on proximity.
    WalkTimeout,
    /// The smartboard horror lingers before day 6.
    LibraryReveal,
    /// The music-room glitch lingers before day 7.
    MusicReveal,
    /// NO SIGNAL plays out before day 8.
    TheaterEnd,
    /// The failed suffix test bleeds into game over.
    SuffixFailure,
    /// Mixed paint sits on the palette before the portrait turns.
    PaintReveal,
    /// The living portrait jumpscare ends.
    HorrorOver,
    /// The day-4 journal snaps shut once enough "No." is written.
    JournalSnap,
    /// The ink-run cutscene; fires regardless of input.
    InkRun,
    /// The futile nurse-office quick-time event.
    QteFutile,
    /// TO BE CONTINUED gives way to THE END.
    TheEnd,
}

/// Named sound cues. Synthesis is the platform's problem; a missing audio
/// backend drops the cue silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jumpscare,
    CorruptedMusic,
}

/// An input to [`crate::engine::Engine::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player asked for the next dialogue beat.
    DialogueAdvance,
    /// A phase-gated key press.
    Key(KeyInput),
    /// A previously armed timer elapsed.
    TimerFired(TimerTag),
    /// A minigame finished with a payload.
    Minigame(MinigameOutcome),
    /// The grading service (or its fallback) replied.
    GradeArrived(GradeReport),
    /// The night-text service (or its fallback) replied.
    NightTextArrived(String),
    /// A character typed into the journal.
    JournalInput(char),
    /// The journal FINISH action.
    JournalFinish,
    /// A paint pot was picked in the art room.
    PaintPick(ArtColor),
    /// The MIX action in the art room.
    PaintMix,
    /// The USE INK choice in the nurse's office.
    InkHeal,
    /// Full restart back to day 1.
    Restart,
}

/// A side effect requested by the engine. Requested, not executed: the
/// scheduler owns timers and the frontend owns speech and sound.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Speak a line with the voice profile for the speaker.
    Speak { speaker: String, line: String },
    /// Cut off any in-flight speech.
    StopSpeech,
    /// Play a named cue.
    PlaySound(SoundCue),
    /// Arm a timer. An armed timer with the same tag is replaced.
    StartTimer { tag: TimerTag, delay: Duration },
    /// Disarm a timer if it is still pending.
    CancelTimer(TimerTag),
    /// Ask the grading service for a verdict on the submitted paper.
    RequestGrade(GrammarSubmission),
    /// Ask the night-text service for flavor text.
    RequestNightText { day: u32 },
}
