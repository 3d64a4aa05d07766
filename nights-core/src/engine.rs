//! The phase state machine.
//!
//! `advance` is the only way anything in the game changes: it takes the
//! current `(phase, event)` pair plus whatever state the transition needs,
//! mutates the owned [`GameState`], and returns the side effects it wants
//! performed. It never blocks and never looks at a clock; deferred beats are
//! requested as timers and come back later as `TimerFired` events.
//!
//! Events that mean nothing in the current phase are dropped without
//! comment. Nothing here is allowed to fail.

use std::time::Duration;

use rand::Rng;

use crate::event::{Effect, GameEvent, KeyInput, MinigameOutcome, SoundCue, TimerTag};
use crate::grammar::{self, GrammarPaper, GrammarSubmission, PaperMode};
use crate::phase::GamePhase;
use crate::script::{self, DialogueStep};
use crate::state::{vhs_tape, ArtColor, GameState, ItemKind};
use crate::walk::{WalkController, WalkTarget};

/// The orchestrator: owns the game state and the active minigame
/// controllers, and dispatches every event.
pub struct Engine {
    state: GameState,
    walk: Option<WalkController>,
    grammar: Option<GrammarPaper>,
    /// Fixed lobby tape position for deterministic runs; None spawns it
    /// randomly.
    tape_position: Option<f32>,
    pending: Vec<Effect>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            walk: None,
            grammar: None,
            tape_position: None,
            pending: Vec::new(),
        }
    }

    /// Pin the lobby tape spawn (useful for testing).
    pub fn with_tape_position(mut self, x: f32) -> Self {
        self.tape_position = Some(x);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn walk(&self) -> Option<&WalkController> {
        self.walk.as_ref()
    }

    pub fn grammar(&self) -> Option<&GrammarPaper> {
        self.grammar.as_ref()
    }

    pub fn grammar_mut(&mut self) -> Option<&mut GrammarPaper> {
        self.grammar.as_mut()
    }

    /// Dispatch one event. Returns the side effects the driver must perform.
    pub fn advance(&mut self, event: GameEvent) -> Vec<Effect> {
        match event {
            GameEvent::DialogueAdvance => self.on_dialogue_advance(),
            GameEvent::Key(key) => self.on_key(key),
            GameEvent::TimerFired(tag) => self.on_timer(tag),
            GameEvent::Minigame(outcome) => self.on_minigame(outcome),
            GameEvent::GradeArrived(report) => {
                // Consumed by the grading watcher below, and only if the
                // game is still waiting on it.
                if self.state.phase == GamePhase::GradingWait {
                    self.state.grading = Some(report);
                }
            }
            GameEvent::NightTextArrived(text) => self.on_night_text(text),
            GameEvent::JournalInput(c) => self.on_journal_input(c),
            GameEvent::JournalFinish => self.on_journal_finish(),
            GameEvent::PaintPick(color) => self.on_paint_pick(color),
            GameEvent::PaintMix => self.on_paint_mix(),
            GameEvent::InkHeal => self.on_ink_heal(),
            GameEvent::Restart => self.start_game(),
        }
        self.run_watchers();
        std::mem::take(&mut self.pending)
    }

    // ========================================================================
    // Effect helpers
    // ========================================================================

    fn push(&mut self, effect: Effect) {
        self.pending.push(effect);
    }

    fn say(&mut self, speaker: &str, line: impl Into<String>) {
        let line = line.into();
        self.state.speaker = speaker.to_string();
        self.state.line = line.clone();
        self.state.dialogue_visible = true;
        self.push(Effect::StopSpeech);
        self.push(Effect::Speak {
            speaker: speaker.to_string(),
            line,
        });
    }

    fn hide_dialogue(&mut self) {
        self.state.dialogue_visible = false;
    }

    fn arm(&mut self, tag: TimerTag, millis: u64) {
        self.push(Effect::StartTimer {
            tag,
            delay: Duration::from_millis(millis),
        });
    }

    fn sound(&mut self, cue: SoundCue) {
        self.push(Effect::PlaySound(cue));
    }

    // ========================================================================
    // Phase entry
    // ========================================================================

    /// Switch phases. Minigame controllers die with the phase that owned
    /// them, full-screen phases drop the dialogue surface, and phases with
    /// an entry beat (a minigame to stage, a cutscene timer to arm) get it
    /// here so the arming phase is always the owning phase.
    fn enter(&mut self, phase: GamePhase) {
        use GamePhase::*;

        self.state.phase = phase;
        self.walk = None;
        self.grammar = None;
        if !phase.shows_hud() {
            self.hide_dialogue();
        }

        match phase {
            GrammarTask => self.grammar = Some(GrammarPaper::classic()),
            Day7GrimSuffixTask => self.grammar = Some(GrammarPaper::single_word()),
            HallwayWalk | Day7HallwayEscape => self.walk = Some(WalkController::hallway()),
            LibraryWalk | Day6WalkToLibrary => self.walk = Some(WalkController::library()),
            Night6MusicWalk => self.walk = Some(WalkController::music()),
            Night7LobbySearch => {
                let tape_x = self
                    .tape_position
                    .unwrap_or_else(|| rand::thread_rng().gen_range(10..90) as f32);
                let mut walk = WalkController::lobby(tape_x);
                if self.state.has_item(ItemKind::VhsTape) {
                    walk.set_enabled(WalkTarget::Tape, false);
                    walk.set_enabled(WalkTarget::TheaterDoor, true);
                }
                self.walk = Some(walk);
            }
            EmptyClassroomExplore => {
                self.walk = Some(WalkController::free_roam());
                self.arm(TimerTag::WalkTimeout, 10_000);
            }
            Night8LunchWalk => {
                self.walk = Some(WalkController::free_roam());
                self.arm(TimerTag::WalkTimeout, 5_000);
            }
            NightJournalEntry | Night4Journal => self.state.journal_text.clear(),
            LunchDetentionTask => {
                self.state.journal_text.clear();
                self.arm(TimerTag::BloodReveal, 6_000);
            }
            ScienceVideo => self.arm(TimerTag::VideoAccusation, 8_000),
            JumpscareSnickerdoodle => self.arm(TimerTag::JumpscareOver, 3_000),
            LibraryReveal => self.arm(TimerTag::LibraryReveal, 5_000),
            Night6MusicReveal => self.arm(TimerTag::MusicReveal, 5_000),
            Night7TheaterEnd => {
                self.sound(SoundCue::CorruptedMusic);
                self.arm(TimerTag::TheaterEnd, 10_000);
            }
            Day7GrimFailure => self.arm(TimerTag::SuffixFailure, 4_000),
            Day8HorrorReveal => self.arm(TimerTag::HorrorOver, 3_000),
            Day9InkRun => self.arm(TimerTag::InkRun, 3_000),
            Day10DunkTask => self.state.dunk_count = 0,
            Night10SurvivalQte => self.arm(TimerTag::QteFutile, 7_000),
            GameOver => self.arm(TimerTag::TheEnd, 10_000),
            _ => {}
        }
    }

    /// Full reset to the first morning.
    fn start_game(&mut self) {
        self.state = GameState::new();
        self.enter(GamePhase::IntroDialogue);
        self.say(
            script::GRIM,
            "Welcome, students. Sit down. Silence. Take out your pencils.",
        );
    }

    // ========================================================================
    // Dialogue
    // ========================================================================

    fn on_dialogue_advance(&mut self) {
        if !self.state.dialogue_visible {
            return;
        }
        self.push(Effect::StopSpeech);

        if let Some(step) = script::match_rule(self.state.phase, &self.state.line) {
            self.apply_step(*step);
        } else {
            self.on_dialogue_exhausted();
        }
    }

    fn apply_step(&mut self, step: DialogueStep) {
        if let Some(cue) = step.sound {
            self.sound(cue);
        }
        if let Some((speaker, line)) = step.say {
            self.say(speaker, line);
        }
        if step.hide_dialogue {
            self.hide_dialogue();
        }
        if let Some((tag, millis)) = step.arm {
            self.arm(tag, millis);
        }
        if let Some(goto) = step.goto {
            self.enter(goto);
        }
    }

    /// The table ran out for the current line: perform the phase's exit
    /// transition.
    fn on_dialogue_exhausted(&mut self) {
        use GamePhase::*;
        match self.state.phase {
            GradingResult => {
                if self.state.day == 1 {
                    self.enter(NightNoteRead);
                } else {
                    self.state.night_text = "Loading night sequence...".to_string();
                    self.enter(NightTransition);
                    let day = self.state.day;
                    self.push(Effect::RequestNightText { day });
                }
            }
            ScienceIntro => {
                self.state.line.clear();
                self.enter(ScienceVideo);
            }
            ScienceAccusation => self.enter(NightNoteRead),
            AfternoonSpeech => {
                self.sound(SoundCue::Jumpscare);
                self.enter(JumpscareSnickerdoodle);
            }
            BullyEncounter => self.enter(Night4Note),
            MrsGrimNoReaction => {
                self.enter(LunchConversation);
                self.say(script::STUDENT, "Yo, What if 98xx 2 came out.");
            }
            LunchConversation => self.enter(LunchDetentionTask),
            NightSurvival => {
                self.state.day += 1;
                self.enter(StartScreen);
            }
            Day6LibraryEmpty => {
                self.state.day = 6;
                self.enter(Night6Intro);
                self.say(script::STUDENT, "Why is no body here yet.");
            }
            Night6Intro => self.enter(Night6MusicWalk),
            Day7TharnettIntro => {
                self.enter(Day7PinkyMovie);
                self.say(script::PINKY, "I am going to warn you.");
            }
            Day7PinkyMovie => {
                self.enter(Day7HallwayEscape);
                self.say(script::STUDENT, "I'm coming back when Mrs. Steen is here.");
            }
            Day7HallwayEscape => self.grim_suffix_intro(),
            Day7GrimSuffixIntro => {
                self.hide_dialogue();
                self.enter(Day7GrimSuffixTask);
            }
            Day8ArtIntro => {
                // The instruction line is set but the box is dropped; the
                // paints take over the screen.
                self.state.line =
                    "Mix the colors. Paint the portrait. Don't disappoint me.".to_string();
                self.hide_dialogue();
                self.enter(Day8Painting);
            }
            Day9HallwayBully => {
                self.enter(Day9GrimClassWait);
                self.say(script::CLASSMATE, "She is 10 minutes late.");
            }
            Day9GrimClassWait => self.gym_intro(),
            Day10GymIntro => {
                self.hide_dialogue();
                self.enter(Day10DunkTask);
            }
            Day10Injury => {
                self.enter(Night10NurseIntro);
                self.say(script::STUDENT, "Yo, Nurse.");
            }
            Night10NurseIntro => {
                self.hide_dialogue();
                self.enter(Night10SurvivalQte);
            }
            Night10Transformation => self.enter(GameOver),
            _ => {}
        }
    }

    fn grim_suffix_intro(&mut self) {
        self.enter(GamePhase::Day7GrimSuffixIntro);
        self.say(
            script::GRIM,
            "We're going to take a test about what word in this is not a suffix but still changes the word sequence.",
        );
    }

    fn gym_intro(&mut self) {
        self.state.day = 10;
        self.enter(GamePhase::Day10GymIntro);
        self.say(script::MITCH, "I set up a trampoline so you can all dunk.");
    }

    // ========================================================================
    // Keys
    // ========================================================================

    fn on_key(&mut self, key: KeyInput) {
        use GamePhase::*;
        match key {
            KeyInput::Confirm => match self.state.phase {
                StartScreen => self.start_game(),
                NightNoteRead | Night4Note => self.on_note_read(),
                ScienceVideo => self.trigger_accusation(),
                _ if self.state.dialogue_visible => self.on_dialogue_advance(),
                _ => {}
            },
            KeyInput::Interact => match self.state.phase {
                Day10DunkTask => self.state.dunk_count += 1,
                // The nurse-office QTE is rigged; mashing does nothing.
                Night10SurvivalQte => {}
                _ => self.on_walk_interact(),
            },
            KeyInput::Left | KeyInput::Right | KeyInput::Up | KeyInput::Down => {
                if let Some(walk) = self.walk.as_mut() {
                    walk.apply_key(key);
                }
            }
        }
    }

    fn on_note_read(&mut self) {
        use GamePhase::*;
        match self.state.day {
            4 => self.enter(Night4Journal),
            7 => self.enter(Night7LobbySearch),
            8 => self.enter(Night8LunchWalk),
            _ => self.enter(NightJournalEntry),
        }
    }

    /// End the science video, whether the timer ran out or the player
    /// skipped it early.
    fn trigger_accusation(&mut self) {
        self.push(Effect::CancelTimer(TimerTag::VideoAccusation));
        self.enter(GamePhase::ScienceAccusation);
        self.say(script::CLASSMATE, "Mr. SnickleDoodle is weird...");
    }

    fn on_walk_interact(&mut self) {
        let Some(target) = self.walk.as_ref().and_then(|w| w.interact()) else {
            return;
        };
        use GamePhase::*;
        let outcome = match (self.state.phase, target) {
            (HallwayWalk | Day7HallwayEscape, WalkTarget::Locker) => {
                MinigameOutcome::LockerOpened
            }
            (LibraryWalk | Day6WalkToLibrary, WalkTarget::Door) => {
                MinigameOutcome::LibraryDoorOpened
            }
            (Night6MusicWalk, WalkTarget::Door) => MinigameOutcome::MusicDoorOpened,
            (Night7LobbySearch, WalkTarget::Tape) => MinigameOutcome::TapeFound,
            (Night7LobbySearch, WalkTarget::TheaterDoor) => MinigameOutcome::TheaterEntered,
            _ => return,
        };
        self.on_minigame(outcome);
    }

    // ========================================================================
    // Minigame completions
    // ========================================================================

    fn on_minigame(&mut self, outcome: MinigameOutcome) {
        use GamePhase::*;
        match (self.state.phase, outcome) {
            (GrammarTask, MinigameOutcome::GrammarSubmitted(submission)) => {
                self.state.grading = None;
                self.enter(GradingWait);
                self.say(script::GRIM, "Let me see what you have written...");
                self.push(Effect::RequestGrade(submission));
            }
            (Day7GrimSuffixTask, MinigameOutcome::SuffixSubmitted(submission)) => {
                if grammar::suffix_test_passed(&submission) {
                    self.hide_dialogue();
                    self.enter(NightNoteRead);
                } else {
                    self.sound(SoundCue::Jumpscare);
                    self.enter(Day7GrimFailure);
                }
            }
            (HallwayWalk, MinigameOutcome::LockerOpened) => {
                self.enter(BullyEncounter);
                self.say(
                    script::BULLY,
                    "Hey nerd, Your the one nerd that's a bad kid.",
                );
            }
            (Day7HallwayEscape, MinigameOutcome::LockerOpened) => self.grim_suffix_intro(),
            (LibraryWalk, MinigameOutcome::LibraryDoorOpened) => self.enter(LibraryReveal),
            (Day6WalkToLibrary, MinigameOutcome::LibraryDoorOpened) => {
                self.enter(Day6LibraryEmpty);
                self.say(script::STUDENT, "... There's nothing on the smartboard.");
            }
            (Night6MusicWalk, MinigameOutcome::MusicDoorOpened) => {
                self.enter(Night6MusicReveal)
            }
            (Night7LobbySearch, MinigameOutcome::TapeFound) => {
                if self.state.add_item(vhs_tape()) {
                    if let Some(walk) = self.walk.as_mut() {
                        walk.set_enabled(WalkTarget::Tape, false);
                        walk.set_enabled(WalkTarget::TheaterDoor, true);
                    }
                }
            }
            (Night7LobbySearch, MinigameOutcome::TheaterEntered) => {
                if self.state.has_item(ItemKind::VhsTape) {
                    self.enter(Night7TheaterEnd);
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Every handler is gated on the phase that armed the timer. The session
    /// already cancels a phase's timers on exit; the gate keeps a misbehaving
    /// driver from forcing a transition with a forged event.
    fn on_timer(&mut self, tag: TimerTag) {
        use GamePhase::*;
        match (tag, self.state.phase) {
            (TimerTag::AssignmentHandout, ClassroomLesson) => {
                self.hide_dialogue();
                self.enter(GrammarTask);
            }
            (TimerTag::VideoAccusation, ScienceVideo) => self.trigger_accusation(),
            (TimerTag::JumpscareOver, JumpscareSnickerdoodle) => {
                self.state.day = 4;
                self.enter(HallwayWalk);
            }
            (TimerTag::BloodReveal, LunchDetentionTask) => {
                self.state.show_blood = true;
                self.arm(TimerTag::NightFiveIntro, 3_000);
            }
            (TimerTag::NightFiveIntro, LunchDetentionTask) => {
                self.state.show_blood = false;
                self.state.day = 5;
                self.enter(Night5Intro);
                self.say(
                    script::STUDENT_THOUGHT,
                    "Even though I don't have detention I wanna know what's going on.",
                );
            }
            (TimerTag::WalkTimeout, EmptyClassroomExplore) => {
                self.state.day = 3;
                self.enter(PrincipalOffice);
                self.say(
                    script::STUDENT_THOUGHT,
                    "What the Heck? was on the board last night.",
                );
            }
            (TimerTag::WalkTimeout, Night8LunchWalk) => {
                self.state.day = 9;
                self.enter(Day9HallwayBully);
                self.say(script::BULLY, "Sorry for what I have done to you.");
            }
            (TimerTag::LibraryReveal, LibraryReveal) => {
                self.state.day = 6;
                self.enter(Day6SnickerdoodleIntro);
                self.say(script::STUDENT, "You're evil!");
            }
            (TimerTag::MusicReveal, Night6MusicReveal) => {
                self.state.day = 7;
                self.enter(Day7TharnettIntro);
                self.say(
                    script::THARNETT,
                    "Welcome class I will be your math teacher for 1 month because Mrs. Steen is out.",
                );
            }
            (TimerTag::TheaterEnd, Night7TheaterEnd) => {
                self.state.day = 8;
                self.enter(Day8ArtIntro);
                self.say(script::PALETTE, "Welcome to Art. I am Ms. Palette. Today we paint.");
            }
            (TimerTag::SuffixFailure, Day7GrimFailure) => self.enter(GameOver),
            (TimerTag::PaintReveal, Day8Painting) => {
                self.sound(SoundCue::Jumpscare);
                self.enter(Day8HorrorReveal);
            }
            (TimerTag::HorrorOver, Day8HorrorReveal) => self.enter(NightNoteRead),
            (TimerTag::JournalSnap, Night4Journal) => {
                self.state.day = 5;
                self.enter(MrsGrimNoReaction);
                self.say(script::GRIM, "Give me your paper.");
            }
            (TimerTag::InkRun, Day9InkRun) => self.gym_intro(),
            (TimerTag::QteFutile, Night10SurvivalQte) => self.enter(Night10InkChoice),
            (TimerTag::TheEnd, GameOver) => self.state.show_ending = true,
            _ => {}
        }
    }

    // ========================================================================
    // Journal, painting, ink
    // ========================================================================

    fn on_night_text(&mut self, text: String) {
        self.state.night_text = text;
        if self.state.phase == GamePhase::NightTransition {
            self.enter(GamePhase::NightSurvival);
        }
    }

    fn on_journal_input(&mut self, c: char) {
        match self.state.phase {
            GamePhase::NightJournalEntry => self.state.journal_text.push(c),
            GamePhase::Night4Journal => {
                // The pen writes on its own.
                self.state.journal_text.push_str("No. ");
                if self.state.journal_text.len() > 50 {
                    // Re-armed per keystroke; the page snaps shut a beat
                    // after the writing stops.
                    self.arm(TimerTag::JournalSnap, 1_000);
                }
            }
            _ => {}
        }
    }

    fn on_journal_finish(&mut self) {
        if self.state.phase != GamePhase::NightJournalEntry {
            return;
        }
        match self.state.day {
            1 => {
                self.state.day = 2;
                self.enter(GamePhase::ScienceIntro);
                self.say(
                    script::SNICKERDOODLE,
                    "Welcome to Science. Hand in your papers.",
                );
            }
            2 => self.enter(GamePhase::EmptyClassroomExplore),
            _ => {}
        }
    }

    fn on_paint_pick(&mut self, color: ArtColor) {
        if self.state.phase == GamePhase::Day8Painting
            && matches!(color, ArtColor::Red | ArtColor::Blue)
        {
            self.state.art_color = color;
        }
    }

    fn on_paint_mix(&mut self) {
        if self.state.phase == GamePhase::Day8Painting {
            self.state.art_color = ArtColor::Purple;
            self.arm(TimerTag::PaintReveal, 2_000);
        }
    }

    fn on_ink_heal(&mut self) {
        if self.state.phase == GamePhase::Night10InkChoice {
            self.enter(GamePhase::Night10Transformation);
            self.say(script::STUDENT, "Nurse your stronger than me.");
        }
    }

    // ========================================================================
    // Watchers
    // ========================================================================

    /// Reactive guards, checked after every mutation rather than at any one
    /// call site: the dunk counter forcing the injury scene, and an arrived
    /// grade releasing the grading-wait phase.
    fn run_watchers(&mut self) {
        if self.state.phase == GamePhase::Day10DunkTask && self.state.dunk_count >= 50 {
            self.enter(GamePhase::Day10Injury);
            self.say(script::MITCH, "Your hands.");
        }

        if self.state.phase == GamePhase::GradingWait {
            if let Some(report) = self.state.grading.clone() {
                self.enter(GamePhase::GradingResult);
                self.say(
                    script::GRIM,
                    format!("... {}. {}", report.grade, report.feedback),
                );
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the submission event for whichever paper is on the desk.
pub fn submission_outcome(paper: &GrammarPaper, submission: GrammarSubmission) -> MinigameOutcome {
    match paper.mode() {
        PaperMode::Classic => MinigameOutcome::GrammarSubmitted(submission),
        PaperMode::SingleWord => MinigameOutcome::SuffixSubmitted(submission),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{GradeReport, LetterGrade};

    fn started() -> Engine {
        let mut engine = Engine::new().with_tape_position(50.0);
        engine.advance(GameEvent::Key(KeyInput::Confirm));
        engine
    }

    #[test]
    fn test_start_screen_confirm_begins_day_one() {
        let engine = started();
        assert_eq!(engine.phase(), GamePhase::IntroDialogue);
        assert_eq!(engine.state().day, 1);
        assert!(engine.state().dialogue_visible);
        assert!(engine.state().line.contains("Welcome, students"));
    }

    #[test]
    fn test_unknown_events_are_noops() {
        let mut engine = started();
        let phase = engine.phase();
        let line = engine.state().line.clone();

        // None of these mean anything during the intro dialogue.
        engine.advance(GameEvent::Key(KeyInput::Interact));
        engine.advance(GameEvent::JournalFinish);
        engine.advance(GameEvent::PaintMix);
        engine.advance(GameEvent::InkHeal);
        engine.advance(GameEvent::TimerFired(TimerTag::TheEnd));
        engine.advance(GameEvent::Minigame(MinigameOutcome::TapeFound));

        assert_eq!(engine.phase(), phase);
        assert_eq!(engine.state().line, line);
    }

    #[test]
    fn test_intro_chain_reaches_grammar_task() {
        let mut engine = started();
        engine.advance(GameEvent::DialogueAdvance);
        assert_eq!(engine.phase(), GamePhase::ClassroomLesson);

        let effects = engine.advance(GameEvent::DialogueAdvance);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::StartTimer {
                tag: TimerTag::AssignmentHandout,
                ..
            }
        )));

        engine.advance(GameEvent::TimerFired(TimerTag::AssignmentHandout));
        assert_eq!(engine.phase(), GamePhase::GrammarTask);
        assert!(!engine.state().dialogue_visible);
        assert!(engine.grammar().is_some());
    }

    #[test]
    fn test_grading_watcher_releases_wait_phase() {
        let mut engine = started();
        engine.advance(GameEvent::DialogueAdvance);
        engine.advance(GameEvent::DialogueAdvance);
        engine.advance(GameEvent::TimerFired(TimerTag::AssignmentHandout));

        let submission = GrammarSubmission {
            noun: Some(1),
            article: Some(0),
            preposition: Some(2),
            single_word: None,
        };
        let effects = engine.advance(GameEvent::Minigame(MinigameOutcome::GrammarSubmitted(
            submission,
        )));
        assert_eq!(engine.phase(), GamePhase::GradingWait);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::RequestGrade(_))));

        engine.advance(GameEvent::GradeArrived(GradeReport {
            grade: LetterGrade::A,
            feedback: "Fine.".to_string(),
        }));
        assert_eq!(engine.phase(), GamePhase::GradingResult);
        assert!(engine.state().line.starts_with("... A."));
    }

    #[test]
    fn test_stale_grade_is_dropped() {
        let mut engine = started();
        engine.advance(GameEvent::GradeArrived(GradeReport {
            grade: LetterGrade::F,
            feedback: "stale".to_string(),
        }));
        assert_eq!(engine.phase(), GamePhase::IntroDialogue);
        assert!(engine.state().grading.is_none());
    }

    #[test]
    fn test_dunk_watcher_fires_exactly_once_at_fifty() {
        let mut engine = started();
        // Jump straight into the gym via the engine's own transition.
        engine.enter(GamePhase::Day10DunkTask);

        for _ in 0..49 {
            engine.advance(GameEvent::Key(KeyInput::Interact));
        }
        assert_eq!(engine.phase(), GamePhase::Day10DunkTask);
        assert_eq!(engine.state().dunk_count, 49);

        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert_eq!(engine.phase(), GamePhase::Day10Injury);
        assert_eq!(engine.state().line, "Your hands.");

        // Further presses cannot re-fire the transition.
        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert_eq!(engine.phase(), GamePhase::Day10Injury);
    }

    #[test]
    fn test_science_video_confirm_cancels_timer() {
        let mut engine = started();
        engine.enter(GamePhase::ScienceVideo);

        let effects = engine.advance(GameEvent::Key(KeyInput::Confirm));
        assert_eq!(engine.phase(), GamePhase::ScienceAccusation);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::CancelTimer(TimerTag::VideoAccusation))));
        assert_eq!(engine.state().line, "Mr. SnickleDoodle is weird...");
    }

    #[test]
    fn test_lobby_tape_then_theater() {
        let mut engine = started();
        engine.state.day = 7;
        engine.enter(GamePhase::Night7LobbySearch);

        // Door first: sealed, a no-op.
        let walk = engine.walk.as_mut().unwrap();
        walk.x = 90.0;
        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert_eq!(engine.phase(), GamePhase::Night7LobbySearch);

        // Pick up the tape.
        engine.walk.as_mut().unwrap().x = 50.0;
        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert!(engine.state().has_item(ItemKind::VhsTape));

        // A second rummage cannot duplicate it.
        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert_eq!(
            engine
                .state()
                .inventory
                .iter()
                .filter(|i| i.kind == ItemKind::VhsTape)
                .count(),
            1
        );

        // Now the theater opens.
        engine.walk.as_mut().unwrap().x = 90.0;
        let effects = engine.advance(GameEvent::Key(KeyInput::Interact));
        assert_eq!(engine.phase(), GamePhase::Night7TheaterEnd);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::PlaySound(SoundCue::CorruptedMusic))));
    }

    #[test]
    fn test_restart_resets_inventory_and_counters() {
        let mut engine = started();
        engine.state.day = 7;
        engine.enter(GamePhase::Night7LobbySearch);
        engine.walk.as_mut().unwrap().x = 50.0;
        engine.advance(GameEvent::Key(KeyInput::Interact));
        assert!(engine.state().has_item(ItemKind::VhsTape));
        engine.state.dunk_count = 12;

        engine.advance(GameEvent::Restart);
        assert_eq!(engine.phase(), GamePhase::IntroDialogue);
        assert_eq!(engine.state().day, 1);
        assert!(!engine.state().has_item(ItemKind::VhsTape));
        assert_eq!(engine.state().inventory.len(), 2);
        assert_eq!(engine.state().dunk_count, 0);
    }

    #[test]
    fn test_suffix_failure_routes_to_game_over() {
        let mut engine = started();
        engine.state.day = 7;
        engine.enter(GamePhase::Day7GrimSuffixTask);

        let wrong = GrammarSubmission {
            single_word: Some(0),
            ..Default::default()
        };
        let effects =
            engine.advance(GameEvent::Minigame(MinigameOutcome::SuffixSubmitted(wrong)));
        assert_eq!(engine.phase(), GamePhase::Day7GrimFailure);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::PlaySound(SoundCue::Jumpscare))));

        engine.advance(GameEvent::TimerFired(TimerTag::SuffixFailure));
        assert_eq!(engine.phase(), GamePhase::GameOver);

        engine.advance(GameEvent::TimerFired(TimerTag::TheEnd));
        assert!(engine.state().show_ending);
    }

    #[test]
    fn test_suffix_success_routes_to_note() {
        let mut engine = started();
        engine.state.day = 7;
        engine.enter(GamePhase::Day7GrimSuffixTask);

        let right = GrammarSubmission {
            single_word: Some(11),
            ..Default::default()
        };
        engine.advance(GameEvent::Minigame(MinigameOutcome::SuffixSubmitted(right)));
        assert_eq!(engine.phase(), GamePhase::NightNoteRead);
    }

    #[test]
    fn test_journal_day4_autotype_and_snap() {
        let mut engine = started();
        engine.state.day = 4;
        engine.enter(GamePhase::Night4Journal);

        // Typing produces only "No. " and, past the limit, arms the snap.
        let mut armed = false;
        for _ in 0..14 {
            let effects = engine.advance(GameEvent::JournalInput('x'));
            armed |= effects.iter().any(|e| {
                matches!(
                    e,
                    Effect::StartTimer {
                        tag: TimerTag::JournalSnap,
                        ..
                    }
                )
            });
        }
        assert!(engine.state().journal_text.starts_with("No. No. "));
        assert!(armed);

        engine.advance(GameEvent::TimerFired(TimerTag::JournalSnap));
        assert_eq!(engine.phase(), GamePhase::MrsGrimNoReaction);
        assert_eq!(engine.state().day, 5);
        assert_eq!(engine.state().line, "Give me your paper.");
    }

    #[test]
    fn test_paint_mix_chain() {
        let mut engine = started();
        engine.state.day = 8;
        engine.enter(GamePhase::Day8Painting);

        engine.advance(GameEvent::PaintPick(ArtColor::Red));
        assert_eq!(engine.state().art_color, ArtColor::Red);

        let effects = engine.advance(GameEvent::PaintMix);
        assert_eq!(engine.state().art_color, ArtColor::Purple);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::StartTimer {
                tag: TimerTag::PaintReveal,
                ..
            }
        )));

        engine.advance(GameEvent::TimerFired(TimerTag::PaintReveal));
        assert_eq!(engine.phase(), GamePhase::Day8HorrorReveal);
        engine.advance(GameEvent::TimerFired(TimerTag::HorrorOver));
        assert_eq!(engine.phase(), GamePhase::NightNoteRead);
    }

    #[test]
    fn test_late_grading_routes_through_generated_night() {
        let mut engine = started();
        engine.state.day = 2;
        engine.enter(GamePhase::GradingResult);
        engine.state.dialogue_visible = true;
        engine.state.line = "... F. Pathetic.".to_string();

        let effects = engine.advance(GameEvent::DialogueAdvance);
        assert_eq!(engine.phase(), GamePhase::NightTransition);
        assert_eq!(engine.state().night_text, "Loading night sequence...");
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::RequestNightText { day: 2 })));

        engine.advance(GameEvent::NightTextArrived(
            "Something scratches at the window...".to_string(),
        ));
        assert_eq!(engine.phase(), GamePhase::NightSurvival);

        // Surviving the night rolls the day and returns to the title.
        engine.advance(GameEvent::DialogueAdvance);
        assert_eq!(engine.phase(), GamePhase::StartScreen);
        assert_eq!(engine.state().day, 3);
    }

    #[test]
    fn test_timer_handlers_gated_by_phase() {
        let mut engine = started();
        // A leaked timer from a phase the game is no longer in does nothing.
        engine.advance(GameEvent::TimerFired(TimerTag::InkRun));
        engine.advance(GameEvent::TimerFired(TimerTag::JournalSnap));
        assert_eq!(engine.phase(), GamePhase::IntroDialogue);
    }
}
