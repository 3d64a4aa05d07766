//! Application state for the terminal frontend.
//!
//! The app owns the game session, a typewriter for the displayed line, and
//! the plumbing that turns engine effects into something a terminal can do:
//! grading requests become spawned tasks whose replies come back through a
//! channel, sound and speech become status-line captions.

use std::time::{Duration, Instant};

use nights_core::{
    voice_profile, Effect, GameEvent, GameSession, Grader, KeyInput, SoundCue, Typewriter,
};
use tokio::sync::mpsc;

pub struct App {
    pub session: GameSession,
    pub typewriter: Typewriter,
    pub grader: Grader,
    /// Cursor over sentence tokens during the grammar tasks.
    pub token_cursor: usize,
    /// Last audio/speech caption.
    pub caption: String,
    started: Instant,
    last_tick: Instant,
    service_tx: mpsc::UnboundedSender<GameEvent>,
    service_rx: mpsc::UnboundedReceiver<GameEvent>,
}

impl App {
    pub fn new(grader: Grader) -> Self {
        let (service_tx, service_rx) = mpsc::unbounded_channel();
        Self {
            session: GameSession::new(),
            typewriter: Typewriter::new(),
            grader,
            token_cursor: 0,
            caption: String::new(),
            started: Instant::now(),
            last_tick: Instant::now(),
            service_tx,
            service_rx,
        }
    }

    /// Monotonic session clock.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Feed an event through the session and perform its effects.
    pub fn dispatch(&mut self, event: GameEvent) {
        let effects = self.session.dispatch(event, self.now());
        self.apply_effects(effects);
        self.sync_typewriter();
    }

    pub fn press(&mut self, key: KeyInput) {
        self.dispatch(GameEvent::Key(key));
    }

    /// The Enter/Space action: finish the reveal, then advance, then let the
    /// phase-gated Confirm handling have it.
    pub fn confirm(&mut self) {
        if self.session.state().dialogue_visible {
            match self.typewriter.advance() {
                nights_core::Advance::Skipped => {}
                nights_core::Advance::Next => self.dispatch(GameEvent::DialogueAdvance),
            }
        } else {
            self.press(KeyInput::Confirm);
        }
    }

    /// Submit whichever paper is on the desk.
    pub fn submit_paper(&mut self) {
        let effects = self.session.submit_paper(self.now());
        self.apply_effects(effects);
        self.sync_typewriter();
    }

    /// Advance animations, fire due timers, and drain service replies.
    pub fn tick(&mut self) {
        let dt = self.last_tick.elapsed();
        self.last_tick = Instant::now();
        self.typewriter.tick(dt);

        let effects = self.session.tick(self.now());
        self.apply_effects(effects);

        while let Ok(event) = self.service_rx.try_recv() {
            self.dispatch(event);
        }
        self.sync_typewriter();
    }

    /// Keep the typewriter aimed at whatever line the engine shows.
    fn sync_typewriter(&mut self) {
        if self.session.state().line != self.typewriter.full_text() {
            self.typewriter.set_text(self.session.state().line.clone());
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Speak { speaker, .. } => {
                    let voice = voice_profile(&speaker);
                    self.caption = format!(
                        "{speaker} speaks (pitch {:.1}, rate {:.1})",
                        voice.pitch, voice.rate
                    );
                }
                Effect::StopSpeech => {}
                Effect::PlaySound(cue) => {
                    self.caption = match cue {
                        SoundCue::Jumpscare => "*** SCREECHING ***".to_string(),
                        SoundCue::CorruptedMusic => "~ corrupted music ~".to_string(),
                    };
                }
                Effect::RequestGrade(submission) => {
                    let grader = self.grader.clone();
                    let tx = self.service_tx.clone();
                    tokio::spawn(async move {
                        let report = grader
                            .grade_paper(
                                nights_core::grammar::DAY_ONE_SENTENCE,
                                &submission,
                                nights_core::grammar::DAY_ONE_TOKENS,
                            )
                            .await;
                        let _ = tx.send(GameEvent::GradeArrived(report));
                    });
                }
                Effect::RequestNightText { day } => {
                    let grader = self.grader.clone();
                    let tx = self.service_tx.clone();
                    tokio::spawn(async move {
                        let text = grader.night_event(day).await;
                        let _ = tx.send(GameEvent::NightTextArrived(text));
                    });
                }
                // Timers never escape the session.
                Effect::StartTimer { .. } | Effect::CancelTimer(_) => {}
            }
        }
    }

    /// Move the grammar token cursor.
    pub fn move_token_cursor(&mut self, delta: isize) {
        let Some(paper) = self.session.grammar() else {
            return;
        };
        let count = paper.tokens().len();
        if count == 0 {
            return;
        }
        let current = self.token_cursor.min(count - 1) as isize;
        self.token_cursor = (current + delta).rem_euclid(count as isize) as usize;
    }

    /// Tag the token under the cursor with the active tool.
    pub fn tag_token_under_cursor(&mut self) {
        let cursor = self.token_cursor;
        if let Some(paper) = self.session.grammar_mut() {
            paper.click_token(cursor);
        }
    }
}
