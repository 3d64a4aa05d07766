//! Terminal event handling.
//!
//! Keys are translated per phase: the same physical key types into the
//! journal, tags a grammar token, or dunks a basketball depending on where
//! the story is. Anything unrecognized is dropped.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nights_core::{ArtColor, GameEvent, GamePhase, GrammarRole, KeyInput};

use crate::app::App;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Ctrl-C always quits.
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    let phase = app.session.phase();

    if phase.is_journal() {
        return handle_journal_key(app, key);
    }
    if app.session.grammar().is_some() {
        return handle_grammar_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => match phase {
            GamePhase::GameOver => {
                // The restart option appears with THE END.
                if app.session.state().show_ending {
                    app.dispatch(GameEvent::Restart);
                }
            }
            GamePhase::Night10InkChoice => app.dispatch(GameEvent::InkHeal),
            GamePhase::Day8Painting => app.dispatch(GameEvent::PaintMix),
            _ => app.confirm(),
        },
        KeyCode::Left => app.press(KeyInput::Left),
        KeyCode::Right => app.press(KeyInput::Right),
        KeyCode::Up => app.press(KeyInput::Up),
        KeyCode::Down => app.press(KeyInput::Down),
        KeyCode::Char('e') | KeyCode::Char('E') => app.press(KeyInput::Interact),
        KeyCode::Char('r') if phase == GamePhase::Day8Painting => {
            app.dispatch(GameEvent::PaintPick(ArtColor::Red))
        }
        KeyCode::Char('b') if phase == GamePhase::Day8Painting => {
            app.dispatch(GameEvent::PaintPick(ArtColor::Blue))
        }
        KeyCode::Char('m') if phase == GamePhase::Day8Painting => {
            app.dispatch(GameEvent::PaintMix)
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Journal phases: characters go onto the page, Enter is the FINISH action.
fn handle_journal_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => app.dispatch(GameEvent::JournalFinish),
        KeyCode::Char(c) => app.dispatch(GameEvent::JournalInput(c)),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Grammar papers: pick a tool, move the cursor, tag, submit.
fn handle_grammar_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('1') => select_tool(app, GrammarRole::Noun),
        KeyCode::Char('2') => select_tool(app, GrammarRole::Article),
        KeyCode::Char('3') => select_tool(app, GrammarRole::Preposition),
        KeyCode::Left => app.move_token_cursor(-1),
        KeyCode::Right => app.move_token_cursor(1),
        KeyCode::Char(' ') | KeyCode::Char('t') => app.tag_token_under_cursor(),
        KeyCode::Enter | KeyCode::Char('s') => app.submit_paper(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn select_tool(app: &mut App, role: GrammarRole) {
    if let Some(paper) = app.session.grammar_mut() {
        paper.select_tool(role);
    }
}
