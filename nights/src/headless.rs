//! Headless game interface for programmatic use.
//!
//! A line-based REPL over the engine, designed for scripted playthroughs
//! and automated testing. Time only moves when the script says so (`wait`),
//! which makes every run reproducible. Service calls are awaited inline so
//! grading is synchronous from the script's point of view.
//!
//! Example session:
//!
//! ```text
//! > key enter        # leave the title screen
//! > advance          # next dialogue beat
//! > wait 2000        # let the handout timer fire
//! > tool noun
//! > tag 1
//! > tool article
//! > tag 0
//! > tool preposition
//! > tag 2
//! > submit
//! > state
//! ```

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use nights_core::grammar::{DAY_ONE_SENTENCE, DAY_ONE_TOKENS};
use nights_core::{
    ArtColor, Effect, GameEvent, GameSession, Grader, GrammarRole, KeyInput,
};

pub async fn run(grader: Grader) -> io::Result<()> {
    let mut session = GameSession::new();
    let mut clock = Duration::ZERO;

    println!("100 Nights in a School - Part 1 (headless)");
    println!("Type 'help' for commands.");
    print_state(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let arg = parts.next();

        let effects = match command {
            "help" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            "state" => {
                print_state(&session);
                continue;
            }
            "advance" | "a" => session.dispatch(GameEvent::DialogueAdvance, clock),
            "key" => match arg {
                Some("enter") | Some("space") => session.press(KeyInput::Confirm, clock),
                Some("left") => session.press(KeyInput::Left, clock),
                Some("right") => session.press(KeyInput::Right, clock),
                Some("up") => session.press(KeyInput::Up, clock),
                Some("down") => session.press(KeyInput::Down, clock),
                Some("e") => session.press(KeyInput::Interact, clock),
                _ => {
                    println!("usage: key enter|space|left|right|up|down|e");
                    continue;
                }
            },
            "wait" => {
                let Some(ms) = arg.and_then(|a| a.parse::<u64>().ok()) else {
                    println!("usage: wait <millis>");
                    continue;
                };
                clock += Duration::from_millis(ms);
                session.tick(clock)
            }
            "tool" => {
                let role = match arg {
                    Some("noun") => GrammarRole::Noun,
                    Some("article") => GrammarRole::Article,
                    Some("preposition") | Some("prep") => GrammarRole::Preposition,
                    _ => {
                        println!("usage: tool noun|article|preposition");
                        continue;
                    }
                };
                if let Some(paper) = session.grammar_mut() {
                    paper.select_tool(role);
                } else {
                    println!("no paper on the desk");
                }
                continue;
            }
            "tag" => {
                let Some(id) = arg.and_then(|a| a.parse::<usize>().ok()) else {
                    println!("usage: tag <token-id>");
                    continue;
                };
                if let Some(paper) = session.grammar_mut() {
                    paper.click_token(id);
                } else {
                    println!("no paper on the desk");
                }
                continue;
            }
            "submit" => session.submit_paper(clock),
            "journal" => {
                let text = arg.unwrap_or("x");
                let mut effects = Vec::new();
                for c in text.chars() {
                    effects.extend(session.dispatch(GameEvent::JournalInput(c), clock));
                }
                effects
            }
            "finish" => session.dispatch(GameEvent::JournalFinish, clock),
            "pick" => match arg {
                Some("red") => session.dispatch(GameEvent::PaintPick(ArtColor::Red), clock),
                Some("blue") => session.dispatch(GameEvent::PaintPick(ArtColor::Blue), clock),
                _ => {
                    println!("usage: pick red|blue");
                    continue;
                }
            },
            "mix" => session.dispatch(GameEvent::PaintMix, clock),
            "ink" => session.dispatch(GameEvent::InkHeal, clock),
            "restart" => session.dispatch(GameEvent::Restart, clock),
            _ => {
                println!("unknown command {command:?}; try 'help'");
                continue;
            }
        };

        resolve_effects(&mut session, &grader, effects, clock).await;
        print_state(&session);
    }

    Ok(())
}

/// Perform external effects inline. Grading and night text are awaited and
/// their replies dispatched before the next prompt appears; followup effects
/// join the back of the queue.
async fn resolve_effects(
    session: &mut GameSession,
    grader: &Grader,
    effects: Vec<Effect>,
    clock: Duration,
) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Speak { speaker, line } => println!("  {speaker}: {line}"),
            Effect::StopSpeech => {}
            Effect::PlaySound(cue) => println!("  [sound: {cue:?}]"),
            Effect::RequestGrade(submission) => {
                let report = grader
                    .grade_paper(DAY_ONE_SENTENCE, &submission, DAY_ONE_TOKENS)
                    .await;
                println!("  [graded: {}]", report.grade);
                queue.extend(session.dispatch(GameEvent::GradeArrived(report), clock));
            }
            Effect::RequestNightText { day } => {
                let text = grader.night_event(day).await;
                queue.extend(session.dispatch(GameEvent::NightTextArrived(text), clock));
            }
            Effect::StartTimer { .. } | Effect::CancelTimer(_) => {}
        }
    }
}

fn print_state(session: &GameSession) {
    let state = session.state();
    println!(
        "[day {} | {:?}] {}",
        state.day,
        session.phase(),
        if state.dialogue_visible {
            format!("{}: {}", state.speaker, state.line)
        } else {
            String::new()
        }
    );
    if let Some(walk) = session.walk() {
        let prompt = walk
            .prompt()
            .map(|p| format!("  ({})", p.text))
            .unwrap_or_default();
        println!("  position x={:.1}{prompt}", walk.x);
    }
    if let Some(paper) = session.grammar() {
        println!("  paper: {:?} {:?}", paper.mode(), paper.submission());
    }
}

fn print_help() {
    println!("commands:");
    println!("  advance | a            next dialogue beat");
    println!("  key enter|left|right|up|down|e");
    println!("  wait <millis>          move the clock, fire due timers");
    println!("  tool noun|article|preposition");
    println!("  tag <token-id>         tag a sentence token");
    println!("  submit                 submit the paper");
    println!("  journal <text>         type into the journal");
    println!("  finish                 the journal FINISH action");
    println!("  pick red|blue / mix    the art room");
    println!("  ink                    use the ink");
    println!("  restart / state / quit");
}
