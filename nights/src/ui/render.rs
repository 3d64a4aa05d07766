//! Draw the current phase.
//!
//! Full-screen takeovers (notes, journals, jumpscares, walks) replace the
//! scene; everything else draws a backdrop plus the standard play surface:
//! day counter, dialogue box, inventory strip.

use nights_core::script::{note_heading, note_text};
use nights_core::{ArtColor, GamePhase, GrammarRole, WalkController};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::scene_theme;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let phase = app.session.phase();

    match phase {
        GamePhase::StartScreen => return render_start_screen(f, area),
        GamePhase::GameOver => return render_game_over(f, area, app),
        _ if phase.is_note() => return render_note(f, area, app),
        _ if phase.is_journal() => return render_journal(f, area, app),
        _ if phase.is_walk() && !phase.shows_hud() => return render_walk(f, area, app),
        GamePhase::JumpscareSnickerdoodle => {
            return render_takeover(f, area, "MR. SNICKERDOODLE", Color::Green)
        }
        GamePhase::LibraryReveal => return render_takeover(f, area, "BULLY", Color::Red),
        GamePhase::Night6MusicReveal => return render_takeover(f, area, "E R R O R", Color::Red),
        GamePhase::Night7TheaterEnd => {
            return render_takeover(f, area, "NO SIGNAL", Color::White)
        }
        GamePhase::Day7GrimFailure => return render_takeover(f, area, "I SEE YOU", Color::Red),
        GamePhase::Day9InkRun => return render_takeover(f, area, "RUN!!!", Color::White),
        GamePhase::Day8HorrorReveal => {
            return render_takeover(f, area, "THE PORTRAIT IS CRYING", Color::Red)
        }
        GamePhase::Night10Transformation => {
            return render_takeover(f, area, "CORRUPTED 99", Color::Red)
        }
        GamePhase::NightTransition | GamePhase::NightSurvival => {
            return render_night(f, area, app)
        }
        _ => {}
    }

    // Standard layout: day bar, scene, dialogue, inventory/status.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    render_day_bar(f, rows[0], app);
    render_scene(f, rows[1], app);
    render_dialogue(f, rows[2], app);
    render_inventory(f, rows[3], app);
}

fn centered(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    }
}

fn big_line(text: &str, color: Color) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
    )))
    .alignment(Alignment::Center)
}

fn render_start_screen(f: &mut Frame, area: Rect) {
    let zone = centered(area, 7);
    let lines = vec![
        Line::from(Span::styled(
            "100 NIGHTS",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("IN A SCHOOL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled("PART 1", Style::default().fg(Color::LightRed))),
        Line::from(""),
        Line::from(Span::styled(
            "[ ENTER CLASSROOM - press Enter ]",
            Style::default().fg(Color::White),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        zone,
    );
}

fn render_game_over(f: &mut Frame, area: Rect, app: &App) {
    let zone = centered(area, 5);
    let lines = if app.session.state().show_ending {
        vec![
            Line::from(Span::styled(
                "THE END",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[ Restart - press Enter ]",
                Style::default().fg(Color::White),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                "TO BE CONTINUED...",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "END OF PART 1",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), zone);
}

fn render_takeover(f: &mut Frame, area: Rect, text: &str, color: Color) {
    f.render_widget(big_line(text, color), centered(area, 1));
}

fn render_note(f: &mut Frame, area: Rect, app: &App) {
    let day = app.session.day();
    let zone = centered(area, 7);
    let lines = vec![
        Line::from(Span::styled(
            note_heading(day),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            note_text(day),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(press Enter)",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), zone);
}

fn render_journal(f: &mut Frame, area: Rect, app: &App) {
    let phase = app.session.phase();
    let state = app.session.state();

    let title = if phase == GamePhase::LunchDetentionTask {
        "LUNCH DETENTION - TABLE 10".to_string()
    } else {
        format!("Journal Entry - Night {}", state.day)
    };

    let mut lines = vec![Line::from(""), Line::from(state.journal_text.as_str())];
    if state.show_blood {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "...something is dripping on the page...",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "type to write - Enter to finish",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, centered(area, 12));
}

fn render_walk(f: &mut Frame, area: Rect, app: &App) {
    let Some(walk) = app.session.walk() else {
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    render_day_bar(f, rows[0], app);
    render_corridor(f, rows[1], walk);

    let mut lines = Vec::new();
    if let Some(prompt) = walk.prompt() {
        let color = if prompt.interactable {
            Color::Yellow
        } else {
            Color::Red
        };
        lines.push(Line::from(Span::styled(
            prompt.text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Arrow Keys to Move",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[2]);
}

fn render_corridor(f: &mut Frame, area: Rect, walk: &WalkController) {
    // Map the 0..100 corridor onto the available width.
    let width = area.width.max(2) as f32;
    let col = |x: f32| ((x / 100.0) * (width - 1.0)) as u16;

    let mut row = vec![' '; area.width as usize];
    for spot in walk.targets() {
        let c = col(spot.x) as usize;
        if c < row.len() {
            row[c] = match spot.target {
                nights_core::WalkTarget::Locker => '#',
                nights_core::WalkTarget::Tape => {
                    if spot.enabled {
                        'v'
                    } else {
                        ' '
                    }
                }
                _ => '|',
            };
        }
    }
    let player = col(walk.x) as usize;
    if player < row.len() {
        row[player] = '@';
    }

    let corridor: String = row.into_iter().collect();
    let zone = centered(area, 1);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            corridor,
            Style::default().fg(Color::White),
        ))),
        zone,
    );
}

fn render_night(f: &mut Frame, area: Rect, app: &App) {
    let zone = centered(area, 7);
    let lines = vec![
        Line::from(Span::styled(
            format!("NIGHT {}", app.session.day()),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.session.state().night_text.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(press Enter)",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), zone);
}

fn render_day_bar(f: &mut Frame, area: Rect, app: &App) {
    let text = format!(" Day: {} / 100 ", app.session.day());
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::White).bg(Color::Black),
        ))),
        area,
    );
}

fn render_scene(f: &mut Frame, area: Rect, app: &mut App) {
    let phase = app.session.phase();
    let theme = scene_theme(phase);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.backdrop))
        .title(Span::styled(
            theme.title,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match phase {
        _ if app.session.grammar().is_some() => render_grammar(f, inner, app),
        GamePhase::ScienceVideo => {
            let lines = vec![
                Line::from(Span::styled("( o )", Style::default().fg(Color::White))),
                Line::from(""),
                Line::from(Span::styled(
                    "PLAYING: HUMAN_ANATOMY_V1.mp4",
                    Style::default().fg(Color::Green),
                )),
                Line::from(Span::styled(
                    "[PRESS SPACE]",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                centered(inner, 4),
            );
        }
        GamePhase::Day8Painting => render_painting(f, inner, app),
        GamePhase::Day10DunkTask => {
            let lines = vec![
                Line::from(Span::styled(
                    "PRESS [E] TO DUNK",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} / 50", app.session.state().dunk_count),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                centered(inner, 2),
            );
        }
        GamePhase::Night10SurvivalQte => {
            f.render_widget(
                big_line("PRESS [E]!!!", Color::Red),
                centered(inner, 1),
            );
        }
        GamePhase::Night10InkChoice => {
            let lines = vec![
                Line::from(Span::styled(
                    "INK WILL HEAL IT",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[ USE INK - press Enter ]",
                    Style::default().fg(Color::Gray),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                centered(inner, 3),
            );
        }
        _ if phase.is_walk() => {
            if let Some(walk) = app.session.walk() {
                render_corridor(f, inner, walk);
                if let Some(prompt) = walk.prompt() {
                    f.render_widget(
                        Paragraph::new(Line::from(prompt.text)).alignment(Alignment::Center),
                        Rect {
                            y: inner.y,
                            height: 1,
                            ..inner
                        },
                    );
                }
            }
        }
        _ => {
            // Plain rooms just show the speaker, center stage.
            let speaker = app.session.state().speaker.clone();
            if !speaker.is_empty() {
                f.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        format!("[ {} ]", speaker.to_uppercase()),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    )))
                    .alignment(Alignment::Center),
                    centered(inner, 1),
                );
            }
        }
    }
}

fn render_grammar(f: &mut Frame, area: Rect, app: &App) {
    let Some(paper) = app.session.grammar() else {
        return;
    };
    let submission = paper.submission();
    let cursor = app.token_cursor.min(paper.tokens().len().saturating_sub(1));

    let mut sentence = Vec::new();
    for token in paper.tokens() {
        let mut style = Style::default().fg(Color::White);
        if submission.noun == Some(token.id) {
            style = style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
        }
        if submission.article == Some(token.id) {
            style = style.fg(Color::Green).add_modifier(Modifier::UNDERLINED);
        }
        if submission.preposition == Some(token.id) {
            style = style.fg(Color::Red).add_modifier(Modifier::UNDERLINED);
        }
        if submission.single_word == Some(token.id) {
            style = style.fg(Color::Red).add_modifier(Modifier::REVERSED);
        }
        if token.id == cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        sentence.push(Span::styled(token.text, style));
        sentence.push(Span::raw(" "));
    }

    let header = match paper.mode() {
        nights_core::PaperMode::Classic => "Grammar Test 1 - Name: Student 99",
        nights_core::PaperMode::SingleWord => "FINAL TEST - CHOOSE WISELY.",
    };
    let tool = match paper.current_tool() {
        Some(GrammarRole::Noun) => "tool: NOUN",
        Some(GrammarRole::Article) => "tool: ARTICLE",
        Some(GrammarRole::Preposition) => "tool: PREPOSITION",
        Some(GrammarRole::TargetWord) => "tool: TARGET WORD",
        None => "pick a tool: [1] noun  [2] article  [3] preposition",
    };
    let submit = if paper.ready() {
        "[Enter] SUBMIT PAPER"
    } else {
        "(submit disabled)"
    };

    let lines = vec![
        Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(sentence),
        Line::from(""),
        Line::from(Span::styled(tool, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            format!("arrows move - space tags - {submit}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_painting(f: &mut Frame, area: Rect, app: &App) {
    let color = match app.session.state().art_color {
        ArtColor::White => ("the canvas is blank", Color::White),
        ArtColor::Red => ("red on the brush", Color::Red),
        ArtColor::Blue => ("blue on the brush", Color::Blue),
        ArtColor::Purple => ("the portrait is turning purple...", Color::Magenta),
    };
    let lines = vec![
        Line::from(Span::styled(color.0, Style::default().fg(color.1))),
        Line::from(""),
        Line::from(Span::styled(
            "[r] red   [b] blue   [m] MIX PURPLE",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered(area, 3),
    );
}

fn render_dialogue(f: &mut Frame, area: Rect, app: &App) {
    let state = app.session.state();
    if !state.dialogue_visible {
        return;
    }

    let done = app.typewriter.is_complete();
    let mut text = app.typewriter.visible_text().to_string();
    if done {
        text.push_str("  \u{25bc}");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            state.speaker.to_uppercase(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_inventory(f: &mut Frame, area: Rect, app: &App) {
    let state = app.session.state();
    let items: Vec<String> = state
        .inventory
        .iter()
        .map(|i| format!("[{}]", i.kind.label()))
        .collect();
    let line = format!(" {}  {}", items.join(" "), app.caption);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            line,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
