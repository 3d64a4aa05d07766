//! 100 Nights in a School - Part 1, terminal edition.
//!
//! A horror visual novel driven by the `nights-core` engine. Dialogue is
//! captioned instead of spoken and the jumpscares are typographic, but the
//! state machine underneath is the whole game.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-based interface suitable for automated
//! testing:
//!
//! ```bash
//! cargo run -p nights -- --headless
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nights_core::Grader;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // A missing key is fine: grading falls back to the local rule.
    let grader = Grader::from_env();
    if !grader.is_live() {
        eprintln!("Note: GEMINI_API_KEY not set; Mrs. Grim grades offline.");
    }

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--headless") {
        return headless::run(grader).await.map_err(|e| e.into());
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(grader)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &mut app))?;

        // Poll with a short timeout so the typewriter and the scripted
        // timers keep moving between key presses.
        if event::poll(Duration::from_millis(33))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        app.tick();
    }
}

fn print_help() {
    println!("100 Nights in a School - Part 1");
    println!();
    println!("USAGE:");
    println!("  nights [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run the line-based interface (no TUI)");
    println!();
    println!("KEYS:");
    println!("  Enter/Space      advance dialogue / confirm");
    println!("  Arrow keys       move in walking segments");
    println!("  E                interact / dunk");
    println!("  1 2 3            pick a grammar tool");
    println!("  q / Ctrl-C       quit");
    println!();
    println!("Set GEMINI_API_KEY (or a .env file) for AI grading; without it");
    println!("the papers are graded by the local rule.");
}
