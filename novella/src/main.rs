//! Visual novel terminal front end.
//!
//! Runs the bundled demo story in a ratatui interface. Translation into the
//! configured languages happens once at startup against a LibreTranslate
//! service; run with `--no-translation` to stay in the source language.
//!
//! # Cohesion check
//!
//! `--check-cohesion` validates the story graph and exits without starting
//! the interface, for use in build pipelines:
//!
//! ```bash
//! cargo run -p novella -- --check-cohesion
//! ```

mod events;
mod story;
mod ui;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use novella_core::{EngineConfig, StorySession, Translate};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use events::map_event;
use ui::{render, Theme};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never land inside the alternate screen;
    // redirect 2> to a file to watch them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = EngineConfig::new("Novella Engine");

    if args.iter().any(|a| a == "--check-cohesion") {
        return check_cohesion(&config).await;
    }

    let translator: Option<Box<dyn Translate>> = if args.iter().any(|a| a == "--no-translation") {
        None
    } else {
        Some(Box::new(lingua::Client::from_env()))
    };

    let (graph, texts) = story::build_demo(&config, translator).await;
    let session = match StorySession::new(config, graph, texts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to start session: {e}");
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, session).await;

    // Restore the terminal before surfacing any run loop error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    Ok(())
}

/// Validate the demo story graph and report the result. Exits nonzero on an
/// incohesive graph so pipelines can gate on it.
async fn check_cohesion(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (graph, _) = story::build_demo(config, None).await;
    match novella_core::validate(&graph, &config.start_scene) {
        Ok(()) => {
            println!("Story is cohesive.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Story cohesion check failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut session: StorySession,
) -> io::Result<()> {
    let theme = Theme::default();

    loop {
        session.tick();
        terminal.draw(|f| render(f, &session, &theme))?;

        // Execute any save/load the last event queued
        session.process_pending().await;

        // Poll with a timeout so popups expire without input
        if event::poll(Duration::from_millis(100))? {
            if let Some(input) = map_event(event::read()?) {
                session.handle_event(input);
            }
        }

        if !session.running() {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Novella Engine - multilingual visual novel in the terminal");
    println!();
    println!("USAGE:");
    println!("  novella [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --check-cohesion   Validate the story graph and exit");
    println!("  --no-translation   Skip startup translation, play in English");
    println!();
    println!("ENVIRONMENT:");
    println!("  LIBRETRANSLATE_URL      Translation service base URL");
    println!("                          (default: https://libretranslate.com)");
    println!("  LIBRETRANSLATE_API_KEY  API key sent with translation requests");
    println!();
    println!("KEYS:");
    println!("  Up/Down    Move the selection");
    println!("  Enter      Confirm / advance dialogue");
    println!("  S          Save during the story");
    println!("  Esc        Back out (quits outside About/Help)");
}
