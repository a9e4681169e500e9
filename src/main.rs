// ABOUTME: Main entry point for loan-stepper with TUI and CLI support
//
// Binary: loan-stepper
// Usage: loan-stepper [COMMAND]
// - No command: launches the wizard TUI
// - steps: print the step track
// - validate: check one step's values from a JSON file
// - config: init or show the config file

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    fs::OpenOptions,
    io::{self, IsTerminal},
    path::Path,
    time::{Duration, Instant},
};

use loan_stepper::app::{App, EventHandler};
use loan_stepper::cli;
use loan_stepper::components::LayoutComponent;
use loan_stepper::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Ignoring unreadable config, using defaults: {err:#}");
            AppConfig::default()
        }
    };

    if let Err(err) = setup_logging(&config.log_dir()) {
        eprintln!("Logging disabled: {err:#}");
    }
    setup_panic_handler();

    let result = match args.command {
        Some(cli::Commands::Steps) => cli::steps::execute(args.format),
        Some(cli::Commands::Validate(validate_args)) => cli::validate::execute(validate_args, args.format),
        Some(cli::Commands::Config(command)) => cli::settings::execute(command, args.format),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let mut app = App::new(&config);
            let mut layout = LayoutComponent::new();
            tracing::info!(application_id = %app.state.application_id, "Starting loan application wizard");
            run_tui(&mut app, &mut layout)
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    crossterm::terminal::is_raw_mode_enabled().context("Terminal not compatible")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Flush stray keypresses buffered before the wizard was drawn
    while event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = event::read();
    }

    let result = run_tui_loop(app, layout, &mut terminal);

    // Always clean up terminal using unified cleanup
    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = app.tick_rate.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
                Event::Resize(width, height) => {
                    tracing::debug!(width, height, "Terminal resized");
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            tracing::info!(
                application_id = %app.state.application_id,
                finished = app.state.finished,
                "Exiting wizard"
            );
            break;
        }
    }

    Ok(())
}

fn setup_logging(log_dir: &Path) -> Result<()> {
    use tracing_subscriber::prelude::*;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "loan-stepper-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json() // Output in JSON Lines format
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_stepper=info".into()),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
