//! policy-tui - build a policy's chain of models in the terminal
//!
//! Entry point: parses arguments, loads the config, sets up logging and runs
//! the wizard's event loop. The finished policy is printed as JSON.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::component::Component;
use crate::config::Config;
use crate::model::{Policy, ReferenceData};
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_init(cli.config.as_deref())?;
    let log_path = logging::init(&config, cli.log_file.as_deref())?;
    info!(log = %log_path.display(), "starting policy-tui");

    let policy = Policy::new(cli.name.unwrap_or_default());
    let mut app = App::new(policy, ReferenceData::from(&config));
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    if let Some(policy) = app.into_finished_policy() {
        println!("{}", serde_json::to_string_pretty(&policy)?);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
