//! iris-dashboard - terminal client for the Iris prediction service.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use iris_backend::client::ApiClient;
use iris_backend::config::DashboardArgs;
use iris_backend::dashboard::{draw_ui, handle_key_event, poll_event, App};
use iris_backend::telemetry;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = DashboardArgs::parse();
    if let Some(path) = &args.log_file {
        telemetry::init_file(path, "iris_backend=info")?;
    }

    let client = ApiClient::new(&args.api_url)?;
    let mut app = App::new(client.url());
    info!(session = %app.session.id, url = client.url(), "dashboard started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &ApiClient,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            if let Some(action) = handle_key_event(app, key) {
                // Calls block, so show the pending state first
                app.mark_pending(action);
                terminal.draw(|frame| draw_ui(frame, app))?;
                app.perform(action, client);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
