use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{error, info};

mod app;
mod board;
mod cli;
mod config;
mod fs;
mod input;
mod logging;
mod models;
mod state;
mod ui;
mod view;

use app::App;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let mut config = match config::check_first_run() {
        Ok((config, _first_run)) => config,
        Err(e) => {
            eprintln!("Warning: {:#}; using default configuration", e);
            config::Config::default()
        }
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    if let Err(e) = logging::init(&config.log_level, &config.data_dir()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    if !cli::handle_cli(&cli, &config)? {
        return Ok(());
    }

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !app.handle_key(key) {
                        save_view_state(app);
                        info!("quit");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}

fn save_view_state(app: &App) {
    let Some(path) = &app.state_path else {
        return;
    };
    if let Err(e) = state::save_state(path, &state::extract_state(app)) {
        error!(error = %e, "failed to save view state");
    }
}
