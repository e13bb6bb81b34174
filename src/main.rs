use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use shoplist::{
    config::Config,
    controllers::RecipeClient,
    list::ItemList,
    storage::{KeyValueStore, MemoryStore, SqliteStore},
    tui::app::{AppAction, ShoppingApp},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_RATE: Duration = Duration::from_millis(100);

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if config.ephemeral {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    let store = open_store(&config).await?;
    let items = ItemList::load(store).await;
    let mut app = ShoppingApp::new(items, RecipeClient::new(&config.api_base_url));
    if let Some(meal_id) = &config.meal {
        app.open_recipe(meal_id);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut app);
    let restored = restore_terminal(&mut terminal);

    // Let pending writes reach the store before reporting any error
    let count = app.shutdown().await;
    info!(count, "Exiting");

    outcome?;
    restored?;
    Ok(())
}

/// Leave raw mode and the alternate screen, attempting both steps
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> anyhow::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    raw.context("Failed to disable raw mode")?;
    screen.context("Failed to leave alternate screen")?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut ShoppingApp,
) -> anyhow::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| app.render(f))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key.code) {
                AppAction::Continue => {}
                AppAction::Exit => return Ok(()),
            }
        }
    }
}
