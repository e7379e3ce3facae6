mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use config::Config;
use controller::AppController;
use model::{AppModel, CatalogClient};
use view::AppView;

// Short enough for the slide animation to look smooth
const FRAME_POLL: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== reelview starting ===");

    let client = CatalogClient::new(config.api_base.clone(), config.api_key.clone())?;
    let start = config.start_location();
    tracing::info!(route = %start.path(), "Opening initial location");

    let mut app_model = AppModel::new(start, config.image_base.clone(), config.transition());
    app_model.set_catalog(Arc::new(client));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    // Fetches land in the model as they complete; the loop just redraws
    let _initial_load = controller.load_current_view(false).await;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("reelview shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let now = Instant::now();

        // Get current state
        let (ui_state, content_state, should_quit) = {
            let model_guard = model.lock().await;

            // Release finished slides and auto-clear old errors (after 5 seconds)
            model_guard.tick(now).await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, now);
        })?;

        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Resize(width, height) => controller.handle_resize(width, height),
                _ => {}
            }
        }
    }

    Ok(())
}
