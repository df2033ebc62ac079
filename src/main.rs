use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use bucketboard::app::{navigation, App};
use bucketboard::models::config::{ConfigManager, StoreMode};
use bucketboard::operations::mock::MockStore;
use bucketboard::operations::s3::S3Store;
use bucketboard::operations::store::ObjectStore;
use bucketboard::operations::transfer::Transfer;
use bucketboard::operations::upload::UploadController;
use bucketboard::run_app;

#[tokio::main]
async fn main() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    init_logging(&config_manager)?;

    let tick = Duration::from_millis(config_manager.config.simulated_tick_ms);
    let store: Arc<dyn ObjectStore>;
    let transfer: Arc<dyn Transfer>;
    match config_manager.config.store.mode {
        StoreMode::Demo => {
            let mock = Arc::new(MockStore::new(tick));
            store = mock.clone();
            transfer = mock;
        }
        StoreMode::S3 => {
            let settings = &config_manager.config.store;
            let s3 = Arc::new(
                S3Store::new(
                    &settings.region,
                    settings.endpoint_url.as_deref(),
                    settings.path_style,
                )
                .await?,
            );
            store = s3.clone();
            transfer = s3;
        }
    }
    let uploads = UploadController::new(transfer);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config_manager, store, uploads);
    navigation::load_buckets(&mut app).await?;
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(config_manager: &ConfigManager) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_manager.log_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("bucketboard starting");
    Ok(())
}
