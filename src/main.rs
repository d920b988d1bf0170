mod config;
mod error;
mod image;
mod models;
mod storage;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{APP_NAME, Config};
use crate::error::CartError;
use crate::image::ImageUrlBuilder;
use crate::storage::{TomlCartStore, load_catalog};
use crate::ui::state::LoadStatus;
use crate::ui::{App, Settings, render};

/// 日志写入数据目录下的文件，终端由 TUI 独占
fn init_logging(data_dir: &Path, level: &str) -> Result<(), CartError> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(format!("{APP_NAME}.log")))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<(), CartError> {
    let config = Config::load(&config::config_path()?)?;
    let data_dir = config::data_dir()?;
    init_logging(&data_dir, &config.log_level)?;

    let cart_path = config.cart_path(&data_dir);
    let catalog_path = config.catalog_path(&data_dir);
    info!(cart = %cart_path.display(), catalog = %catalog_path.display(), "starting");

    let catalog = load_catalog(&catalog_path).unwrap_or_else(|e| {
        warn!(error = %e, "catalog unavailable");
        Vec::new()
    });

    let settings = Settings {
        currency: config.currency.clone(),
        quantity_stepper: config.quantity_stepper,
        images: ImageUrlBuilder::new(&config.images),
    };

    // 创建应用状态
    let mut app = App::new(Box::new(TomlCartStore::open(cart_path)), settings, catalog);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result.map_err(CartError::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if app.status == LoadStatus::Loading {
            app.load();
            continue;
        }

        if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
            if key.kind == crossterm::event::KeyEventKind::Press && ui::handle_key_event(app, key.code)
            {
                break;
            }
        }
    }
    Ok(())
}
