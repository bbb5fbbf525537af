mod app;
mod config;
mod error;
mod logging;
mod quick_add;
mod ui;

use engine::{Engine, FileStorage};

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let engine = Engine::builder()
        .storage(FileStorage::new(&config.data_file))
        .build()?;
    tracing::info!("opened {}", config.data_file);

    let mut app = app::App::new(&config, engine)?;
    app.run()?;
    Ok(())
}
