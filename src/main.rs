#[cfg(test)]
mod tests;

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod state;
pub mod ui;

use {
    config::Config,
    state::App,
    std::path::Path,
};

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Initialize logger if RUST_LOG is set
    // Write logs to stderr (isolated once the UI enters the alternate screen)
    let mut builder = if config.rust_log.is_some() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.target(env_logger::Target::Stderr).init();

    log::info!("🚀 Starting BrewFlow...");
    log::info!("📊 Dataset: {}", config.data_path);

    // The load is the only failure-prone step; anything after it is pure
    // computation over the in-memory table.
    let table = match dataset::load(Path::new(&config.data_path)) {
        Ok(table) => table,
        Err(e) => {
            log::error!("❌ Failed to load dataset: {}", e);
            return Err(e.into());
        }
    };

    if table.is_empty() {
        log::warn!("Dataset has zero rows, nothing to render");
        return Ok(());
    }

    let mut app = App::new(table);
    log::info!(
        "✅ Loaded {} rows across {} stores, {} to {}",
        app.total_rows(),
        app.store_names.len(),
        app.min_date,
        app.max_date
    );

    ui::run_ui(&mut app)?;

    log::info!("UI exited");
    Ok(())
}
