mod actions;
mod app;
mod config;
mod editor;
mod error;
mod json_text;
mod logging;
mod request;
mod state;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&config.logging)?;
    tracing::info!(endpoint = %config.endpoint.url, "starting rt-docwatch");

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}
