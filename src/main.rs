use bluecarbon_locator::{config::AppConfig, server};
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    info!(analysis_url = %config.analysis_url, "analysis service proxy configured");

    let app = server::router(&config, reqwest::Client::new());

    info!("Running on {}", config.bind_addr);
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
