use std::sync::Arc;

use anyhow::Result;
use btc_profit_calculator::{config::Settings, routes};
use dotenv::dotenv;
use log::info;
use warp::Filter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the calculator...");

    let settings = Settings::from_env()?;
    let addr = settings.addr();
    info!("Will bind to: {} (default locale: {})", addr, settings.default_locale.code());

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let app = routes::routes(Arc::new(settings)).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(app).run(addr).await;
    Ok(())
}
