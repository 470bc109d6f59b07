// src/main.rs
use actix_web::{App, HttpServer, middleware};
use anyhow::Context;
use holobrand::{AppState, config::AppConfig, handlers};
use log::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting HoloBrand service...");

    let config = AppConfig::from_env();
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set, AI text features are disabled");
    }

    let app_state = AppState::from_config(&config);

    info!("Starting HTTP server on {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| handlers::configure(cfg, &app_state))
    })
    .bind(&config.bind_address)
    .with_context(|| format!("failed to bind {}", config.bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    Ok(())
}
