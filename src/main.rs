use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use storefront::config::AppConfig;
use storefront::services::mailer::Mailer;
use storefront::session::Session;
use storefront::state::AppState;
use storefront::{db, web};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let db_pool = match db::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  if let Err(e) = db::init_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to initialize database schema.");
    panic!("Schema initialization error: {}", e);
  }

  // Sweep expired session records at startup, then hourly.
  if let Err(e) = Session::purge_expired(&db_pool).await {
    tracing::error!(error = %e, "Failed to sweep expired sessions at startup.");
  }
  let sweep_pool = db_pool.clone();
  tokio::spawn(async move {
    let mut tick = tokio::time::interval(std::time::Duration::from_secs(3600));
    tick.tick().await; // immediate first tick already handled above
    loop {
      tick.tick().await;
      if let Err(e) = Session::purge_expired(&sweep_pool).await {
        tracing::error!(error = %e, "Periodic session sweep failed.");
      }
    }
  });

  let mailer = Arc::new(Mailer::from_config(&app_config));

  let app_state = AppState {
    db_pool,
    config: app_config.clone(),
    mailer,
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
