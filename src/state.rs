use crate::config::AppConfig;
use crate::services::mailer::Mailer;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub config: Arc<AppConfig>,
  pub mailer: Arc<Mailer>,
}
