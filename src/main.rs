use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod score_store;

use config::SimConfig;
use game::input::parse_command;
use game::session::Session;
use score_store::ScoreStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = SimConfig::from_env()?;

  let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
    let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let default_path = base.join("data").join("best_score.db");
    format!("sqlite://{}", default_path.display())
  });
  ensure_db_dir(&database_url)?;

  let db = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&database_url)
    .await?;
  sqlx::migrate!("./migrations").run(&db).await?;

  let session = Session::new(config.clone(), ScoreStore::new(db)).await;

  let mut snapshots = session.subscribe();
  tokio::spawn(async move {
    while snapshots.changed().await.is_ok() {
      let snapshot = snapshots.borrow_and_update().clone();
      match serde_json::to_string(&snapshot) {
        Ok(line) => tracing::info!(target: "snapshot", %line),
        Err(error) => tracing::warn!(?error, "failed to encode snapshot"),
      }
    }
  });

  let initial = session.snapshot().await;
  tracing::info!(
    grid_size = config.grid_size,
    edge_policy = ?config.edge_policy,
    tick_ms = config.initial_tick_ms,
    best = initial.best_score,
    "simulation ready; commands: start, pause, resume, reset, toggle, up/down/left/right (or wasd), quit"
  );

  let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await? {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
      break;
    }
    match parse_command(trimmed) {
      Some(command) => session.handle_command(command).await,
      None => tracing::warn!(input = trimmed, "unrecognized command"),
    }
  }

  Ok(())
}

fn ensure_db_dir(database_url: &str) -> anyhow::Result<()> {
  if database_url.starts_with("sqlite::memory:") {
    return Ok(());
  }
  let path = database_url
    .strip_prefix("sqlite://")
    .or_else(|| database_url.strip_prefix("sqlite:"));
  let Some(path) = path else { return Ok(()) };
  if path.is_empty() || path == ":memory:" {
    return Ok(());
  }
  let db_path = PathBuf::from(path);
  if let Some(parent) = db_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  if !db_path.exists() {
    std::fs::File::create(&db_path)?;
  }
  Ok(())
}
