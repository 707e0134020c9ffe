use sqlx::{Row, SqlitePool};
use std::time::{SystemTime, UNIX_EPOCH};

const BEST_SCORE_ID: &str = "best_score";

/// Durable best-score store. One row, keyed by a fixed identifier; the value
/// is kept as text and parsed on read so a corrupted store degrades to 0
/// instead of failing startup.
#[derive(Debug, Clone)]
pub struct ScoreStore {
  db: SqlitePool,
}

impl ScoreStore {
  pub fn new(db: SqlitePool) -> Self {
    Self { db }
  }

  pub async fn load_best(&self) -> u64 {
    let row = sqlx::query("SELECT value FROM best_scores WHERE id = ?")
      .bind(BEST_SCORE_ID)
      .fetch_optional(&self.db)
      .await;
    let row = match row {
      Ok(row) => row,
      Err(error) => {
        tracing::warn!(?error, "failed to read best score, starting from 0");
        return 0;
      }
    };
    let Some(row) = row else { return 0 };
    row
      .try_get::<String, _>("value")
      .ok()
      .and_then(|value| value.trim().parse::<u64>().ok())
      .unwrap_or(0)
  }

  pub async fn save_best(&self, score: u64) -> anyhow::Result<()> {
    sqlx::query(
      "INSERT INTO best_scores (id, value, updated_at) VALUES (?, ?, ?) \
       ON CONFLICT(id) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(BEST_SCORE_ID)
    .bind(score.to_string())
    .bind(current_time_millis())
    .execute(&self.db)
    .await?;
    Ok(())
  }
}

fn current_time_millis() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_millis() as i64
}
