use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ProgressEntry, Timeframe};

const PROGRESS_COLUMNS: &str =
    "id, user_id, date, weight, body_fat_percentage, muscle_mass, mood, energy_level, progress_notes";

/// Daily progress history
#[derive(Debug, Clone)]
pub struct ProgressService {
    db: PgPool,
}

impl ProgressService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Entries within the timeframe's window, newest first
    pub async fn for_timeframe(
        &self,
        user_id: Uuid,
        timeframe: Timeframe,
    ) -> Result<Vec<ProgressEntry>> {
        let entries = sqlx::query_as::<_, ProgressEntry>(&format!(
            "SELECT {PROGRESS_COLUMNS}
             FROM user_progress
             WHERE user_id = $1 AND date >= CURRENT_DATE - $2
             ORDER BY date DESC"
        ))
        .bind(user_id)
        .bind(timeframe.days())
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch progress entries")?;

        Ok(entries)
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ProgressEntry>> {
        let entries = sqlx::query_as::<_, ProgressEntry>(&format!(
            "SELECT {PROGRESS_COLUMNS}
             FROM user_progress
             WHERE user_id = $1
             ORDER BY date DESC
             LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch recent progress")?;

        Ok(entries)
    }

    /// Latest single entry
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<ProgressEntry>> {
        let entry = sqlx::query_as::<_, ProgressEntry>(&format!(
            "SELECT {PROGRESS_COLUMNS}
             FROM user_progress
             WHERE user_id = $1
             ORDER BY date DESC
             LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch latest progress")?;

        Ok(entry)
    }
}
