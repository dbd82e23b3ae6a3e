use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{MetricsSnapshot, RecordMetricsRequest};

/// Health metrics snapshots
#[derive(Debug, Clone)]
pub struct MetricsService {
    db: PgPool,
}

impl MetricsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a snapshot, absent fields default to zero
    pub async fn record(
        &self,
        user_id: Uuid,
        request: RecordMetricsRequest,
    ) -> Result<MetricsSnapshot> {
        let snapshot = sqlx::query_as::<_, MetricsSnapshot>(
            "INSERT INTO user_metrics
                (user_id, heart_rate, calories_burned, steps_today, water_intake, exercise_minutes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, heart_rate, calories_burned, steps_today, water_intake,
                       exercise_minutes, recorded_at",
        )
        .bind(user_id)
        .bind(request.heart_rate.unwrap_or(0))
        .bind(request.calories_burned.unwrap_or(0))
        .bind(request.steps_today.unwrap_or(0))
        .bind(request.water_intake.unwrap_or(0))
        .bind(request.exercise_minutes.unwrap_or(0))
        .fetch_one(&self.db)
        .await
        .context("Failed to record metrics snapshot")?;

        Ok(snapshot)
    }

    /// Most recent snapshot for a user
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<MetricsSnapshot>> {
        let snapshot = sqlx::query_as::<_, MetricsSnapshot>(
            "SELECT id, user_id, heart_rate, calories_burned, steps_today, water_intake,
                    exercise_minutes, recorded_at
             FROM user_metrics
             WHERE user_id = $1
             ORDER BY recorded_at DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch latest metrics")?;

        Ok(snapshot)
    }

    /// Delete snapshots older than a day, the logout-time cleanup
    pub async fn purge_stale(&self) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM user_metrics WHERE recorded_at < NOW() - INTERVAL '24 hours'",
        )
        .execute(&self.db)
        .await
        .context("Failed to purge stale metrics")?;

        Ok(result.rows_affected())
    }
}
