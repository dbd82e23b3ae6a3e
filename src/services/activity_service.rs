use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Activity, LogActivityRequest, MetricsSnapshot};

/// Activity log entries and their companion metrics snapshots
#[derive(Debug, Clone)]
pub struct ActivityService {
    db: PgPool,
}

impl ActivityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert the activity and, when present, its metrics snapshot atomically
    pub async fn log(
        &self,
        user_id: Uuid,
        request: &LogActivityRequest,
    ) -> Result<(Activity, Option<MetricsSnapshot>)> {
        let mut tx = self.db.begin().await.context("Failed to start transaction")?;

        let activity = sqlx::query_as::<_, Activity>(
            "INSERT INTO user_activities (user_id, activity_type, activity_description, duration)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, activity_type, activity_description, duration, recorded_at",
        )
        .bind(user_id)
        .bind(&request.activity_type)
        .bind(&request.activity_description)
        .bind(request.duration)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert activity")?;

        let snapshot = match &request.metrics {
            Some(metrics) => Some(
                sqlx::query_as::<_, MetricsSnapshot>(
                    "INSERT INTO user_metrics
                        (user_id, heart_rate, calories_burned, steps_today, water_intake, exercise_minutes)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id, user_id, heart_rate, calories_burned, steps_today, water_intake,
                               exercise_minutes, recorded_at",
                )
                .bind(user_id)
                .bind(metrics.heart_rate.unwrap_or(0))
                .bind(metrics.calories_burned.unwrap_or(0))
                .bind(metrics.steps_today.unwrap_or(0))
                .bind(metrics.water_intake.unwrap_or(0))
                .bind(metrics.exercise_minutes.unwrap_or(0))
                .fetch_one(&mut *tx)
                .await
                .context("Failed to insert activity metrics")?,
            ),
            None => None,
        };

        tx.commit().await.context("Failed to commit activity")?;

        Ok((activity, snapshot))
    }

    /// Most recent activities, newest first
    pub async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, activity_type, activity_description, duration, recorded_at
             FROM user_activities
             WHERE user_id = $1
             ORDER BY recorded_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch recent activities")?;

        Ok(activities)
    }
}
