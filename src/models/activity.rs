use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::RecordMetricsRequest;

/// Logged activity row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub user_id: Uuid,
    pub activity_type: String,
    pub activity_description: String,
    pub duration: Option<i32>, // minutes
    pub recorded_at: DateTime<Utc>,
}

/// Activity log payload with an optional metrics snapshot
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub activity_type: String,
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub activity_description: String,
    pub duration: Option<i32>,
    #[validate(nested)]
    pub metrics: Option<RecordMetricsRequest>,
}
