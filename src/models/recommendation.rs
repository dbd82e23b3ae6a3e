use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Activity, MetricsSnapshot, ProgressEntry, UserProfile};

/// Stored AI recommendation row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiRecommendation {
    pub id: i64,
    pub user_id: Uuid,
    pub recommendation_type: String, // workout, nutrition, goals, profile_update
    pub recommendation_text: String,
    pub context: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Single titled recommendation produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTip {
    pub title: String,
    pub description: String,
}

/// Structured completion payload for the tips endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TipBatch {
    pub recommendations: Vec<RecommendationTip>,
}

/// Recommendation document stored in the `ai_recommendations` collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipDocument {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Short coaching suggestions grouped by area, as returned by the model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoachingInsights {
    pub workout: Vec<String>,
    pub nutrition: Vec<String>,
    pub goals: Vec<String>,
}

/// Snapshot of relational user data sent to the model and kept as context
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub profile: UserProfile,
    pub recent_metrics: Option<MetricsSnapshot>,
    pub recent_activities: Vec<Activity>,
    pub latest_progress: Option<ProgressEntry>,
}

/// Stored insight rows grouped the way clients consume them
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRecommendations {
    pub workout: Vec<AiRecommendation>,
    pub nutrition: Vec<AiRecommendation>,
    pub goals: Vec<AiRecommendation>,
}
