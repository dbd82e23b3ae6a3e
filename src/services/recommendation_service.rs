use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{collections, DocumentStore, StoredDocument};
use crate::models::{
    Activity, AiRecommendation, CoachingInsights, GroupedRecommendations, MetricsSnapshot,
    ProgressEntry, TipBatch, TipDocument, UserContext, UserProfile,
};
use crate::services::completion_client::{ChatMessage, CompletionClient};

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("User not found")]
    ProfileNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// AI-generated recommendations over both stores
#[derive(Debug, Clone)]
pub struct RecommendationService {
    db: PgPool,
    documents: DocumentStore,
    completion: CompletionClient,
}

impl RecommendationService {
    pub fn new(db: PgPool, documents: DocumentStore, completion: CompletionClient) -> Self {
        Self {
            db,
            documents,
            completion,
        }
    }

    /// Stored tips for a user, generating a fresh batch on first call.
    /// Repeat calls return the existing documents without touching the model.
    pub async fn tips(&self, user_id: Uuid) -> Result<Vec<Value>, RecommendationError> {
        let existing = self
            .documents
            .find(collections::AI_RECOMMENDATIONS, json!({ "userId": user_id }))
            .await?;
        if !existing.is_empty() {
            return Ok(existing.into_iter().map(StoredDocument::into_json).collect());
        }

        let profile = self
            .documents
            .get(collections::USERS, user_id)
            .await?
            .ok_or(RecommendationError::ProfileNotFound)?;

        let exercises: Vec<Value> = self
            .documents
            .find(collections::EXERCISES, json!({ "userId": user_id }))
            .await?
            .into_iter()
            .map(|document| document.data)
            .collect();

        let messages = [
            ChatMessage::system("You are an AI coach providing fitness recommendations."),
            ChatMessage::user(format!(
                "Generate recommendations for {} based on: {}, exercises: {}",
                user_id,
                serde_json::to_string(&profile.data).context("Failed to serialize profile")?,
                serde_json::to_string(&exercises).context("Failed to serialize exercises")?,
            )),
        ];

        let batch: TipBatch = self
            .completion
            .complete_json(&messages, "fitness_recommendation", &tip_schema())
            .await?;

        let now = Utc::now();
        let mut stored = Vec::with_capacity(batch.recommendations.len());
        for tip in batch.recommendations {
            let document = TipDocument {
                user_id,
                title: tip.title,
                description: tip.description,
                created_at: now,
            };
            let inserted = self
                .documents
                .insert(
                    collections::AI_RECOMMENDATIONS,
                    serde_json::to_value(&document).context("Failed to serialize tip")?,
                )
                .await?;
            stored.push(inserted.into_json());
        }

        Ok(stored)
    }

    /// Stored tip documents without generation
    pub async fn list_tips(&self, user_id: Uuid) -> Result<Vec<Value>> {
        let documents = self
            .documents
            .find(collections::AI_RECOMMENDATIONS, json!({ "userId": user_id }))
            .await?;

        Ok(documents.into_iter().map(StoredDocument::into_json).collect())
    }

    /// Personalized coaching insights from the relational snapshot of the
    /// user: workout, nutrition, and goal suggestions stored as rows.
    pub async fn insights(
        &self,
        user_id: Uuid,
    ) -> Result<GroupedRecommendations, RecommendationError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT user_id, name, weight, height, goal_weight, fitness_level, activity_level,
                    health_conditions, fitness_goals, dietary_restrictions, birth_date,
                    profile_picture, created_at, updated_at
             FROM user_profiles
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user profile")?
        .ok_or(RecommendationError::ProfileNotFound)?;

        let recent_metrics = sqlx::query_as::<_, MetricsSnapshot>(
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
        .context("Failed to fetch recent metrics")?;

        let recent_activities = sqlx::query_as::<_, Activity>(
            "SELECT id, user_id, activity_type, activity_description, duration, recorded_at
             FROM user_activities
             WHERE user_id = $1
             ORDER BY recorded_at DESC
             LIMIT 5",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("Failed to fetch recent activities")?;

        let latest_progress = sqlx::query_as::<_, ProgressEntry>(
            "SELECT id, user_id, date, weight, body_fat_percentage, muscle_mass, mood,
                    energy_level, progress_notes
             FROM user_progress
             WHERE user_id = $1
             ORDER BY date DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch latest progress")?;

        let user_context = UserContext {
            profile,
            recent_metrics,
            recent_activities,
            latest_progress,
        };

        let content = self
            .completion
            .complete(
                &[
                    ChatMessage::system("You are a professional fitness coach and nutritionist."),
                    ChatMessage::user(insights_prompt(&user_context)),
                ],
                Some(0.7),
            )
            .await?;

        let insights: CoachingInsights =
            serde_json::from_str(&content).context("Failed to parse coaching insights")?;

        let context_json =
            serde_json::to_value(&user_context).context("Failed to serialize user context")?;

        let mut tx = self
            .db
            .begin()
            .await
            .context("Failed to start transaction")?;
        let workout =
            insert_insight_rows(&mut tx, user_id, "workout", &insights.workout, &context_json)
                .await?;
        let nutrition = insert_insight_rows(
            &mut tx,
            user_id,
            "nutrition",
            &insights.nutrition,
            &context_json,
        )
        .await?;
        let goals =
            insert_insight_rows(&mut tx, user_id, "goals", &insights.goals, &context_json).await?;
        tx.commit().await.context("Failed to commit insights")?;

        Ok(GroupedRecommendations {
            workout,
            nutrition,
            goals,
        })
    }
}

async fn insert_insight_rows(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    recommendation_type: &str,
    texts: &[String],
    context: &Value,
) -> Result<Vec<AiRecommendation>> {
    let rows = sqlx::query_as::<_, AiRecommendation>(
        "INSERT INTO ai_recommendations (user_id, recommendation_type, recommendation_text, context)
         SELECT $1, $2, recommendation, $3
         FROM unnest($4::text[]) AS recommendation
         RETURNING id, user_id, recommendation_type, recommendation_text, context, created_at",
    )
    .bind(user_id)
    .bind(recommendation_type)
    .bind(context)
    .bind(texts)
    .fetch_all(&mut **tx)
    .await
    .context("Failed to store recommendations")?;

    Ok(rows)
}

/// JSON schema for the structured tips completion
pub fn tip_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    },
                    "required": ["title", "description"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["recommendations"],
        "additionalProperties": false
    })
}

/// Prompt for the grouped coaching insights completion
pub fn insights_prompt(context: &UserContext) -> String {
    let profile = &context.profile;

    let mut prompt = String::from(
        "As a fitness expert, provide personalized recommendations for a user with the following profile:\n\n",
    );

    prompt.push_str("Profile:\n");
    prompt.push_str(&format!("- Name: {}\n", profile.name));
    prompt.push_str(&format!("- Current Weight: {}kg\n", fmt_number(profile.weight)));
    prompt.push_str(&format!("- Goal Weight: {}kg\n", fmt_number(profile.goal_weight)));
    prompt.push_str(&format!(
        "- Fitness Level: {}\n",
        profile.fitness_level.as_deref().unwrap_or("unknown")
    ));
    prompt.push_str(&format!(
        "- Health Conditions: {}\n",
        fmt_list(profile.health_conditions.as_deref())
    ));
    prompt.push_str(&format!(
        "- Fitness Goals: {}\n",
        fmt_list(profile.fitness_goals.as_deref())
    ));
    prompt.push_str(&format!(
        "- Activity Level: {}\n",
        profile.activity_level.as_deref().unwrap_or("unknown")
    ));

    prompt.push_str("\nRecent Metrics:\n");
    match &context.recent_metrics {
        Some(metrics) => {
            prompt.push_str(&format!("- Heart Rate: {}\n", metrics.heart_rate));
            prompt.push_str(&format!("- Daily Steps: {}\n", metrics.steps_today));
            prompt.push_str(&format!("- Exercise Minutes: {}\n", metrics.exercise_minutes));
        }
        None => prompt.push_str("- No metrics recorded yet\n"),
    }

    prompt.push_str("\nLatest Progress:\n");
    match &context.latest_progress {
        Some(progress) => {
            prompt.push_str(&format!(
                "- Body Fat: {}%\n",
                fmt_number(progress.body_fat_percentage)
            ));
            prompt.push_str(&format!(
                "- Muscle Mass: {}kg\n",
                fmt_number(progress.muscle_mass)
            ));
            prompt.push_str(&format!(
                "- Energy Level: {}\n",
                progress
                    .energy_level
                    .map(|level| level.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ));
        }
        None => prompt.push_str("- No progress recorded yet\n"),
    }

    prompt.push_str(
        "\nProvide 3 specific workout recommendations, 3 nutrition tips, and 2 goal-setting suggestions.\n\
         Format the response as a JSON object with keys: workout, nutrition, goals.\n\
         Keep each recommendation under 100 characters.",
    );

    prompt
}

fn fmt_number(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn fmt_list(values: Option<&[String]>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => "None".to_string(),
    }
}
