use anyhow::{Context, Result};
use serde_json::{json, Value};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{collections, DocumentStore};
use crate::models::{activity_level_label, NutritionPlan, NutritionProfile};
use crate::services::completion_client::{ChatMessage, CompletionClient};

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("User not found")]
    ProfileNotFound,
    #[error("Please complete your profile to get a personalized nutrition plan. Missing information: {}. You can update these in your profile settings.", .missing.join(", "))]
    IncompleteProfile { missing: Vec<String> },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Meal plan generation from the profile document
#[derive(Debug, Clone)]
pub struct NutritionService {
    db: PgPool,
    documents: DocumentStore,
    completion: CompletionClient,
}

impl NutritionService {
    pub fn new(db: PgPool, documents: DocumentStore, completion: CompletionClient) -> Self {
        Self {
            db,
            documents,
            completion,
        }
    }

    /// Generate a personalized meal plan. The plan is returned to the caller
    /// and stored as a nutrition recommendation row with the profile document
    /// as context.
    pub async fn plan(&self, user_id: Uuid) -> Result<NutritionPlan, NutritionError> {
        let document = self
            .documents
            .get(collections::USERS, user_id)
            .await?
            .ok_or(NutritionError::ProfileNotFound)?;

        let profile: NutritionProfile = serde_json::from_value(document.data.clone())
            .context("Failed to read profile document")?;

        let missing = missing_profile_fields(&profile);
        if !missing.is_empty() {
            return Err(NutritionError::IncompleteProfile { missing });
        }

        let plan: NutritionPlan = self
            .completion
            .complete_json(
                &[
                    ChatMessage::system(
                        "You are a certified nutritionist and meal planning expert. \
                         Generate personalized meal plans and nutrition advice based on user data.",
                    ),
                    ChatMessage::user(nutrition_prompt(&profile)),
                ],
                "nutrition_plan",
                &plan_schema(),
            )
            .await?;

        let plan_text =
            serde_json::to_string(&plan).context("Failed to serialize nutrition plan")?;

        sqlx::query(
            "INSERT INTO ai_recommendations (user_id, recommendation_type, recommendation_text, context)
             VALUES ($1, 'nutrition', $2, $3)",
        )
        .bind(user_id)
        .bind(plan_text)
        .bind(document.data)
        .execute(&self.db)
        .await
        .context("Failed to store nutrition plan")?;

        Ok(plan)
    }
}

/// Profile fields the meal planner cannot work without
pub fn missing_profile_fields(profile: &NutritionProfile) -> Vec<String> {
    let mut missing = Vec::new();

    if profile
        .activity_level
        .as_deref()
        .map_or(true, str::is_empty)
    {
        missing.push("Activity Level".to_string());
    }

    if profile
        .fitness_goals
        .as_deref()
        .map_or(true, <[String]>::is_empty)
    {
        missing.push("Fitness Goals".to_string());
    }

    missing
}

/// Prompt for the meal plan completion. Unset measurements fall back to
/// population defaults rather than failing the request.
pub fn nutrition_prompt(profile: &NutritionProfile) -> String {
    let weight = profile.weight.unwrap_or(70.0);
    let height = profile.height.unwrap_or(170.0);
    let goal_weight = profile.goal_weight.or(profile.weight).unwrap_or(70.0);
    let activity_level = profile.activity_level.as_deref().unwrap_or("");

    let goals = match profile.fitness_goals.as_deref() {
        Some(goals) if !goals.is_empty() => goals.join(", "),
        _ => "General fitness".to_string(),
    };
    let conditions = match profile.health_conditions.as_deref() {
        Some(conditions) if !conditions.is_empty() => conditions.join(", "),
        _ => "None".to_string(),
    };

    format!(
        "Generate a personalized meal plan and nutrition tips for a user with the following profile:\n\
         - Weight: {weight} kg\n\
         - Height: {height} cm\n\
         - Goal Weight: {goal_weight} kg\n\
         - Activity Level: {}\n\
         - Fitness Goals: {goals}\n\
         - Health Conditions: {conditions}\n\n\
         Please provide:\n\
         1. Daily caloric and macro needs (based on their metrics and goals)\n\
         2. A balanced meal plan for the day that matches their caloric needs\n\
         3. Specific nutrition tips based on their goals and health conditions",
        activity_level_label(activity_level)
    )
}

/// JSON schema for the structured meal plan completion
pub fn plan_schema() -> Value {
    let meal = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "calories": { "type": "number" },
            "description": { "type": "string" },
            "ingredients": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["name", "calories", "description", "ingredients"],
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "daily_needs": {
                "type": "object",
                "properties": {
                    "calories": { "type": "number" },
                    "protein": { "type": "number" },
                    "carbs": { "type": "number" },
                    "fats": { "type": "number" }
                },
                "required": ["calories", "protein", "carbs", "fats"],
                "additionalProperties": false
            },
            "meal_plan": {
                "type": "object",
                "properties": {
                    "breakfast": meal,
                    "lunch": meal,
                    "dinner": meal,
                    "snacks": {
                        "type": "array",
                        "items": meal
                    }
                },
                "required": ["breakfast", "lunch", "dinner", "snacks"],
                "additionalProperties": false
            },
            "nutrition_tips": {
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
        "required": ["daily_needs", "meal_plan", "nutrition_tips"],
        "additionalProperties": false
    })
}
