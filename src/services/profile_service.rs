use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{collections, DocumentStore};
use crate::models::{
    filter_none, AiRecommendation, OnboardingRequest, UpdateUserDataRequest, UserProfile,
    UserProfileDocument,
};

const PROFILE_COLUMNS: &str =
    "user_id, name, weight, height, goal_weight, fitness_level, activity_level, \
     health_conditions, fitness_goals, dietary_restrictions, birth_date, profile_picture, \
     created_at, updated_at";

/// Profile persistence across the relational and document stores
#[derive(Debug, Clone)]
pub struct ProfileService {
    db: PgPool,
    documents: DocumentStore,
}

impl ProfileService {
    pub fn new(db: PgPool, documents: DocumentStore) -> Self {
        Self { db, documents }
    }

    /// Persist the onboarding wizard payload: the profile row, a zeroed
    /// metrics snapshot, today's progress entry, and the profile document.
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        request: OnboardingRequest,
    ) -> Result<UserProfile> {
        let now = Utc::now();
        let birth_date = request.birth_date(now.date_naive());
        let name = request.name.trim().to_string();
        let health_conditions = filter_none(request.health_conditions);
        let dietary_restrictions = filter_none(request.dietary_restrictions);

        let mut tx = self.db.begin().await.context("Failed to start transaction")?;

        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "INSERT INTO user_profiles (
                user_id, name, weight, height, goal_weight, activity_level,
                health_conditions, fitness_goals, dietary_restrictions, birth_date
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                weight = EXCLUDED.weight,
                height = EXCLUDED.height,
                goal_weight = EXCLUDED.goal_weight,
                activity_level = EXCLUDED.activity_level,
                health_conditions = EXCLUDED.health_conditions,
                fitness_goals = EXCLUDED.fitness_goals,
                dietary_restrictions = EXCLUDED.dietary_restrictions,
                birth_date = EXCLUDED.birth_date,
                updated_at = NOW()
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&name)
        .bind(request.weight)
        .bind(request.height)
        .bind(request.goal_weight)
        .bind(&request.activity_level)
        .bind(&health_conditions)
        .bind(&request.fitness_goals)
        .bind(&dietary_restrictions)
        .bind(birth_date)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to upsert user profile")?;

        sqlx::query(
            "INSERT INTO user_metrics
                (user_id, heart_rate, calories_burned, steps_today, water_intake, exercise_minutes)
             VALUES ($1, 0, 0, 0, 0, 0)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("Failed to insert initial metrics")?;

        sqlx::query(
            "INSERT INTO user_progress
                (user_id, date, weight, body_fat_percentage, muscle_mass, mood, energy_level)
             VALUES ($1, CURRENT_DATE, $2, 0, 0, 'neutral', 5)
             ON CONFLICT (user_id, date) DO UPDATE SET
                weight = EXCLUDED.weight,
                body_fat_percentage = EXCLUDED.body_fat_percentage,
                muscle_mass = EXCLUDED.muscle_mass,
                mood = EXCLUDED.mood,
                energy_level = EXCLUDED.energy_level",
        )
        .bind(user_id)
        .bind(request.weight)
        .execute(&mut *tx)
        .await
        .context("Failed to insert initial progress entry")?;

        tx.commit().await.context("Failed to commit onboarding data")?;

        let document = UserProfileDocument {
            name,
            weight: request.weight,
            height: request.height,
            goal_weight: request.goal_weight,
            activity_level: request.activity_level,
            fitness_goals: request.fitness_goals,
            health_conditions,
            dietary_restrictions,
            birth_date: birth_date.and_time(chrono::NaiveTime::MIN).and_utc(),
            onboarding_complete: true,
            created_at: now,
        };

        self.documents
            .upsert(
                collections::USERS,
                user_id,
                serde_json::to_value(&document).context("Failed to serialize profile document")?,
            )
            .await
            .context("Failed to write profile document")?;

        Ok(profile)
    }

    /// Profile row for a user
    pub async fn latest_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch user profile")?;

        Ok(profile)
    }

    /// Allow-listed partial update. Every update also records a
    /// profile_update recommendation row carrying the changed fields.
    pub async fn update_profile_fields(
        &self,
        user_id: Uuid,
        request: UpdateUserDataRequest,
    ) -> Result<Option<(UserProfile, AiRecommendation)>> {
        let changes =
            serde_json::to_value(&request).context("Failed to serialize update payload")?;

        let mut tx = self.db.begin().await.context("Failed to start transaction")?;

        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "UPDATE user_profiles SET
                name = COALESCE($2, name),
                weight = COALESCE($3, weight),
                height = COALESCE($4, height),
                goal_weight = COALESCE($5, goal_weight),
                profile_picture = COALESCE($6, profile_picture),
                fitness_level = COALESCE($7, fitness_level),
                health_conditions = COALESCE($8, health_conditions),
                fitness_goals = COALESCE($9, fitness_goals),
                activity_level = COALESCE($10, activity_level),
                birth_date = COALESCE($11, birth_date),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&request.name)
        .bind(request.weight)
        .bind(request.height)
        .bind(request.goal_weight)
        .bind(&request.profile_picture)
        .bind(&request.fitness_level)
        .bind(&request.health_conditions)
        .bind(&request.fitness_goals)
        .bind(&request.activity_level)
        .bind(request.birth_date)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to update user profile")?;

        let Some(profile) = profile else {
            return Ok(None);
        };

        let recommendation = sqlx::query_as::<_, AiRecommendation>(
            "INSERT INTO ai_recommendations (user_id, recommendation_type, recommendation_text, context)
             VALUES ($1, 'profile_update', 'Profile update triggered new recommendations', $2)
             RETURNING id, user_id, recommendation_type, recommendation_text, context, created_at",
        )
        .bind(user_id)
        .bind(changes)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to record profile update")?;

        tx.commit().await.context("Failed to commit profile update")?;

        Ok(Some((profile, recommendation)))
    }

    /// The raw profile document, as clients read it
    pub async fn profile_document(&self, user_id: Uuid) -> Result<Option<Value>> {
        let document = self.documents.get(collections::USERS, user_id).await?;
        Ok(document.map(|doc| doc.data))
    }

    /// Shallow-merge arbitrary fields into the profile document
    pub async fn merge_profile_document(
        &self,
        user_id: Uuid,
        patch: Value,
    ) -> Result<Option<Value>> {
        let document = self
            .documents
            .merge(collections::USERS, user_id, patch)
            .await?;
        Ok(document.map(|doc| doc.data))
    }
}
