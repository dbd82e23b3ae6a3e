use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Canonical activity levels and their display labels
pub const ACTIVITY_LEVELS: [(&str, &str); 5] = [
    ("sedentary", "Sedentary (little or no exercise)"),
    ("light", "Lightly active (1-3 days/week)"),
    ("moderate", "Moderately active (3-5 days/week)"),
    ("very", "Very active (6-7 days/week)"),
    ("extra", "Extra active (physical job or training)"),
];

/// Display label for an activity level, falling back to the raw value
pub fn activity_level_label(level: &str) -> &str {
    ACTIVITY_LEVELS
        .iter()
        .find(|(key, _)| *key == level)
        .map(|(_, label)| *label)
        .unwrap_or(level)
}

/// Calorie multiplier for an activity level, sedentary when unknown
pub fn activity_multiplier(level: &str) -> f64 {
    match level {
        "sedentary" => 1.2,
        "light" => 1.375,
        "moderate" => 1.55,
        "very" => 1.725,
        "extra" => 1.9,
        _ => 1.2,
    }
}

/// Drop the "None" option when it was selected alongside real options
pub fn filter_none(options: Vec<String>) -> Vec<String> {
    if options.len() > 1 && options.iter().any(|option| option == "None") {
        options.into_iter().filter(|option| option != "None").collect()
    } else {
        options
    }
}

/// User profile row in the relational store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub weight: Option<f64>,      // kg
    pub height: Option<f64>,      // cm
    pub goal_weight: Option<f64>, // kg
    pub fitness_level: Option<String>,
    pub activity_level: Option<String>,
    pub health_conditions: Option<Vec<String>>,
    pub fitness_goals: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload collected by the onboarding wizard
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 13, max = 120, message = "Please enter a valid age (13-120)"))]
    pub age: u32,
    #[validate(range(min = 30.0, max = 300.0, message = "Please enter a valid weight (30-300 kg)"))]
    pub weight: f64,
    #[validate(range(min = 100.0, max = 250.0, message = "Please enter a valid height (100-250 cm)"))]
    pub height: f64,
    pub goal_weight: f64,
    pub activity_level: String,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl OnboardingRequest {
    /// Birth date derived from the reported age
    pub fn birth_date(&self, today: NaiveDate) -> NaiveDate {
        let birth_year = today.year() - self.age as i32;
        NaiveDate::from_ymd_opt(birth_year, today.month(), today.day())
            // Feb 29 birthdays land on Feb 28 in non-leap years
            .or_else(|| NaiveDate::from_ymd_opt(birth_year, today.month(), 28))
            .unwrap_or(today)
    }
}

/// Profile document stored in the `users` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDocument {
    pub name: String,
    pub weight: f64,
    pub height: f64,
    pub goal_weight: f64,
    pub activity_level: String,
    pub fitness_goals: Vec<String>,
    pub health_conditions: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub birth_date: DateTime<Utc>,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Allow-listed partial profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDataRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl UpdateUserDataRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.goal_weight.is_none()
            && self.profile_picture.is_none()
            && self.fitness_level.is_none()
            && self.health_conditions.is_none()
            && self.fitness_goals.is_none()
            && self.activity_level.is_none()
            && self.birth_date.is_none()
    }
}
