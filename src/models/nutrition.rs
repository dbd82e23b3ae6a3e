use serde::{Deserialize, Serialize};

use crate::models::RecommendationTip;

/// Daily caloric and macro targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNeeds {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fats: f64,    // grams
}

/// Single meal in a generated plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub calories: f64,
    pub description: String,
    pub ingredients: Vec<String>,
}

/// Full day of meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Meal>,
}

/// Generated nutrition plan returned to clients and persisted as text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub daily_needs: DailyNeeds,
    pub meal_plan: MealPlan,
    pub nutrition_tips: Vec<RecommendationTip>,
}

/// Lenient view over the profile document for meal planning
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionProfile {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub goal_weight: Option<f64>,
    pub activity_level: Option<String>,
    pub fitness_goals: Option<Vec<String>>,
    pub health_conditions: Option<Vec<String>>,
}
