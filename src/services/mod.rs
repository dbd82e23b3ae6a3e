// Business logic services

pub mod activity_service;
pub mod completion_client;
pub mod exercise_service;
pub mod health_stats;
pub mod metrics_service;
pub mod nutrition_service;
pub mod profile_service;
pub mod progress_service;
pub mod recommendation_service;

pub use activity_service::ActivityService;
pub use completion_client::{ChatMessage, CompletionClient, MessageRole};
pub use exercise_service::{ExerciseError, ExerciseService};
pub use health_stats::{health_stats, HealthStats};
pub use metrics_service::MetricsService;
pub use nutrition_service::{NutritionError, NutritionService};
pub use profile_service::ProfileService;
pub use progress_service::ProgressService;
pub use recommendation_service::{RecommendationError, RecommendationService};
