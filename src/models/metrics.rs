use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Point-in-time health metrics snapshot
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetricsSnapshot {
    pub id: i64,
    pub user_id: Uuid,
    pub heart_rate: i32,       // bpm
    pub calories_burned: i32,
    pub steps_today: i32,
    pub water_intake: i32,     // glasses
    pub exercise_minutes: i32,
    pub recorded_at: DateTime<Utc>,
}

/// Metrics payload, absent fields are recorded as zero
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordMetricsRequest {
    #[validate(range(min = 0, message = "Heart rate cannot be negative"))]
    pub heart_rate: Option<i32>,
    #[validate(range(min = 0, message = "Calories burned cannot be negative"))]
    pub calories_burned: Option<i32>,
    #[validate(range(min = 0, message = "Steps cannot be negative"))]
    pub steps_today: Option<i32>,
    #[validate(range(min = 0, message = "Water intake cannot be negative"))]
    pub water_intake: Option<i32>,
    #[validate(range(min = 0, message = "Exercise minutes cannot be negative"))]
    pub exercise_minutes: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_request_accepts_camel_case() {
        let request: RecordMetricsRequest = serde_json::from_str(
            r#"{ "heartRate": 72, "stepsToday": 9000, "waterIntake": 5 }"#,
        )
        .unwrap();

        assert_eq!(request.heart_rate, Some(72));
        assert_eq!(request.steps_today, Some(9000));
        assert_eq!(request.water_intake, Some(5));
        assert_eq!(request.calories_burned, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_metrics_request_rejects_negative_values() {
        let request: RecordMetricsRequest =
            serde_json::from_str(r#"{ "heartRate": -1 }"#).unwrap();
        assert!(request.validate().is_err());
    }
}
