use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exercise categories used by the workout tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

impl ExerciseCategory {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(ExerciseCategory::Strength),
            2 => Some(ExerciseCategory::Cardio),
            3 => Some(ExerciseCategory::Flexibility),
            4 => Some(ExerciseCategory::Balance),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Flexibility => "Flexibility",
            ExerciseCategory::Balance => "Balance",
        }
    }
}

/// Exercise creation payload from the workout form
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub category_id: i32,
    pub duration: Option<i32>,  // minutes, cardio and balance
    pub length: Option<i32>,    // meters, cardio distance
    pub time: Option<i32>,      // seconds held, flexibility
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
}

impl CreateExerciseRequest {
    /// Category-specific field requirements
    pub fn validate_category_fields(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Valid exercise data is required".to_string());
        }

        match ExerciseCategory::from_id(self.category_id) {
            Some(ExerciseCategory::Cardio) if self.duration.is_none() => {
                Err("Duration is required for cardio exercises".to_string())
            }
            Some(ExerciseCategory::Flexibility) if self.time.is_none() => {
                Err("Time is required for flexibility exercises".to_string())
            }
            Some(ExerciseCategory::Balance) if self.duration.is_none() => {
                Err("Duration is required for balance exercises".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Exercise document stored in the `exercises` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDocument {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub category_id: i32,
    pub is_ai_recommended: bool,
    pub created_at: DateTime<Utc>,
    pub duration: Option<i32>,
    pub length: Option<i32>,
    pub time: Option<i32>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
}

impl ExerciseDocument {
    pub fn from_request(user_id: Uuid, request: &CreateExerciseRequest, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name: request.name.trim().to_string(),
            category_id: request.category_id,
            is_ai_recommended: true,
            created_at: now,
            duration: request.duration,
            length: request.length,
            time: request.time,
            sets: request.sets,
            reps: request.reps,
            weight_kg: request.weight_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category_id: i32) -> CreateExerciseRequest {
        CreateExerciseRequest {
            name: "Test exercise".to_string(),
            category_id,
            duration: None,
            length: None,
            time: None,
            sets: None,
            reps: None,
            weight_kg: None,
        }
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(ExerciseCategory::from_id(1), Some(ExerciseCategory::Strength));
        assert_eq!(ExerciseCategory::from_id(2), Some(ExerciseCategory::Cardio));
        assert_eq!(ExerciseCategory::from_id(3), Some(ExerciseCategory::Flexibility));
        assert_eq!(ExerciseCategory::from_id(4), Some(ExerciseCategory::Balance));
        assert_eq!(ExerciseCategory::from_id(0), None);
        assert_eq!(ExerciseCategory::from_id(5), None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut req = request(1);
        req.name = "   ".to_string();
        assert_eq!(
            req.validate_category_fields(),
            Err("Valid exercise data is required".to_string())
        );
    }

    #[test]
    fn test_cardio_requires_duration() {
        let mut req = request(2);
        assert_eq!(
            req.validate_category_fields(),
            Err("Duration is required for cardio exercises".to_string())
        );

        req.duration = Some(30);
        assert!(req.validate_category_fields().is_ok());
    }

    #[test]
    fn test_flexibility_requires_time() {
        let mut req = request(3);
        assert_eq!(
            req.validate_category_fields(),
            Err("Time is required for flexibility exercises".to_string())
        );

        req.time = Some(45);
        assert!(req.validate_category_fields().is_ok());
    }

    #[test]
    fn test_balance_requires_duration() {
        let mut req = request(4);
        assert_eq!(
            req.validate_category_fields(),
            Err("Duration is required for balance exercises".to_string())
        );

        req.duration = Some(10);
        assert!(req.validate_category_fields().is_ok());
    }

    #[test]
    fn test_strength_needs_no_extra_fields() {
        assert!(request(1).validate_category_fields().is_ok());
    }

    #[test]
    fn test_unknown_category_passes_field_checks() {
        assert!(request(99).validate_category_fields().is_ok());
    }

    #[test]
    fn test_document_keeps_explicit_nulls_and_user_id_key() {
        let user_id = Uuid::new_v4();
        let mut req = request(2);
        req.name = "  Running  ".to_string();
        req.duration = Some(30);

        let document = ExerciseDocument::from_request(user_id, &req, Utc::now());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["userId"], serde_json::json!(user_id.to_string()));
        assert_eq!(value["name"], serde_json::json!("Running"));
        assert_eq!(value["is_ai_recommended"], serde_json::json!(true));
        assert_eq!(value["duration"], serde_json::json!(30));
        // Unused category fields are stored as explicit nulls
        assert!(value["sets"].is_null());
        assert!(value["time"].is_null());
    }
}
