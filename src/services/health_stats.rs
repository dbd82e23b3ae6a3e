use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{activity_multiplier, UserProfile};

/// Derived health figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    pub bmi: Option<f64>,
    pub daily_calories: Option<i32>,
}

/// Body mass index from weight in kg and height in cm, one decimal place
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;
    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

/// Age in whole years at `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Daily calorie target: Mifflin-St Jeor estimate scaled by activity level.
/// Age defaults to 30 when the birth date is unknown.
pub fn daily_calorie_target(
    weight_kg: f64,
    height_cm: f64,
    age: Option<i32>,
    activity_level: Option<&str>,
) -> i32 {
    let age = age.unwrap_or(30);
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let multiplier = activity_level.map(activity_multiplier).unwrap_or(1.2);
    (bmr * multiplier).round() as i32
}

/// Health stats for a profile, absent when weight or height is unknown
pub fn health_stats(profile: &UserProfile, today: NaiveDate) -> HealthStats {
    match (profile.weight, profile.height) {
        (Some(weight), Some(height)) => HealthStats {
            bmi: bmi(weight, height),
            daily_calories: Some(daily_calorie_target(
                weight,
                height,
                profile.birth_date.map(|birth_date| age_on(birth_date, today)),
                profile.activity_level.as_deref(),
            )),
        },
        _ => HealthStats {
            bmi: None,
            daily_calories: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: Uuid::new_v4(),
            name: "Test".to_string(),
            weight: Some(70.0),
            height: Some(170.0),
            goal_weight: Some(68.0),
            fitness_level: None,
            activity_level: Some("sedentary".to_string()),
            health_conditions: None,
            fitness_goals: None,
            dietary_restrictions: None,
            birth_date: None,
            profile_picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bmi_rounds_to_one_decimal() {
        assert_eq!(bmi(70.0, 175.0), Some(22.9));
        assert_eq!(bmi(70.0, 170.0), Some(24.2));
        assert_eq!(bmi(0.0, 170.0), None);
        assert_eq!(bmi(70.0, 0.0), None);
    }

    #[test]
    fn test_age_counts_birthdays() {
        let birth = NaiveDate::from_ymd_opt(1994, 6, 15).unwrap();

        let before_birthday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert_eq!(age_on(birth, before_birthday), 29);

        let on_birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(age_on(birth, on_birthday), 30);

        let after_birthday = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(age_on(birth, after_birthday), 30);
    }

    #[test]
    fn test_daily_calorie_target() {
        // BMR for 70kg / 170cm / 30y is 1612.5
        assert_eq!(
            daily_calorie_target(70.0, 170.0, Some(30), Some("sedentary")),
            1935
        );
        assert_eq!(
            daily_calorie_target(70.0, 170.0, Some(30), Some("moderate")),
            2499
        );
        // Unknown age falls back to 30, unknown level to sedentary
        assert_eq!(daily_calorie_target(70.0, 170.0, None, None), 1935);
    }

    #[test]
    fn test_health_stats_for_complete_profile() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let stats = health_stats(&profile(), today);

        assert_eq!(stats.bmi, Some(24.2));
        assert_eq!(stats.daily_calories, Some(1935));
    }

    #[test]
    fn test_health_stats_uses_birth_date_when_present() {
        let mut p = profile();
        p.birth_date = NaiveDate::from_ymd_opt(1984, 1, 1);
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let stats = health_stats(&p, today);
        // BMR at age 40 is 1562.5
        assert_eq!(stats.daily_calories, Some(1875));
    }

    #[test]
    fn test_health_stats_absent_without_measurements() {
        let mut p = profile();
        p.weight = None;
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let stats = health_stats(&p, today);
        assert_eq!(stats.bmi, None);
        assert_eq!(stats.daily_calories, None);
    }
}
