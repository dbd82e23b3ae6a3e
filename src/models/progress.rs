use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Daily progress entry, one row per user per day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: Option<f64>,              // kg
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass: Option<f64>,         // kg
    pub mood: Option<String>,
    pub energy_level: Option<i32>,        // 1-10
    pub progress_notes: Option<String>,
}

/// Reporting window for progress queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Daily,
    Monthly,
    Yearly,
}

impl Timeframe {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Timeframe::Daily),
            "monthly" => Some(Timeframe::Monthly),
            "yearly" => Some(Timeframe::Yearly),
            _ => None,
        }
    }

    /// Number of days of history covered by this window
    pub fn days(self) -> i32 {
        match self {
            Timeframe::Daily => 7,
            Timeframe::Monthly => 30,
            Timeframe::Yearly => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        }
    }
}
