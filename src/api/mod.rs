// API routes and handlers

pub mod activities;
pub mod auth;
pub mod dashboard;
pub mod exercises;
pub mod health;
pub mod metrics;
pub mod nutrition;
pub mod onboarding;
pub mod progress;
pub mod recommendations;
pub mod routes;
pub mod user_data;
pub mod users;

use serde::Serialize;

/// Error body returned by API handlers
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error_code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: &str, message: &str, details: serde_json::Value) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: Some(details),
        }
    }
}
