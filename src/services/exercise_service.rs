use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{collections, DocumentStore, StoredDocument};
use crate::models::{CreateExerciseRequest, ExerciseDocument};

#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error("Exercise not found")]
    NotFound,
    #[error("Exercise belongs to another user")]
    Forbidden,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Exercise documents in the document store, scoped per user
#[derive(Debug, Clone)]
pub struct ExerciseService {
    documents: DocumentStore,
}

impl ExerciseService {
    pub fn new(documents: DocumentStore) -> Self {
        Self { documents }
    }

    /// Exercises owned by the user, optionally narrowed to a category
    pub async fn list(&self, user_id: Uuid, category_id: Option<i32>) -> Result<Vec<Value>> {
        let mut filter = json!({ "userId": user_id });
        if let Some(category_id) = category_id {
            filter["category_id"] = json!(category_id);
        }

        let documents = self.documents.find(collections::EXERCISES, filter).await?;
        Ok(documents.into_iter().map(StoredDocument::into_json).collect())
    }

    pub async fn create(&self, user_id: Uuid, request: &CreateExerciseRequest) -> Result<Value> {
        let document = ExerciseDocument::from_request(user_id, request, Utc::now());
        let stored = self
            .documents
            .insert(collections::EXERCISES, serde_json::to_value(&document)?)
            .await?;

        Ok(stored.into_json())
    }

    /// Merge arbitrary fields into an owned exercise. The id and owner
    /// fields are stripped from the patch so they cannot be rewritten.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        mut patch: Value,
    ) -> Result<Value, ExerciseError> {
        self.owned(user_id, id).await?;

        if let Value::Object(ref mut fields) = patch {
            fields.remove("id");
            fields.remove("userId");
        }

        let updated = self
            .documents
            .merge(collections::EXERCISES, id, patch)
            .await?
            .ok_or(ExerciseError::NotFound)?;

        Ok(updated.into_json())
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ExerciseError> {
        self.owned(user_id, id).await?;
        self.documents.delete(collections::EXERCISES, id).await?;
        Ok(())
    }

    async fn owned(&self, user_id: Uuid, id: Uuid) -> Result<(), ExerciseError> {
        let document = self
            .documents
            .get(collections::EXERCISES, id)
            .await?
            .ok_or(ExerciseError::NotFound)?;

        let user_id = user_id.to_string();
        let owner = document.data.get("userId").and_then(Value::as_str);
        if owner != Some(user_id.as_str()) {
            return Err(ExerciseError::Forbidden);
        }

        Ok(())
    }
}
