use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Collection names used by the application
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
    pub const AI_RECOMMENDATIONS: &str = "ai_recommendations";
}

/// A document row as stored in the `documents` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Document data with its id folded in, the shape clients receive
    pub fn into_json(self) -> Value {
        let mut data = self.data;
        if let Value::Object(ref mut map) = data {
            map.insert("id".to_string(), Value::String(self.id.to_string()));
        }
        data
    }
}

/// Schemaless JSONB document storage backed by Postgres
#[derive(Debug, Clone)]
pub struct DocumentStore {
    db: PgPool,
}

impl DocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert a document under a generated id
    pub async fn insert(&self, collection: &str, data: Value) -> Result<StoredDocument> {
        let document = sqlx::query_as::<_, StoredDocument>(
            "INSERT INTO documents (collection, id, data)
             VALUES ($1, $2, $3)
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(Uuid::new_v4())
        .bind(data)
        .fetch_one(&self.db)
        .await
        .context("Failed to insert document")?;

        Ok(document)
    }

    /// Insert or fully replace the document at a known id
    pub async fn upsert(&self, collection: &str, id: Uuid, data: Value) -> Result<StoredDocument> {
        let document = sqlx::query_as::<_, StoredDocument>(
            "INSERT INTO documents (collection, id, data)
             VALUES ($1, $2, $3)
             ON CONFLICT (collection, id)
             DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(data)
        .fetch_one(&self.db)
        .await
        .context("Failed to upsert document")?;

        Ok(document)
    }

    /// Fetch a document by id
    pub async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>> {
        let document = sqlx::query_as::<_, StoredDocument>(
            "SELECT id, data, created_at, updated_at
             FROM documents
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("Failed to fetch document")?;

        Ok(document)
    }

    /// Shallow-merge a patch into an existing document's top-level fields
    pub async fn merge(&self, collection: &str, id: Uuid, patch: Value) -> Result<Option<StoredDocument>> {
        let document = sqlx::query_as::<_, StoredDocument>(
            "UPDATE documents
             SET data = data || $3, updated_at = NOW()
             WHERE collection = $1 AND id = $2
             RETURNING id, data, created_at, updated_at",
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .fetch_optional(&self.db)
        .await
        .context("Failed to merge document")?;

        Ok(document)
    }

    /// Delete a document, returning whether it existed
    pub async fn delete(&self, collection: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.db)
            .await
            .context("Failed to delete document")?;

        Ok(result.rows_affected() > 0)
    }

    /// Find documents whose data contains the filter object, oldest first
    pub async fn find(&self, collection: &str, filter: Value) -> Result<Vec<StoredDocument>> {
        let documents = sqlx::query_as::<_, StoredDocument>(
            "SELECT id, data, created_at, updated_at
             FROM documents
             WHERE collection = $1 AND data @> $2
             ORDER BY created_at",
        )
        .bind(collection)
        .bind(filter)
        .fetch_all(&self.db)
        .await
        .context("Failed to query documents")?;

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_json_folds_id_into_object() {
        let id = Uuid::new_v4();
        let document = StoredDocument {
            id,
            data: json!({ "name": "Push-ups", "sets": 3 }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = document.into_json();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["name"], json!("Push-ups"));
        assert_eq!(value["sets"], json!(3));
    }

    #[test]
    fn test_into_json_leaves_non_objects_alone() {
        let document = StoredDocument {
            id: Uuid::new_v4(),
            data: json!([1, 2, 3]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(document.into_json(), json!([1, 2, 3]));
    }
}
