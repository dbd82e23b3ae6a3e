pub mod documents;

pub use documents::{collections, DocumentStore, StoredDocument};
