pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::employee::EmployeeDocument;

pub use mongo::MongoGateway;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not connect to the document store: {0}")]
    Connection(String),
    #[error("{0}")]
    Operation(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Operation(err.to_string())
    }
}

/// Collection-level operations on employee documents.
///
/// Every handler issues exactly one of these per request.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All documents, in the store's natural order.
    async fn list(&self) -> Result<Vec<EmployeeDocument>, StoreError>;

    /// Inserts a new document and returns the identifier the store assigned.
    async fn insert(&self, employee: &EmployeeDocument) -> Result<ObjectId, StoreError>;

    /// Overwrites `name`, `salary` and `age` of the document with `id`.
    /// Returns `false` when no document matched.
    async fn replace_fields(&self, id: ObjectId, employee: &EmployeeDocument) -> Result<bool, StoreError>;

    /// Deletes the document with `id` and returns how many were removed.
    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError>;
}
