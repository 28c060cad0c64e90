use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{EmployeeStore, StoreError};
use crate::models::employee::EmployeeDocument;

/// Vec-backed store used by the handler tests.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<EmployeeDocument>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// Number of store operations issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<EmployeeDocument> {
        self.documents.lock().unwrap().clone()
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list(&self) -> Result<Vec<EmployeeDocument>, StoreError> {
        self.record();
        Ok(self.snapshot())
    }

    async fn insert(&self, employee: &EmployeeDocument) -> Result<ObjectId, StoreError> {
        self.record();
        let id = ObjectId::new();
        let mut stored = employee.clone();
        stored.id = Some(id);
        self.documents.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn replace_fields(&self, id: ObjectId, employee: &EmployeeDocument) -> Result<bool, StoreError> {
        self.record();
        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|doc| doc.id == Some(id)) {
            Some(doc) => {
                doc.name = employee.name.clone();
                doc.salary = employee.salary;
                doc.age = employee.age;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError> {
        self.record();
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|doc| doc.id != Some(id));
        Ok((before - documents.len()) as u64)
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn list(&self) -> Result<Vec<EmployeeDocument>, StoreError> {
        Err(StoreError::Operation("connection reset".to_string()))
    }

    async fn insert(&self, _employee: &EmployeeDocument) -> Result<ObjectId, StoreError> {
        Err(StoreError::Operation("connection reset".to_string()))
    }

    async fn replace_fields(&self, _id: ObjectId, _employee: &EmployeeDocument) -> Result<bool, StoreError> {
        Err(StoreError::Operation("connection reset".to_string()))
    }

    async fn delete(&self, _id: ObjectId) -> Result<u64, StoreError> {
        Err(StoreError::Operation("connection reset".to_string()))
    }
}
