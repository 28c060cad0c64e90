use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use super::{EmployeeStore, StoreError};
use crate::models::employee::EmployeeDocument;

pub const DEFAULT_DATABASE: &str = "fiber-hrms";
const EMPLOYEES: &str = "employees";

/// Handle on one MongoDB database, opened once at startup.
#[derive(Clone)]
pub struct MongoGateway {
    db: Database,
}

impl MongoGateway {
    /// Connects to `uri` and selects the database named in its path, or
    /// [`DEFAULT_DATABASE`] when the URI has none.
    ///
    /// The client itself connects lazily, so a `ping` is issued to make sure
    /// the store answers within `timeout`.
    pub async fn connect(uri: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let db_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)
            .map_err(|err| StoreError::Connection(err.to_string()))?;
        let db = client.database(&db_name);

        tokio::time::timeout(timeout, db.run_command(doc! { "ping": 1 }, None))
            .await
            .map_err(|_| no_answer_within(timeout))?
            .map_err(|err| StoreError::Connection(err.to_string()))?;

        info!("Connected to database {}", db_name);

        Ok(MongoGateway { db })
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    fn employees(&self) -> Collection<EmployeeDocument> {
        self.db.collection(EMPLOYEES)
    }
}

fn no_answer_within(timeout: Duration) -> StoreError {
    StoreError::Connection(format!("no answer within {:?}", timeout))
}

#[async_trait]
impl EmployeeStore for MongoGateway {
    async fn list(&self) -> Result<Vec<EmployeeDocument>, StoreError> {
        let cursor = self.employees().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, employee: &EmployeeDocument) -> Result<ObjectId, StoreError> {
        let result = self.employees().insert_one(employee, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Operation(format!("unexpected generated id {}", result.inserted_id)))
    }

    async fn replace_fields(&self, id: ObjectId, employee: &EmployeeDocument) -> Result<bool, StoreError> {
        let query = doc! { "_id": id };
        let update = doc! {
            "$set": {
                "name": &employee.name,
                "age": employee.age,
                "salary": employee.salary,
            }
        };

        // Only whether a document matched matters, so the previous version
        // is read back untyped.
        let previous = self
            .db
            .collection::<Document>(EMPLOYEES)
            .find_one_and_update(query, update, None)
            .await?;
        Ok(previous.is_some())
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.employees().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}
