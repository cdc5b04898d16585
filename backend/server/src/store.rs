//! # Document Store
//!
//! JSON documents grouped into collections. Every collection has one unique
//! key per document (username, NID, case number, or the id itself for the
//! audit log) and the only write guarantee is insert-if-absent on that key.
//!
//! Two backends:
//! - [`RedisStore`](crate::database::RedisStore) when `REDIS_URL` is set
//! - [`MemoryStore`] otherwise, preloaded with the demo clients
//!
//! A configured Redis that refuses the first connection is replaced by
//! [`OfflineStore`] so the demo fallbacks keep the dashboard usable.
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use records::{AuditLog, Case, Client, User};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Clients,
    Cases,
    AuditLogs,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Clients => "clients",
            Collection::Cases => "cases",
            Collection::AuditLogs => "audit_logs",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt document in {collection}: {reason}")]
    Corrupt {
        collection: &'static str,
        reason: String,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Claims `key` and writes `json` under `id`. Returns `false` without
    /// writing when another document already holds `key`.
    async fn insert_if_absent(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<bool, StoreError>;

    /// Overwrites the document `id`, indexing it under `key`.
    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<(), StoreError>;

    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError>;

    async fn count(&self, collection: Collection) -> Result<usize, StoreError>;

    async fn clear(&self, collection: Collection) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Table {
    documents: HashMap<String, String>,
    keys: HashMap<String, String>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Collection, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two demo clients, used when no database is configured.
    pub async fn with_demo_clients() -> Result<Self, StoreError> {
        let store = Self::new();

        for client in records::seed::demo_clients(Utc::now()) {
            let json = encode(Collection::Clients, &client)?;
            store
                .insert_if_absent(Collection::Clients, &client.nid, &client.id, json)
                .await?;
        }

        Ok(store)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(collection).or_default();

        if table.keys.contains_key(key) {
            return Ok(false);
        }

        table.keys.insert(key.to_string(), id.to_string());
        table.documents.insert(id.to_string(), json);

        Ok(true)
    }

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(collection).or_default();

        table.keys.insert(key.to_string(), id.to_string());
        table.documents.insert(id.to_string(), json);

        Ok(())
    }

    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables.get(&collection).and_then(|table| {
            table
                .keys
                .get(key)
                .and_then(|id| table.documents.get(id))
                .cloned()
        }))
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .get(&collection)
            .and_then(|table| table.documents.get(id))
            .cloned())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .get(&collection)
            .map(|table| table.documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .get(&collection)
            .map(|table| table.documents.len())
            .unwrap_or(0))
    }

    async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        self.tables.write().await.remove(&collection);

        Ok(())
    }
}

/// Stands in for a configured database that could not be reached at startup.
/// Every call fails, which sends login and dashboard stats down their demo paths.
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn insert_if_absent(
        &self,
        _collection: Collection,
        _key: &str,
        _id: &str,
        _json: String,
    ) -> Result<bool, StoreError> {
        Err(self.unavailable())
    }

    async fn replace(
        &self,
        _collection: Collection,
        _key: &str,
        _id: &str,
        _json: String,
    ) -> Result<(), StoreError> {
        Err(self.unavailable())
    }

    async fn find_by_key(
        &self,
        _collection: Collection,
        _key: &str,
    ) -> Result<Option<String>, StoreError> {
        Err(self.unavailable())
    }

    async fn find_by_id(
        &self,
        _collection: Collection,
        _id: &str,
    ) -> Result<Option<String>, StoreError> {
        Err(self.unavailable())
    }

    async fn list(&self, _collection: Collection) -> Result<Vec<String>, StoreError> {
        Err(self.unavailable())
    }

    async fn count(&self, _collection: Collection) -> Result<usize, StoreError> {
        Err(self.unavailable())
    }

    async fn clear(&self, _collection: Collection) -> Result<(), StoreError> {
        Err(self.unavailable())
    }
}

/// A record that lives in one collection under one unique key.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    fn unique_key(&self) -> &str;
}

impl Document for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.username
    }
}

impl Document for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.nid
    }
}

impl Document for Case {
    const COLLECTION: Collection = Collection::Cases;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.case_number
    }
}

impl Document for AuditLog {
    const COLLECTION: Collection = Collection::AuditLogs;

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.id
    }
}

fn encode<T: Serialize>(collection: Collection, document: &T) -> Result<String, StoreError> {
    serde_json::to_string(document).map_err(|e| StoreError::Corrupt {
        collection: collection.name(),
        reason: e.to_string(),
    })
}

fn decode<T: Document>(json: &str) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
        collection: T::COLLECTION.name(),
        reason: e.to_string(),
    })
}

/// Typed access to a [`DocumentStore`].
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn insert_unique<T: Document>(&self, document: &T) -> Result<bool, StoreError> {
        let json = encode(T::COLLECTION, document)?;

        self.store
            .insert_if_absent(T::COLLECTION, document.unique_key(), document.id(), json)
            .await
    }

    pub async fn save<T: Document>(&self, document: &T) -> Result<(), StoreError> {
        let json = encode(T::COLLECTION, document)?;

        self.store
            .replace(T::COLLECTION, document.unique_key(), document.id(), json)
            .await
    }

    pub async fn find<T: Document>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.store
            .find_by_key(T::COLLECTION, key)
            .await?
            .map(|json| decode(&json))
            .transpose()
    }

    pub async fn get<T: Document>(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(|json| decode(&json))
            .transpose()
    }

    pub async fn list<T: Document>(&self) -> Result<Vec<T>, StoreError> {
        self.store
            .list(T::COLLECTION)
            .await?
            .iter()
            .map(|json| decode(json))
            .collect()
    }

    pub async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        self.store.count(collection).await
    }

    pub async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        self.store.clear(collection).await
    }
}

#[cfg(test)]
mod tests {
    use records::seed::{sample_cases, sample_clients};

    use super::*;

    fn repository() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_duplicate_key() {
        let repository = repository();
        let clients = sample_clients();

        assert!(repository.insert_unique(&clients[0]).await.unwrap());

        let mut twin = clients[1].clone();
        twin.nid = clients[0].nid.clone();
        assert!(!repository.insert_unique(&twin).await.unwrap());

        assert_eq!(repository.count(Collection::Clients).await.unwrap(), 1);
        assert!(repository.get::<Client>(&twin.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_key_and_id() {
        let repository = repository();
        let clients = sample_clients();
        let cases = sample_cases(&clients);

        repository.insert_unique(&cases[0]).await.unwrap();

        let by_number: Case = repository.find(&cases[0].case_number).await.unwrap().unwrap();
        let by_id: Case = repository.get(&cases[0].id).await.unwrap().unwrap();

        assert_eq!(by_number, cases[0]);
        assert_eq!(by_id, cases[0]);
        assert!(repository.find::<Case>("XX-0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repository = repository();
        let mut client = sample_clients().remove(0);

        repository.insert_unique(&client).await.unwrap();
        client.notes = Some("updated".to_string());
        repository.save(&client).await.unwrap();

        let stored: Client = repository.find(&client.nid).await.unwrap().unwrap();
        assert_eq!(stored.notes.as_deref(), Some("updated"));
        assert_eq!(repository.count(Collection::Clients).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_only_touches_one_collection() {
        let repository = repository();
        let clients = sample_clients();
        let cases = sample_cases(&clients);

        for client in &clients {
            repository.insert_unique(client).await.unwrap();
        }
        for case in &cases {
            repository.insert_unique(case).await.unwrap();
        }

        repository.clear(Collection::Cases).await.unwrap();

        assert_eq!(repository.count(Collection::Cases).await.unwrap(), 0);
        assert_eq!(repository.list::<Client>().await.unwrap().len(), clients.len());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let repository = repository();
        let client = sample_clients().remove(0);

        let attempts = (0..16).map(|_| {
            let repository = repository.clone();
            let mut twin = client.clone();
            twin.id = uuid::Uuid::new_v4().to_string();

            tokio::spawn(async move { repository.insert_unique(&twin).await.unwrap() })
        });

        let mut winners = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            if attempt.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repository.count(Collection::Clients).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_demo_clients_preloaded() {
        let repository = Repository::new(Arc::new(MemoryStore::with_demo_clients().await.unwrap()));

        assert_eq!(repository.list::<Client>().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let repository = Repository::new(Arc::new(OfflineStore::new("connection refused")));

        assert!(matches!(
            repository.count(Collection::Clients).await,
            Err(StoreError::Unavailable(reason)) if reason == "connection refused"
        ));
        assert!(repository.find::<User>("admin").await.is_err());
        assert!(repository.insert_unique(&sample_clients()[0]).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_document() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_if_absent(Collection::Clients, "k", "id", "{not json".to_string())
            .await
            .unwrap();

        let repository = Repository::new(store);
        assert!(matches!(
            repository.list::<Client>().await,
            Err(StoreError::Corrupt { collection: "clients", .. })
        ));
    }
}
