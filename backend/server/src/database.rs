//! # Redis
//!
//! Document database for users, clients, cases and audit entries.
//!
//! ## Layout
//!
//! - `lawdesk:<collection>`: hash, document id to JSON body
//! - `lawdesk:<collection>:keys`: hash, unique key (username, NID, case number) to document id
//!
//! ## Insert If Absent
//!
//! One Lua script: `HSETNX` on the key index decides the winner and the
//! winner's body is written with `HSET` in the same call. Redis runs scripts
//! atomically, so a claimed key always has its body.
//!
//! Counts are `HLEN` on the body hash, listing is `HVALS`.
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::{
    AsyncCommands, Client, RedisError, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::info;

use crate::store::{Collection, DocumentStore, StoreError};

const PREFIX: &str = "lawdesk";

// KEYS: index, documents. ARGV: unique key, id, body.
static INSERT_IF_ABSENT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        if redis.call('HSETNX', KEYS[1], ARGV[1], ARGV[2]) == 0 then
            return 0
        end
        redis.call('HSET', KEYS[2], ARGV[2], ARGV[3])
        return 1
        ",
    )
});

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, StoreError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    info!("Connected to Redis");

    Ok(connection_manager)
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            connection: init_redis(redis_url).await?,
        })
    }

    fn documents(collection: Collection) -> String {
        format!("{PREFIX}:{}", collection.name())
    }

    fn keys(collection: Collection) -> String {
        format!("{PREFIX}:{}:keys", collection.name())
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn insert_if_absent(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<bool, StoreError> {
        let mut connection = self.connection.clone();

        let inserted: i32 = INSERT_IF_ABSENT
            .key(Self::keys(collection))
            .key(Self::documents(collection))
            .arg(key)
            .arg(id)
            .arg(json)
            .invoke_async(&mut connection)
            .await?;

        Ok(inserted == 1)
    }

    async fn replace(
        &self,
        collection: Collection,
        key: &str,
        id: &str,
        json: String,
    ) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        redis::pipe()
            .atomic()
            .hset(Self::documents(collection), id, json)
            .ignore()
            .hset(Self::keys(collection), key, id)
            .ignore()
            .query_async::<()>(&mut connection)
            .await?;

        Ok(())
    }

    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();

        let id: Option<String> = connection.hget(Self::keys(collection), key).await?;
        match id {
            Some(id) => Ok(connection.hget(Self::documents(collection), id).await?),
            None => Ok(None),
        }
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();

        Ok(connection.hget(Self::documents(collection), id).await?)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let mut connection = self.connection.clone();

        Ok(connection.hvals(Self::documents(collection)).await?)
    }

    async fn count(&self, collection: Collection) -> Result<usize, StoreError> {
        let mut connection = self.connection.clone();

        Ok(connection.hlen(Self::documents(collection)).await?)
    }

    async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        let _: () = connection
            .del(vec![Self::documents(collection), Self::keys(collection)])
            .await?;

        Ok(())
    }
}
