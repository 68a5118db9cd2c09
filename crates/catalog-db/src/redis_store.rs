//! # Redis Catalog
//!
//! Key-value store backed by a Redis server.
//!
//! ## Key Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KEY        VALUE                                                       │
//! │  ─────────  ──────────────────────────────────────────────────────────  │
//! │  "0"        {"id":0,"name":"iPhone 8","price":649.0,...}               │
//! │  "1"        {"id":1,"name":"MacBook Pro","price":1799.0,...}           │
//! │  "index"    2      ← identifiers issued so far                          │
//! │  anything else     ← ignored, never deleted                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `next_id` is `INCR index - 1`, so the first automatic id is 0. Explicit
//! identifiers raise `index` through a Lua script, which runs atomically on
//! the server. Identifiers never exceed `MAX_PRODUCT_ID`, so the counter
//! stays exact as a Lua number.
//!
//! ## Connection
//! A single `ConnectionManager` is cloned per operation; it reconnects on
//! its own after the initial connection. A failed initial connection is
//! returned to the caller and never retried.

use async_trait::async_trait;
use catalog_core::validation::{validate_product_id, validate_product_name, MAX_PRODUCT_ID};
use catalog_core::Product;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::CatalogStore;

/// Key holding the number of identifiers issued.
pub const INDEX_KEY: &str = "index";

/// Raises the counter in KEYS[1] to at least ARGV[1]; returns the new value.
const RESERVE_ID_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]) or '0')
local wanted = tonumber(ARGV[1])
if current < wanted then
    redis.call('SET', KEYS[1], wanted)
    return wanted
end
return current
"#;

// =============================================================================
// Key Encoding
// =============================================================================

/// Key a product is stored under.
pub fn product_key(id: u64) -> String {
    id.to_string()
}

/// Identifier encoded in `key`, or `None` for keys that are not products.
pub fn parse_product_key(key: &str) -> Option<u64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Decodes a stored record, filling the identifier from its key.
pub fn decode_product(key: &str, json: &str) -> StoreResult<Product> {
    let mut product: Product =
        serde_json::from_str(json).map_err(|e| StoreError::corrupt(key, e.to_string()))?;

    if product.id.is_none() {
        product.id = parse_product_key(key);
    }
    Ok(product)
}

fn encode_product(product: &Product) -> StoreResult<String> {
    product
        .to_json()
        .map(|value| value.to_string())
        .map_err(|e| StoreError::CommandFailed(e.to_string()))
}

// =============================================================================
// Store
// =============================================================================

/// A catalog stored in Redis.
#[derive(Clone)]
pub struct RedisCatalog {
    conn: ConnectionManager,
    reserve_id: Script,
}

impl std::fmt::Debug for RedisCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCatalog").finish_non_exhaustive()
    }
}

impl RedisCatalog {
    /// Connects to the server at `url` and checks it answers.
    ///
    /// ## Errors
    /// `StoreError::ConnectionFailed` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = RedisCatalog {
            conn,
            reserve_id: Script::new(RESERVE_ID_SCRIPT),
        };
        store
            .ping()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!("Connected to Redis");
        Ok(store)
    }

    /// Identifiers of every stored product, ascending.
    async fn product_ids(&self) -> StoreResult<Vec<u64>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys("*").await?;

        let mut ids: Vec<u64> = keys.iter().filter_map(|k| parse_product_key(k)).collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[async_trait]
impl CatalogStore for RedisCatalog {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn next_id(&self) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let issued: u64 = conn.incr(INDEX_KEY, 1u64).await?;
        match issued.checked_sub(1) {
            Some(id) if id <= MAX_PRODUCT_ID => Ok(id),
            _ => Err(StoreError::IdsExhausted),
        }
    }

    async fn save(&self, mut product: Product) -> StoreResult<Product> {
        validate_product_name(&product.name)?;

        let mut conn = self.conn.clone();
        let id = match product.id {
            Some(id) => {
                validate_product_id(id)?;
                let _: u64 = self
                    .reserve_id
                    .key(INDEX_KEY)
                    .arg(id + 1)
                    .invoke_async(&mut conn)
                    .await?;
                id
            }
            None => self.next_id().await?,
        };
        product.id = Some(id);

        let json = encode_product(&product)?;
        let _: () = conn.set(product_key(id), json).await?;

        debug!(id = %id, "Saved product");
        Ok(product)
    }

    async fn find(&self, id: u64) -> StoreResult<Option<Product>> {
        let mut conn = self.conn.clone();
        let key = product_key(id);
        let raw: Option<String> = conn.get(&key).await?;

        raw.map(|json| decode_product(&key, &json)).transpose()
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(product_key(id)).await?;
        debug!(id = %id, removed, "Deleted product");
        Ok(())
    }

    async fn all(&self) -> StoreResult<Vec<Product>> {
        let ids = self.product_ids().await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| product_key(*id)).collect();
        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // A key deleted between KEYS and MGET reads back as nil.
        keys.iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|json| decode_product(key, &json)))
            .collect()
    }

    async fn remove_all(&self) -> StoreResult<()> {
        let mut keys: Vec<String> = self
            .product_ids()
            .await?
            .into_iter()
            .map(product_key)
            .collect();
        keys.push(INDEX_KEY.to_string());

        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(&keys).await?;
        debug!(count = removed, "Cleared catalog");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
