//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{Cache, DurableStrategy, InMemoryStrategy};
use crate::config::{Config, StrategyKind};
use crate::error::{CacheError, Result, StoreError};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, KeysRequest, MultiDeleteResponse,
    MultiGetResponse, MultiSetRequest, MultiSetResponse, SetRequest, SetResponse,
};
use crate::store::SledStore;
use crate::tasks::ExpirySweep;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache facade over the configured strategy
    pub cache: Cache,
    /// Strategy or store purged by the background sweep
    pub sweeper: Arc<dyn ExpirySweep>,
    /// TTL applied when a request does not carry one
    pub default_ttl: u64,
    pub strategy: StrategyKind,
}

impl AppState {
    /// Creates an AppState over a fresh in-memory strategy.
    pub fn in_memory(default_ttl: u64) -> Self {
        Self::with_memory_strategy(Arc::new(InMemoryStrategy::new()), default_ttl)
    }

    /// Creates an AppState over the given in-memory strategy.
    pub fn with_memory_strategy(strategy: Arc<InMemoryStrategy>, default_ttl: u64) -> Self {
        Self {
            cache: Cache::new(strategy.clone()),
            sweeper: strategy,
            default_ttl,
            strategy: StrategyKind::Memory,
        }
    }

    /// Creates an AppState over a durable strategy writing to `store`.
    pub fn durable(store: Arc<SledStore>, table: &str, default_ttl: u64) -> Self {
        Self {
            cache: Cache::new(Arc::new(DurableStrategy::new(store.clone(), table))),
            sweeper: store,
            default_ttl,
            strategy: StrategyKind::Durable,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the sled database when the durable strategy is selected.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StoreError> {
        match config.strategy {
            StrategyKind::Memory => Ok(Self::in_memory(config.default_ttl)),
            StrategyKind::Durable => {
                let store = Arc::new(SledStore::open(&config.db_path)?);
                Ok(Self::durable(store, &config.table, config.default_ttl))
            }
        }
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or(state.default_ttl);
    let value = state.cache.set(&req.key, ttl, req.value).await?;

    Ok(Json(SetResponse::new(req.key, value)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state.cache.get(&key).await?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Invalidates a key. Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let key = state.cache.invalidate(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /mset
pub async fn multi_set_handler(
    State(state): State<AppState>,
    Json(req): Json<MultiSetRequest>,
) -> Result<Json<MultiSetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or(state.default_ttl);
    let entries = state.cache.multi_set(ttl, req.entries).await?;

    Ok(Json(MultiSetResponse { entries }))
}

/// Handler for POST /mget
pub async fn multi_get_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<MultiGetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let values = state.cache.multi_get(&req.keys).await?;

    Ok(Json(MultiGetResponse { values }))
}

/// Handler for POST /mdel
pub async fn multi_delete_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<MultiDeleteResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let keys = state.cache.multi_invalidate(&req.keys).await?;

    Ok(Json(MultiDeleteResponse { keys }))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.strategy.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = AppState::in_memory(300);

        let req = SetRequest {
            key: "test_key".to_string(),
            value: json!({"name": "shaun"}),
            ttl: None,
        };
        let response = set_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.value, json!({"name": "shaun"}));

        let response = get_handler(State(state.clone()), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "shaun"}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::in_memory(300);

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_is_idempotent() {
        let state = AppState::in_memory(300);

        let response = delete_handler(State(state.clone()), Path("never_set".to_string()))
            .await
            .unwrap();
        assert_eq!(response.key, "never_set");
    }

    #[tokio::test]
    async fn test_multi_handlers() {
        let state = AppState::in_memory(300);

        let req = MultiSetRequest {
            entries: HashMap::from([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]),
            ttl: Some(60),
        };
        let response = multi_set_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.entries.len(), 2);
        assert_eq!(response.entries["b"], json!(2));

        let req = KeysRequest {
            keys: vec!["a".to_string(), "c".to_string()],
        };
        let response = multi_get_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.values["a"], Some(json!(1)));
        assert_eq!(response.values["c"], None);

        let req = KeysRequest {
            keys: vec!["b".to_string(), "a".to_string()],
        };
        let response = multi_delete_handler(State(state), Json(req)).await.unwrap();
        assert_eq!(response.keys, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(AppState::in_memory(300))).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.strategy, "memory");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = AppState::in_memory(300);

        let req = SetRequest {
            key: "".to_string(), // Empty key is invalid
            value: json!("value"),
            ttl: None,
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
