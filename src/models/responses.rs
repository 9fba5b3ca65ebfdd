//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::CacheValue;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: CacheValue,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: CacheValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
///
/// Echoes the stored value back.
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub key: String,
    pub value: CacheValue,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, value: CacheValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was invalidated
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for POST /mset
#[derive(Debug, Clone, Serialize)]
pub struct MultiSetResponse {
    pub entries: HashMap<String, CacheValue>,
}

/// Response body for POST /mget
///
/// Missing keys serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct MultiGetResponse {
    pub values: HashMap<String, Option<CacheValue>>,
}

/// Response body for POST /mdel
#[derive(Debug, Clone, Serialize)]
pub struct MultiDeleteResponse {
    pub keys: Vec<String>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Strategy the cache is running on
    pub strategy: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(strategy: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            strategy: strategy.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"name": "shaun"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"key": "test_key", "value": {"name": "shaun"}}));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("deleted_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted_key"));
        assert!(json.contains("invalidated"));
    }

    #[test]
    fn test_multi_get_response_serializes_misses_as_null() {
        let resp = MultiGetResponse {
            values: HashMap::from([
                ("k1".to_string(), Some(json!("v1"))),
                ("k2".to_string(), None),
            ]),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"values": {"k1": "v1", "k2": null}}));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("memory");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("memory"));
        assert!(json.contains("timestamp"));
    }
}
