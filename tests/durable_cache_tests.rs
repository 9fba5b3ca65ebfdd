//! Integration Tests for the Cache over the Durable Strategy
//!
//! Runs the facade against a sled database in a temporary directory.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use strategy_cache::cache::{Cache, Clock, DurableStrategy, ManualClock};
use strategy_cache::store::{KeyValueStore, SledStore};
use strategy_cache::tasks::ExpirySweep;
use strategy_cache::CacheError;
use tempfile::TempDir;

const TABLE: &str = "test-table";
const TTL: u64 = 1;
const START: i64 = 1_514_764_800;

struct Fixture {
    _dir: TempDir,
    store: Arc<SledStore>,
    clock: Arc<ManualClock>,
    cache: Cache,
}

fn setup() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SledStore::open(dir.path().join("cache.sled")).unwrap());
    let clock = Arc::new(ManualClock::new(START));
    let strategy = DurableStrategy::with_clock(store.clone(), TABLE, clock.clone());

    Fixture {
        _dir: dir,
        store,
        clock,
        cache: Cache::from_strategy(strategy),
    }
}

fn data() -> HashMap<String, Value> {
    HashMap::from([
        ("shaun".to_string(), json!({"name": "shaun"})),
        ("roy".to_string(), json!({"name": "roy"})),
        ("steve".to_string(), json!({"name": "steve"})),
    ])
}

#[tokio::test]
async fn test_set_returns_value_and_writes_record() {
    let fx = setup();

    let result = fx.cache.set("shaun", TTL, json!({"name": "shaun"})).await.unwrap();
    assert_eq!(result, json!({"name": "shaun"}));

    let item = fx.store.get(TABLE, "shaun").await.unwrap().unwrap();
    assert_eq!(item.key, "shaun");
    assert_eq!(item.data, json!({"name": "shaun"}));
    assert_eq!(item.ttl, START + TTL as i64);
}

#[tokio::test]
async fn test_multi_set_and_get() {
    let fx = setup();

    fx.cache.multi_set(TTL, data()).await.unwrap();

    assert_eq!(fx.cache.get("roy").await.unwrap(), json!({"name": "roy"}));
    let result = fx.cache.multi_get(&["shaun", "roy", "steve"]).await.unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.values().all(Option::is_some));
}

#[tokio::test]
async fn test_get_missing_value() {
    let fx = setup();

    assert!(matches!(fx.cache.get("shaun").await, Err(CacheError::NotFound(_))));
    assert_eq!(
        fx.cache.multi_get(&["test"]).await.unwrap(),
        HashMap::from([("test".to_string(), None)])
    );
}

#[tokio::test]
async fn test_invalidate_deletes_record() {
    let fx = setup();

    fx.cache.set("shaun", TTL, json!(1)).await.unwrap();
    assert_eq!(fx.cache.invalidate("shaun").await.unwrap(), "shaun");

    assert!(fx.store.get(TABLE, "shaun").await.unwrap().is_none());
    assert!(matches!(fx.cache.get("shaun").await, Err(CacheError::NotFound(_))));
    assert_eq!(fx.cache.invalidate("shaun").await.unwrap(), "shaun");
}

#[tokio::test]
async fn test_multi_invalidate() {
    let fx = setup();

    fx.cache.multi_set(TTL, data()).await.unwrap();
    let keys = fx.cache.multi_invalidate(&["shaun", "roy", "steve"]).await.unwrap();
    assert_eq!(keys, vec!["shaun", "roy", "steve"]);

    let result = fx.cache.multi_get(&keys).await.unwrap();
    assert!(result.values().all(Option::is_none));
}

#[tokio::test]
async fn test_get_or_set_fills_store() {
    let fx = setup();

    let result = fx
        .cache
        .get_or_set("shaun", TTL, || async { Ok(json!({"name": "shaun"})) })
        .await
        .unwrap();
    assert_eq!(result, json!({"name": "shaun"}));

    let again = fx
        .cache
        .get_or_set("shaun", TTL, || async { Ok(json!("unused")) })
        .await
        .unwrap();
    assert_eq!(again, json!({"name": "shaun"}));
}

#[tokio::test]
async fn test_expiry_is_left_to_the_store() {
    let fx = setup();

    fx.cache.set("shaun", TTL, json!("v")).await.unwrap();
    fx.clock.advance(60);

    // Past its ttl but not yet swept: still served.
    assert_eq!(fx.cache.get("shaun").await.unwrap(), json!("v"));

    let removed = fx.store.sweep_expired(fx.clock.now()).await.unwrap();
    assert_eq!(removed, 1);
    assert!(matches!(fx.cache.get("shaun").await, Err(CacheError::NotFound(_))));
}

