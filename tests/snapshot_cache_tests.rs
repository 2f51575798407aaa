use innkeep::db::{
    repositories::snapshots::{self, CONTENT_KEY},
    Database,
};

#[tokio::test]
async fn snapshot_roundtrip() {
    let db = Database::in_memory().await.expect("db should initialize");
    let document = serde_json::json!({
        "hero": { "title": "Roundtrip", "subtitle": "", "backgroundImage": "" }
    });

    snapshots::save(db.pool(), CONTENT_KEY, &document)
        .await
        .expect("save snapshot");
    let loaded = snapshots::load(db.pool(), CONTENT_KEY)
        .await
        .expect("load snapshot")
        .expect("snapshot exists");

    assert_eq!(loaded.document, document);
}

#[tokio::test]
async fn missing_snapshot_is_none() {
    let db = Database::in_memory().await.expect("db should initialize");
    let loaded = snapshots::load(db.pool(), CONTENT_KEY)
        .await
        .expect("load snapshot");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn saving_twice_keeps_only_the_latest() {
    let db = Database::in_memory().await.expect("db should initialize");
    snapshots::save(
        db.pool(),
        CONTENT_KEY,
        &serde_json::json!({ "hero": { "title": "first" } }),
    )
    .await
    .expect("save first");
    snapshots::save(
        db.pool(),
        CONTENT_KEY,
        &serde_json::json!({ "hero": { "title": "second" } }),
    )
    .await
    .expect("save second");

    let loaded = snapshots::load(db.pool(), CONTENT_KEY)
        .await
        .expect("load snapshot")
        .expect("snapshot exists");
    assert_eq!(
        loaded.document.get("hero").and_then(|h| h.get("title")),
        Some(&serde_json::Value::String("second".to_string()))
    );
}

#[tokio::test]
async fn corrupt_snapshot_reports_a_cache_error() {
    let db = Database::in_memory().await.expect("db should initialize");
    sqlx::query("INSERT INTO snapshots (key, document) VALUES (?1, ?2)")
        .bind(CONTENT_KEY)
        .bind("{not json")
        .execute(db.pool())
        .await
        .expect("insert corrupt blob");

    let result = snapshots::load(db.pool(), CONTENT_KEY).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn delete_removes_the_snapshot() {
    let db = Database::in_memory().await.expect("db should initialize");
    snapshots::save(db.pool(), CONTENT_KEY, &serde_json::json!({}))
        .await
        .expect("save snapshot");

    assert!(snapshots::delete(db.pool(), CONTENT_KEY)
        .await
        .expect("delete snapshot"));
    assert!(!snapshots::delete(db.pool(), CONTENT_KEY)
        .await
        .expect("second delete"));
    assert!(snapshots::load(db.pool(), CONTENT_KEY)
        .await
        .expect("load snapshot")
        .is_none());
}
