//! SQLite repository behavior: create/read round-trips, not-found handling,
//! pagination totals, ordering, and persistence across reopen.

use hotdog_or_not::error::HotDogError;
use hotdog_or_not::model::NewAnalysis;
use hotdog_or_not::schema::{HotDogCategory, HotDogVerdict};
use hotdog_or_not::store::{AnalysisRepository, SqliteRepository};
use tempfile::tempdir;

fn record(session_id: &str, reasoning: &str) -> NewAnalysis {
    NewAnalysis {
        image_url: format!("http://localhost:3000/images/{}/1.png", session_id),
        image_path: format!("{}/1.png", session_id),
        verdict: HotDogVerdict {
            is_hot_dog: true,
            confidence: 88.0,
            category: HotDogCategory::HotDog,
            hot_dog_count: 2,
            style: Some("New York".into()),
            reasoning: reasoning.into(),
            detected_items: vec!["bun".into(), "sauerkraut".into()],
        },
        session_id: session_id.into(),
    }
}

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    let created = repo.create(record("s1", "classic cart dog")).await.unwrap();
    assert!(!created.id.is_empty());

    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(created, fetched);
    assert_eq!(fetched.detected_items, vec!["bun", "sauerkraut"]);
    assert_eq!(fetched.style.as_deref(), Some("New York"));
}

#[tokio::test]
async fn test_null_style_and_empty_items_roundtrip() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    let mut new = record("s1", "no style");
    new.verdict.style = None;
    new.verdict.detected_items = vec![];

    let created = repo.create(new).await.unwrap();
    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched.style, None);
    assert!(fetched.detected_items.is_empty());
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    let err = repo.get_by_id("missing-id").await.unwrap_err();
    assert!(matches!(err, HotDogError::NotFound(_)));
}

#[tokio::test]
async fn test_list_pagination_and_total() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
        let created = repo
            .create(record("s1", &format!("record {}", i)))
            .await
            .unwrap();
        ids.push(created.id);
    }
    // another session must not bleed into the filter or the total
    repo.create(record("other", "unrelated")).await.unwrap();

    // newest first
    ids.reverse();

    let mut seen = Vec::new();
    for offset in [0u32, 2, 4] {
        let page = repo.list_by_session("s1", 2, offset).await.unwrap();
        assert_eq!(page.total, 5);
        seen.extend(page.items.into_iter().map(|a| a.id));
    }
    assert_eq!(seen, ids);

    let empty = repo.list_by_session("s1", 2, 10).await.unwrap();
    assert_eq!(empty.total, 5);
    assert!(empty.items.is_empty());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    repo.create(record("s1", "first")).await.unwrap();
    repo.create(record("s1", "second")).await.unwrap();
    repo.create(record("s1", "third")).await.unwrap();

    let page = repo.list_by_session("s1", 20, 0).await.unwrap();
    let reasons: Vec<&str> = page.items.iter().map(|a| a.reasoning.as_str()).collect();
    assert_eq!(reasons, vec!["third", "second", "first"]);

    let mut timestamps = page.items.iter().map(|a| a.created_at).collect::<Vec<_>>();
    let sorted = {
        let mut t = timestamps.clone();
        t.sort_by(|a, b| b.cmp(a));
        t
    };
    assert_eq!(timestamps, sorted);
    timestamps.dedup();
    assert_eq!(timestamps.len(), 3);
}

/// With the id tiebreaker, listing order is stable across repeated reads
/// even for records created in rapid succession.
#[tokio::test]
async fn test_list_order_is_stable_across_reads() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    for i in 0..10 {
        repo.create(record("s1", &format!("record {}", i)))
            .await
            .unwrap();
    }

    let first: Vec<String> = repo
        .list_by_session("s1", 20, 0)
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|a| a.id)
        .collect();
    let second: Vec<String> = repo
        .list_by_session("s1", 20, 0)
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");

    let created = {
        let repo = SqliteRepository::open(&path).unwrap();
        repo.create(record("s1", "durable")).await.unwrap()
    };

    let reopened = SqliteRepository::open(&path).unwrap();
    let fetched = reopened.get_by_id(&created.id).await.unwrap();
    assert_eq!(created, fetched);
}

#[tokio::test]
async fn test_empty_session_listing() {
    let dir = tempdir().unwrap();
    let repo = SqliteRepository::open(&dir.path().join("test.db")).unwrap();

    let page = repo.list_by_session("nobody", 20, 0).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}
