//! Track store integration tests


use harmonic_core::{Track, TrackId, TrackStore};
use harmonic_storage::SqliteTrackStore;
use std::path::PathBuf;
use test_helpers::{create_test_track, TestDb};

fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|track| track.id.as_str()).collect()
}

#[tokio::test]
async fn get_all_returns_insertion_order() {
    let db = TestDb::new().await;

    // Titles sort the other way round; order must follow insertion
    for (id, title) in [("c", "Alpha"), ("a", "Beta"), ("b", "Gamma")] {
        db.store.put(&create_test_track(id, title)).await.unwrap();
    }

    let tracks = db.store.get_all().await.unwrap();
    assert_eq!(ids(&tracks), vec!["c", "a", "b"]);
}

#[tokio::test]
async fn put_round_trips_every_field() {
    let db = TestDb::new().await;
    let track = create_test_track("t1", "Song");
    db.store.put(&track).await.unwrap();

    let stored = db.store.get(&TrackId::new("t1")).await.unwrap().unwrap();
    assert_eq!(stored, track);
}

#[tokio::test]
async fn put_keeps_optional_fields_empty() {
    let db = TestDb::new().await;
    let track = Track {
        cover: None,
        duration_seconds: None,
        ..create_test_track("bare", "Bare")
    };
    db.store.put(&track).await.unwrap();

    let stored = db.store.get(&TrackId::new("bare")).await.unwrap().unwrap();
    assert_eq!(stored.cover, None);
    assert_eq!(stored.duration_seconds, None);
}

#[tokio::test]
async fn upsert_replaces_in_place() {
    let db = TestDb::new().await;
    db.store.put(&create_test_track("a", "First")).await.unwrap();
    db.store.put(&create_test_track("b", "Second")).await.unwrap();

    let mut updated = create_test_track("a", "First (Remastered)");
    updated.file = PathBuf::from("/music/remaster/a.flac");
    db.store.put(&updated).await.unwrap();

    let tracks = db.store.get_all().await.unwrap();
    assert_eq!(ids(&tracks), vec!["a", "b"]);
    assert_eq!(tracks[0].title, "First (Remastered)");
    assert_eq!(tracks[0].file, PathBuf::from("/music/remaster/a.flac"));
    assert_eq!(db.store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn delete_removes_only_that_track() {
    let db = TestDb::new().await;
    for id in ["a", "b", "c"] {
        db.store.put(&create_test_track(id, id)).await.unwrap();
    }

    db.store.delete(&TrackId::new("b")).await.unwrap();
    // Unknown ids are fine
    db.store.delete(&TrackId::new("missing")).await.unwrap();

    let tracks = db.store.get_all().await.unwrap();
    assert_eq!(ids(&tracks), vec!["a", "c"]);
}

#[tokio::test]
async fn clear_empties_library() {
    let db = TestDb::new().await;
    db.store.put(&create_test_track("a", "A")).await.unwrap();
    db.store.put(&create_test_track("b", "B")).await.unwrap();

    db.store.clear().await.unwrap();

    assert!(db.store.get_all().await.unwrap().is_empty());

    // New inserts after a clear still append
    db.store.put(&create_test_track("z", "Z")).await.unwrap();
    db.store.put(&create_test_track("y", "Y")).await.unwrap();
    assert_eq!(ids(&db.store.get_all().await.unwrap()), vec!["z", "y"]);
}

#[tokio::test]
async fn library_survives_reopen() {
    let db = TestDb::new().await;
    db.store.put(&create_test_track("keep", "Keeper")).await.unwrap();

    let reopened = SqliteTrackStore::open(&db.url).await.unwrap();
    let tracks = reopened.get_all().await.unwrap();
    assert_eq!(ids(&tracks), vec!["keep"]);
}

#[tokio::test]
async fn in_memory_store_is_usable() {
    let store = SqliteTrackStore::in_memory().await.unwrap();
    store.put(&create_test_track("m", "Memory")).await.unwrap();

    assert_eq!(store.get_all().await.unwrap().len(), 1);
}
