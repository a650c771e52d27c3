// Integration tests for pawrec
use pawrec::prelude::*;
use std::io::Write;
use std::sync::Arc;

fn animal(id: i64, kind: &str, color: &str, region: &str) -> AnimalRecord {
    AnimalRecord {
        id,
        shelter_id: Some(1),
        name: Some(format!("animal-{id}")),
        kind: Some(kind.to_string()),
        color: Some(color.to_string()),
        gender: Some("f".to_string()),
        neuter: Some("y".to_string()),
        age: Some("2".to_string()),
        region: Some(region.to_string()),
        happen_place: None,
        special_mark: None,
        intro_title: None,
        intro_body: None,
        removed: false,
    }
}

fn group(id: i64, name: &str, province: &str) -> GroupRecord {
    GroupRecord {
        id,
        name: Some(name.to_string()),
        province: Some(province.to_string()),
        district: None,
        sub_district: None,
        description: Some(format!("{name} volunteers in {province}")),
        category: Some("volunteering".to_string()),
        removed: false,
    }
}

fn seeded_store() -> Arc<MemoryRecordStore> {
    let store = Arc::new(MemoryRecordStore::new());
    store.insert_animal(animal(1, "cat", "orange", "seoul"));
    store.insert_animal(animal(2, "dog", "black", "busan"));
    store.insert_animal(animal(3, "cat", "orange", "seoul"));
    store.insert_animal(animal(4, "dog", "brown", "busan"));
    store.insert_group(group(10, "paw friends", "seoul"));
    store.insert_group(group(11, "tail helpers", "busan"));
    store.insert_group(group(12, "paw patrol", "seoul"));
    store
}

async fn bootstrap(store: Arc<MemoryRecordStore>) -> (Arc<Engine>, Arc<MemoryViewHistory>) {
    let history = Arc::new(MemoryViewHistory::new());
    let engine = Engine::bootstrap(
        store,
        history.clone(),
        Arc::new(TemplateIntroGenerator),
        EngineConfig {
            vector_width: 8,
            enrich_batch_size: 5,
        },
    )
    .await
    .unwrap();
    (Arc::new(engine), history)
}

#[tokio::test]
async fn test_recommend_from_view_history() {
    let store = seeded_store();
    let (engine, history) = bootstrap(store).await;

    history.record(42, EntityKind::Animal, 1);
    let recommended = engine
        .recommend_for_user(42, EntityKind::Animal)
        .await
        .unwrap();

    // Entity 3 shares entity 1's text exactly; the seed itself is excluded.
    assert!(recommended.contains(&3));
    assert!(!recommended.contains(&1));
    assert!(recommended.len() <= 5);
}

#[tokio::test]
async fn test_empty_history_recommends_nothing() {
    let store = seeded_store();
    let (engine, _history) = bootstrap(store).await;

    let recommended = engine
        .recommend_for_user(99, EntityKind::Animal)
        .await
        .unwrap();
    assert!(recommended.is_empty());
}

#[tokio::test]
async fn test_stale_history_entry_degrades_gracefully() {
    let store = seeded_store();
    let (engine, history) = bootstrap(store).await;

    history.record(42, EntityKind::Animal, 1);
    history.record(42, EntityKind::Animal, 777); // never indexed

    let recommended = engine
        .recommend_for_user(42, EntityKind::Animal)
        .await
        .unwrap();
    assert!(recommended.contains(&3));
}

#[tokio::test]
async fn test_group_collection_is_independent() {
    let store = seeded_store();
    let (engine, history) = bootstrap(store).await;

    history.record(7, EntityKind::Group, 10);
    let recommended = engine
        .recommend_for_user(7, EntityKind::Group)
        .await
        .unwrap();

    assert!(!recommended.contains(&10));
    // Only group ids come back, never animal ids.
    for id in &recommended {
        assert!((10..=12).contains(id));
    }
}

#[tokio::test]
async fn test_incremental_update_extends_recommendations() {
    let store = seeded_store();
    let (engine, history) = bootstrap(store.clone()).await;

    // A new animal identical to 1 and 3 arrives after startup.
    store.insert_animal(animal(5, "cat", "orange", "seoul"));
    assert_eq!(engine.refresh(EntityKind::Animal).await.unwrap(), 1);
    // Second pass with nothing new is a no-op.
    assert_eq!(engine.refresh(EntityKind::Animal).await.unwrap(), 0);

    history.record(1, EntityKind::Animal, 5);
    let recommended = engine
        .recommend_for_user(1, EntityKind::Animal)
        .await
        .unwrap();
    assert!(recommended.contains(&1));
    assert!(recommended.contains(&3));
}

#[tokio::test]
async fn test_enrichment_runs_detached() {
    let store = seeded_store();
    let (engine, _history) = bootstrap(store.clone()).await;

    assert!(engine.trigger_enrichment());
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // All four animals got an introduction, committed in one batch of four.
    assert_eq!(store.intro_commits().len(), 4);
    assert!(store.list_missing_intros().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seed_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "animals": [
                {{"id": 1, "kind": "cat", "color": "orange"}},
                {{"id": 2, "kind": "dog", "color": "black"}}
            ],
            "groups": [
                {{"id": 10, "name": "helpers", "province": "seoul"}}
            ]
        }}"#
    )
    .unwrap();

    let seed = SeedData::load(file.path()).unwrap();
    let store = MemoryRecordStore::from_seed(seed);
    assert_eq!(store.animal_count(), 2);
    assert_eq!(store.group_count(), 1);
}
