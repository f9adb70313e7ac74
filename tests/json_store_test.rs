//! Tests for JsonFileStore and the service running on top of it

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use cathier::config::Settings;
use cathier::domain::{
    CategoryFields, CategoryPatch, CategoryStatus, NewCategory, NewRecord, ParentFilter,
};
use cathier::infrastructure::di::ServiceContainer;
use cathier::infrastructure::{CategoryStore, JsonFileStore};
use cathier::util::testing::init_test_setup;

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("nested").join("categories.json")
}

fn record(name: &str) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        parent: None,
        status: CategoryStatus::Active,
    }
}

#[test]
fn given_missing_file_when_scanning_then_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(store_path(&dir));

    assert!(store.find_all().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn given_inserted_records_when_reopening_then_persisted_in_order() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let first = JsonFileStore::new(&path);
    let a = first.insert(record("A")).unwrap();
    let b = first.insert(record("B")).unwrap();

    let reopened = JsonFileStore::new(&path);
    let all = reopened.find_all().unwrap();

    assert_eq!(all, vec![a.clone(), b]);
    assert_eq!(reopened.find_by_id(&a.id).unwrap(), Some(a));
}

#[test]
fn given_store_file_when_reading_raw_then_documented_layout() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = JsonFileStore::new(&path);
    let created = store.insert(record("Root")).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(raw["categories"][0]["id"], created.id.as_str());
    assert_eq!(raw["categories"][0]["name"], "Root");
    assert_eq!(raw["categories"][0]["parent"], serde_json::Value::Null);
    assert_eq!(raw["categories"][0]["status"], "active");
}

#[test]
fn given_children_when_update_many_then_all_written_in_one_replace() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = JsonFileStore::new(&path);
    let root = store.insert(record("Root")).unwrap();
    for name in ["a", "b", "c"] {
        store
            .insert(NewRecord {
                parent: Some(root.id.clone()),
                ..record(name)
            })
            .unwrap();
    }

    let n = store
        .update_many(
            &ParentFilter(root.id.clone()),
            CategoryFields::status(CategoryStatus::Inactive),
        )
        .unwrap();

    assert_eq!(n, 3);
    let reopened = JsonFileStore::new(&path);
    let statuses: Vec<_> = reopened
        .find_all()
        .unwrap()
        .into_iter()
        .filter(|c| c.parent.is_some())
        .map(|c| c.status)
        .collect();
    assert_eq!(statuses, vec![CategoryStatus::Inactive; 3]);
    // no temp files left next to the store
    let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn given_parallel_inserts_when_done_then_none_lost() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(store_path(&dir)));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.insert(record(&format!("n{i}"))).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.find_all().unwrap().len(), 6);
}

#[test]
fn given_container_on_file_when_running_scenarios_then_state_survives_restart() {
    init_test_setup();
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        data_file: store_path(&dir),
        ..Settings::default()
    };

    let (root, electronics, phones) = {
        let c = ServiceContainer::new(settings.clone());
        let root = c.categories.create(NewCategory::root("Root")).unwrap();
        let electronics = c
            .categories
            .create(NewCategory::child("Electronics", root.id.clone()))
            .unwrap();
        let phones = c
            .categories
            .create(NewCategory::child("Phones", electronics.id.clone()))
            .unwrap();
        c.categories
            .update(&electronics.id, CategoryPatch::status(CategoryStatus::Inactive))
            .unwrap();
        (root.id, electronics.id, phones.id)
    };

    let c = ServiceContainer::new(settings);
    assert_eq!(
        c.store.find_by_id(&phones).unwrap().unwrap().status,
        CategoryStatus::Inactive
    );

    c.categories.delete(&electronics).unwrap();

    let forest = c.categories.list().unwrap();
    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.roots[0].id, root);
    assert_eq!(forest.roots[0].subcategories[0].id, phones);
}
