//! Tests for the in-memory gym store.

use std::time::Duration;

use chrono::NaiveDate;
use gymdesk_tui::store::{
    Entity, GymStore, Member, MemberStatus, MemoryStore, Plan, Store, StoreError,
};
use gymtable::{Row, Value};

fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        plan: Plan::Basic,
        status: MemberStatus::Active,
        joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        trainer: None,
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

#[test]
fn test_list_keeps_insertion_order() {
    let store = MemoryStore::new(vec![member("b", "Bea"), member("a", "Al")]);
    store.insert(member("c", "Cy")).unwrap();

    let ids: Vec<_> = store.list().unwrap().iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn test_get_by_id() {
    let store = MemoryStore::new(vec![member("a", "Al")]);

    assert_eq!(store.get("a").unwrap().name, "Al");
    assert_eq!(
        store.get("zz"),
        Err(StoreError::NotFound {
            collection: "members",
            id: "zz".to_string()
        })
    );
}

#[test]
fn test_insert_duplicate_id_rejected() {
    let store = MemoryStore::new(vec![member("a", "Al")]);

    let err = store.insert(member("a", "Other")).unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_delete_returns_removed_record() {
    let store = MemoryStore::new(vec![member("a", "Al"), member("b", "Bea")]);

    let removed = store.delete("a").unwrap();

    assert_eq!(removed.name, "Al");
    assert_eq!(store.list().unwrap().len(), 1);
    assert!(matches!(store.delete("a"), Err(StoreError::NotFound { .. })));
}

#[test]
fn test_latency_delays_list() {
    let store = MemoryStore::new(vec![member("a", "Al")]).with_latency(Duration::from_millis(30));
    let start = std::time::Instant::now();

    store.list().unwrap();

    assert!(start.elapsed() >= Duration::from_millis(30));
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_member_fields() {
    let mut m = member("M-9", "Jo Park");
    m.plan = Plan::Vip;

    assert_eq!(m.field("name"), Some(Value::from("Jo Park")));
    assert_eq!(m.field("plan"), Some(Value::from("VIP")));
    assert_eq!(m.field("status"), Some(Value::from("active")));
    assert_eq!(m.field("trainer"), Some(Value::Null));
    assert_eq!(m.field("nope"), None);
    assert_eq!(m.label(), "Jo Park");
}

#[test]
fn test_seeded_store_has_every_collection() {
    let store = GymStore::seeded(Duration::ZERO);

    assert!(!store.members.list().unwrap().is_empty());
    assert!(!store.classes.list().unwrap().is_empty());
    assert!(!store.payments.list().unwrap().is_empty());
    assert!(!store.equipment.list().unwrap().is_empty());
}

#[test]
fn test_seeded_ids_unique() {
    let store = GymStore::seeded(Duration::ZERO);
    let members = store.members.list().unwrap();
    let mut ids: Vec<_> = members.iter().map(|m| m.id()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), members.len());
}

#[test]
fn test_full_class_detected() {
    let store = GymStore::seeded(Duration::ZERO);
    let classes = store.classes.list().unwrap();

    assert!(classes.iter().any(|c| c.is_full()));
    assert!(classes.iter().any(|c| !c.is_full()));
}
