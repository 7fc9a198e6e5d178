use crate::error::SessionError;
use crate::load_report::LoadReport;
use crate::plan::Plan;
use crate::session::Session;
use crate::storage::{KeyValueStorage, MemoryStorage};
use crate::store::SessionStore;
use crate::tests::FlakyStorage;
use crate::user::User;

use acct_config::CorruptionPolicy;
use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};

const KEY: &str = "user";

fn open(storage: &MemoryStorage) -> SessionStore<MemoryStorage> {
    SessionStore::open(storage.clone()).unwrap()
}

fn persisted(storage: &MemoryStorage) -> Option<User> {
    storage
        .get_item(KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

// =========================================================================
// Rehydration
// =========================================================================

#[test]
fn given_empty_storage_when_open_then_absent_and_first_start() {
    // Given
    let storage = MemoryStorage::new();

    // When
    let store = open(&storage);

    // Then
    assert!(!store.is_authenticated());
    assert_that!(store.user(), none());
    assert_that!(store.session(), eq(&Session::Absent));
    assert_that!(store.load_report(), eq(&LoadReport::FirstStart));
}

#[test]
fn given_registered_user_when_reopened_then_rehydrates_field_for_field() {
    // Given
    let storage = MemoryStorage::new();
    let registered = open(&storage).register("Ana", "ana@x.com", "pw").unwrap();

    // When
    let reopened = open(&storage);

    // Then
    assert!(reopened.is_authenticated());
    assert_that!(reopened.user(), some(eq(&registered)));
    assert_that!(reopened.load_report(), eq(&LoadReport::Loaded));
}

#[test]
fn given_legacy_french_plan_when_open_then_rehydrates() {
    // Given
    let storage = MemoryStorage::new();
    storage
        .set_item(
            KEY,
            r#"{"id":"1","name":"Ana","email":"ana@x.com","plan":"Entreprise"}"#,
        )
        .unwrap();

    // When
    let store = open(&storage);

    // Then
    assert_that!(store.user().map(|u| u.plan), some(eq(Plan::Enterprise)));
}

#[test]
fn given_corrupt_entry_and_discard_policy_when_open_then_absent_and_backed_up() {
    // Given
    let storage = MemoryStorage::new();
    storage.set_item(KEY, "{not json").unwrap();

    // When
    let store = SessionStore::open_with(storage.clone(), KEY, CorruptionPolicy::Discard).unwrap();

    // Then
    assert!(!store.is_authenticated());
    assert!(!storage.contains_key(KEY));
    let backed_up = storage.get_item("user.corrupted").unwrap();
    assert_that!(backed_up.as_deref(), some(eq("{not json")));
    match store.load_report() {
        LoadReport::Discarded { message, backup } => {
            assert!(!message.is_empty());
            assert_eq!(backup.as_deref(), Some("user.corrupted"));
        }
        other => panic!("Expected Discarded, got {other:?}"),
    }
}

#[test]
fn given_corrupt_entry_and_fail_policy_when_open_then_corrupted_error() {
    // Given
    let storage = MemoryStorage::new();
    storage.set_item(KEY, r#"{"id":"1","plan":"Gold"}"#).unwrap();

    // When
    let result = SessionStore::open_with(storage.clone(), KEY, CorruptionPolicy::Fail);

    // Then
    match result {
        Err(SessionError::Corrupted { key, .. }) => assert_eq!(key, KEY),
        Err(other) => panic!("Expected Corrupted, got {other:?}"),
        Ok(_) => panic!("Expected Corrupted, got a store"),
    }
    assert!(storage.contains_key(KEY), "entry must be left in place");
}

#[test]
fn given_custom_key_when_register_then_persists_under_that_key_only() {
    // Given
    let storage = MemoryStorage::new();
    let store = SessionStore::open_with(storage.clone(), "account", CorruptionPolicy::Discard)
        .unwrap();

    // When
    store.register("Ana", "ana@x.com", "pw").unwrap();

    // Then
    assert_eq!(store.key(), "account");
    assert!(storage.contains_key("account"));
    assert!(!storage.contains_key(KEY));
}

// =========================================================================
// Register
// =========================================================================

#[test]
fn given_any_state_when_register_then_authenticated_free_user() {
    let inputs = [
        ("Ana", "ana@x.com", "pw"),
        ("", "", ""),
        ("Zoë Ł", "not-an-email", "🔑"),
    ];

    for (name, email, password) in inputs {
        // Given
        let storage = MemoryStorage::new();
        let store = open(&storage);

        // When
        let user = store.register(name, email, password).unwrap();

        // Then
        assert!(store.is_authenticated());
        assert_eq!(user.plan, Plan::Free);
        assert_eq!(user.name, name);
        assert_eq!(user.email, email);
        assert!(!user.id.is_empty());
        assert_eq!(store.user(), Some(user.clone()));
        assert_eq!(persisted(&storage), Some(user));
    }
}

#[test]
fn given_password_when_register_then_not_persisted() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);

    // When
    store.register("Ana", "ana@x.com", "s3cret-pass").unwrap();

    // Then
    let raw = storage.get_item(KEY).unwrap().unwrap();
    assert!(!raw.contains("s3cret-pass"));
    assert!(!raw.contains("password"));
}

#[test]
fn given_existing_user_when_register_again_then_replaced() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);
    store.register("Ana", "ana@x.com", "pw").unwrap();
    store.update_plan(Plan::Plus).unwrap();

    // When
    let second = store.register("Bo", "bo@x.com", "pw").unwrap();

    // Then
    assert_eq!(store.user(), Some(second.clone()));
    assert_eq!(second.plan, Plan::Free);
    assert_eq!(persisted(&storage), Some(second));
}

#[test]
fn given_failing_storage_when_register_then_error_and_state_unchanged() {
    // Given
    let storage = FlakyStorage::new(MemoryStorage::new());
    let store = SessionStore::open(storage).unwrap();
    store.storage().fail_writes(true);

    // When
    let result = store.register("Ana", "ana@x.com", "pw");

    // Then
    assert_that!(result, err(anything()));
    assert!(!store.is_authenticated());
    assert!(store.storage().inner.is_empty());
}

// =========================================================================
// Logout
// =========================================================================

#[test]
fn given_registered_user_when_logout_then_absent_and_entry_removed() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);
    store.register("Ana", "ana@x.com", "pw").unwrap();

    // When
    let result = store.logout();

    // Then
    assert_that!(result, ok(anything()));
    assert!(!store.is_authenticated());
    assert_that!(store.user(), none());
    assert!(!storage.contains_key(KEY));
}

#[test]
fn given_no_user_when_logout_then_ok() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);

    // When
    let first = store.logout();
    let second = store.logout();

    // Then
    assert_that!(first, ok(anything()));
    assert_that!(second, ok(anything()));
    assert!(!store.is_authenticated());
}

#[test]
fn given_logout_when_reopened_then_absent() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);
    store.register("Ana", "ana@x.com", "pw").unwrap();
    store.logout().unwrap();

    // When
    let reopened = open(&storage);

    // Then
    assert!(!reopened.is_authenticated());
    assert_that!(reopened.load_report(), eq(&LoadReport::FirstStart));
}

#[test]
fn given_failing_storage_when_logout_then_error_and_user_kept() {
    // Given
    let storage = FlakyStorage::new(MemoryStorage::new());
    let store = SessionStore::open(storage).unwrap();
    let user = store.register("Ana", "ana@x.com", "pw").unwrap();
    store.storage().fail_writes(true);

    // When
    let result = store.logout();

    // Then
    assert_that!(result, err(anything()));
    assert_eq!(store.user(), Some(user));
    assert!(store.storage().inner.contains_key(KEY));
}

// =========================================================================
// Update plan
// =========================================================================

#[test]
fn given_registered_user_when_update_plan_then_only_plan_changes() {
    for plan in Plan::ALL {
        // Given
        let storage = MemoryStorage::new();
        let store = open(&storage);
        let before = store.register("Ana", "ana@x.com", "pw").unwrap();

        // When
        let updated = store.update_plan(plan).unwrap();

        // Then
        let after = store.user().unwrap();
        assert_eq!(updated, Some(after.clone()));
        assert_eq!(after.plan, plan);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(persisted(&storage), Some(after));
    }
}

#[test]
fn given_no_user_when_update_plan_then_silent_no_op() {
    // Given
    let storage = MemoryStorage::new();
    let store = open(&storage);

    // When
    let result = store.update_plan(Plan::Enterprise);

    // Then
    assert_that!(result, ok(none()));
    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[test]
fn given_failing_storage_when_update_plan_then_error_and_plan_unchanged() {
    // Given
    let storage = FlakyStorage::new(MemoryStorage::new());
    let store = SessionStore::open(storage).unwrap();
    store.register("Ana", "ana@x.com", "pw").unwrap();
    store.storage().fail_writes(true);

    // When
    let result = store.update_plan(Plan::Plus);

    // Then
    assert_that!(result, err(anything()));
    assert_eq!(store.user().map(|u| u.plan), Some(Plan::Free));
    let raw = store.storage().inner.get_item(KEY).unwrap().unwrap();
    assert_that!(raw, contains_substring("\"Free\""));
}

// =========================================================================
// Scenario
// =========================================================================

#[test]
fn given_full_lifecycle_when_run_then_each_step_observable() {
    let storage = MemoryStorage::new();
    let store = open(&storage);

    let user = store.register("Ana", "ana@x.com", "pw").unwrap();
    assert!(store.is_authenticated());
    assert_eq!(user.plan, Plan::Free);

    store.update_plan(Plan::Plus).unwrap();
    let upgraded = store.user().unwrap();
    assert_eq!(upgraded.plan, Plan::Plus);
    assert_eq!(upgraded.name, "Ana");
    assert_eq!(upgraded.email, "ana@x.com");

    let snapshot = store.snapshot();
    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.user, Some(upgraded));

    store.logout().unwrap();
    assert!(!store.is_authenticated());
    assert!(storage.get_item(KEY).unwrap().is_none());
    assert!(!store.snapshot().is_authenticated);
}

#[test]
fn given_snapshot_when_serialize_then_exposes_user_and_flag() {
    let storage = MemoryStorage::new();
    let store = open(&storage);
    store.register("Ana", "ana@x.com", "pw").unwrap();

    let value = serde_json::to_value(store.snapshot()).unwrap();

    assert_eq!(value["is_authenticated"], true);
    assert_eq!(value["user"]["name"], "Ana");
    assert_eq!(value["user"]["plan"], "Free");

    store.logout().unwrap();
    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(value["is_authenticated"], false);
    assert!(value["user"].is_null());
}
