//! Tests for the settings store and dashboard config.

use gymdesk_tui::config::DashboardConfig;
use gymdesk_tui::pages::PageKind;
use gymdesk_tui::settings::{
    MemoryBackend, SettingsBackend, SettingsError, SettingsProvider, SqliteBackend,
};

// ============================================================================
// SettingsProvider
// ============================================================================

#[test]
fn test_get_missing_key() {
    let settings = SettingsProvider::in_memory();

    assert_eq!(settings.get::<bool>("nope").unwrap(), None);
    assert_eq!(settings.get_or("nope", 7u64).unwrap(), 7);
}

#[test]
fn test_set_then_get_typed() {
    let settings = SettingsProvider::in_memory();

    settings.set("config/zebra", &false).unwrap();
    settings.set("sort/members", &("name".to_string(), true)).unwrap();

    assert_eq!(settings.get::<bool>("config/zebra").unwrap(), Some(false));
    assert_eq!(
        settings.get::<(String, bool)>("sort/members").unwrap(),
        Some(("name".to_string(), true))
    );
}

#[test]
fn test_delete_key() {
    let settings = SettingsProvider::in_memory();
    settings.set("a", &1u32).unwrap();

    settings.delete("a").unwrap();

    assert_eq!(settings.get::<u32>("a").unwrap(), None);
}

#[test]
fn test_wrong_type_is_deserialization_error() {
    let settings = SettingsProvider::in_memory();
    settings.set("a", &1u8).unwrap();

    let err = settings.get::<String>("a").unwrap_err();

    assert!(matches!(err, SettingsError::Deserialization(_)));
}

#[test]
fn test_memory_backend_prefix_scan() {
    let backend = MemoryBackend::new();
    backend.write("sort/payments", &[1]).unwrap();
    backend.write("sort/members", &[2]).unwrap();
    backend.write("config/zebra", &[3]).unwrap();

    assert_eq!(
        backend.keys_under("sort/").unwrap(),
        ["sort/members", "sort/payments"]
    );
}

// ============================================================================
// SqliteBackend
// ============================================================================

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.db");

    {
        let settings = SettingsProvider::new(SqliteBackend::open(&path).unwrap());
        settings.set("config/tick_ms", &250u64).unwrap();
    }

    let settings = SettingsProvider::new(SqliteBackend::open(&path).unwrap());
    assert_eq!(settings.get::<u64>("config/tick_ms").unwrap(), Some(250));
}

#[test]
fn test_sqlite_overwrite_and_delete() {
    let backend = SqliteBackend::in_memory().unwrap();

    backend.write("k", &[1, 2]).unwrap();
    backend.write("k", &[3]).unwrap();
    assert_eq!(backend.read("k").unwrap(), Some(vec![3]));

    backend.remove("k").unwrap();
    assert_eq!(backend.read("k").unwrap(), None);
}

#[test]
fn test_sqlite_prefix_scan() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.write("sort/members", &[0]).unwrap();
    backend.write("sort/classes", &[0]).unwrap();
    backend.write("config/zebra", &[0]).unwrap();

    assert_eq!(
        backend.keys_under("sort/").unwrap(),
        ["sort/classes", "sort/members"]
    );
}

#[test]
fn test_sqlite_prefix_is_literal() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.write("sort_a", &[0]).unwrap();
    backend.write("sortXa", &[0]).unwrap();
    backend.write("sor", &[0]).unwrap();

    assert_eq!(backend.keys_under("sort_").unwrap(), ["sort_a"]);
}

// ============================================================================
// DashboardConfig
// ============================================================================

#[test]
fn test_config_defaults_when_unset() {
    let settings = SettingsProvider::in_memory();

    assert_eq!(DashboardConfig::load(&settings).unwrap(), DashboardConfig::default());
}

#[test]
fn test_config_round_trip() {
    let settings = SettingsProvider::in_memory();
    let config = DashboardConfig {
        zebra: false,
        tick_ms: 50,
        start_page: PageKind::Payments,
        store_latency_ms: 0,
    };

    config.save(&settings).unwrap();

    assert_eq!(DashboardConfig::load(&settings).unwrap(), config);
}

#[test]
fn test_config_partial_keys_fall_back() {
    let settings = SettingsProvider::in_memory();
    settings.set("config/zebra", &false).unwrap();

    let config = DashboardConfig::load(&settings).unwrap();

    assert!(!config.zebra);
    assert_eq!(config.tick_ms, DashboardConfig::default().tick_ms);
}

#[test]
fn test_config_tick_has_floor() {
    let config = DashboardConfig {
        tick_ms: 0,
        ..DashboardConfig::default()
    };

    assert_eq!(config.tick().as_millis(), 10);
}
