use lightbox_core::settings::{
    FileStore, KeyValueStore, MemoryStore, SortOrder, TrayLocation, TraySettings,
};

fn custom() -> TraySettings {
    TraySettings {
        visible: false,
        tray_height: 180.0,
        sort_order: SortOrder::Name,
        newest_first: false,
        max_batches: 3,
        location: TrayLocation::Left,
        node_filter: vec!["sampler".into(), "preview".into()],
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[test]
fn test_tray_location_display_and_parse() {
    assert_eq!(format!("{}", TrayLocation::Right), "Right");
    assert_eq!("top".parse::<TrayLocation>().unwrap(), TrayLocation::Top);
    assert!("middle".parse::<TrayLocation>().is_err());
    assert!(TrayLocation::Bottom.is_horizontal());
    assert!(!TrayLocation::Left.is_horizontal());
    assert_eq!(TrayLocation::ALL.len(), 4);
}

#[test]
fn test_sort_order_parse() {
    assert_eq!("name".parse::<SortOrder>().unwrap(), SortOrder::Name);
    assert_eq!(SortOrder::default(), SortOrder::Produced);
}

// ---------------------------------------------------------------------------
// Key/value persistence
// ---------------------------------------------------------------------------

#[test]
fn test_load_from_empty_store_is_default() {
    let store = MemoryStore::default();
    assert_eq!(TraySettings::load(&store), TraySettings::default());
}

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::default();
    custom().store(&mut store);
    assert_eq!(store.get("lightbox.location").as_deref(), Some("left"));
    assert_eq!(
        store.get("lightbox.node_filter").as_deref(),
        Some(r#"["sampler","preview"]"#)
    );
    assert_eq!(TraySettings::load(&store), custom());
}

#[test]
fn test_node_filter_with_comma_round_trips() {
    let mut settings = TraySettings::default();
    settings.set_node_hidden("SaveImage,final", true);
    settings.set_node_hidden("preview", true);

    let mut store = MemoryStore::default();
    settings.store(&mut store);
    let loaded = TraySettings::load(&store);

    assert_eq!(loaded.node_filter, vec!["SaveImage,final", "preview"]);
    assert!(loaded.is_node_hidden("SaveImage,final"));
    assert!(!loaded.is_node_hidden("SaveImage"));
}

#[test]
fn test_malformed_node_filter_is_empty() {
    let mut store = MemoryStore::default();
    store.set("lightbox.node_filter", "[unterminated".into());
    assert!(TraySettings::load(&store).node_filter.is_empty());
}

#[test]
fn test_settings_path_layout() {
    let base = std::path::Path::new("/cfg");
    assert_eq!(
        FileStore::path_in(base),
        base.join("lightbox").join("settings.toml")
    );
    if let Some(path) = FileStore::default_path() {
        assert!(path.ends_with("lightbox/settings.toml"));
    }
}

#[test]
fn test_malformed_values_fall_back() {
    let mut store = MemoryStore::default();
    store.set("lightbox.max_batches", "lots".into());
    store.set("lightbox.location", "diagonal".into());
    store.set("lightbox.visible", "false".into());
    let s = TraySettings::load(&store);
    assert_eq!(s.max_batches, TraySettings::default().max_batches);
    assert_eq!(s.location, TrayLocation::Bottom);
    assert!(!s.visible);
}

#[test]
fn test_zero_max_batches_is_raised() {
    let mut store = MemoryStore::default();
    store.set("lightbox.max_batches", "0".into());
    assert_eq!(TraySettings::load(&store).max_batches, 1);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut store = FileStore::open(&path).unwrap();
    custom().store(&mut store);
    store.flush().unwrap();
    assert!(path.exists());

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(TraySettings::load(&reopened), custom());
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("absent.toml")).unwrap();
    assert_eq!(store.get("lightbox.visible"), None);
}

#[test]
fn test_file_store_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let mut store = FileStore::open(&path).unwrap();
    store.set("lightbox.visible", "false".into());
    store.remove("lightbox.visible");
    store.flush().unwrap();
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("lightbox.visible"), None);
}

#[test]
fn test_file_store_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    assert!(FileStore::open(&path).is_err());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let text = custom().to_toml().unwrap();
    assert!(text.contains("location = \"left\""), "got: {text}");
    assert_eq!(TraySettings::from_toml(&text).unwrap(), custom());
}

#[test]
fn test_partial_toml_uses_defaults() {
    let s = TraySettings::from_toml("max_batches = 4\n").unwrap();
    assert_eq!(s.max_batches, 4);
    assert!(s.visible);
    assert!(s.newest_first);
    assert_eq!(s.location, TrayLocation::Bottom);
}

#[test]
fn test_json_serialization_uses_snake_case() {
    let json = serde_json::to_value(custom()).unwrap();
    assert_eq!(json["sort_order"], "name");
    assert_eq!(json["location"], "left");
    assert_eq!(json["node_filter"][1], "preview");
}
