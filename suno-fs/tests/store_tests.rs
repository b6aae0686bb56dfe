//! Project store tests against a temporary data root

use std::fs;

use serde_json::{json, Map, Value};
use suno_common::{DataLayout, Error};
use suno_fs::store::{CreateProjectRequest, ProjectStore, UpdateProjectRequest};

/// Test helper: store over a fresh data root
fn setup_store() -> (tempfile::TempDir, ProjectStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let layout = DataLayout::new(dir.path().join("data"));
    layout.ensure_directories_exist().unwrap();
    (dir, ProjectStore::new(layout))
}

fn create(store: &ProjectStore, id: &str, name: &str, style: &str) {
    store
        .create_project(CreateProjectRequest {
            id: Some(id.to_string()),
            name: Some(json!(name)),
            style: Some(json!(style)),
        })
        .expect("create should succeed");
}

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_create_then_read_round_trip() {
    let (_dir, store) = setup_store();
    create(&store, "corrido-1", "Mi Corrido", "norteno");

    let project = store.get_project("corrido-1").unwrap();
    assert_eq!(project["id"], "corrido-1");
    assert_eq!(project["name"], "Mi Corrido");
    assert_eq!(project["style"], "norteno");
    assert!(project["createdAt"].is_string());
    assert_eq!(project["createdAt"], project["updatedAt"]);

    // Lyrics were never written
    assert!(!project.contains_key("rawLyrics"));
    assert!(!project.contains_key("enhancedLyrics"));
    // Directory exists but is empty
    assert_eq!(project["generations"], json!([]));
}

#[test]
fn test_create_defaults() {
    let (_dir, store) = setup_store();
    let config = store.create_project(CreateProjectRequest::default()).unwrap();

    let id = config["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 15);
    assert_eq!(config["name"], "Untitled Project");
    assert_eq!(config["style"], "");
    assert!(store.layout().project_dir(&id).join("generations").is_dir());
}

#[test]
fn test_create_with_empty_id_uses_timestamp() {
    let (_dir, store) = setup_store();
    let config = store
        .create_project(CreateProjectRequest {
            id: Some(String::new()),
            ..Default::default()
        })
        .unwrap();

    assert!(!config["id"].as_str().unwrap().is_empty());
}

#[test]
fn test_create_rejects_path_escape() {
    let (_dir, store) = setup_store();
    let err = store
        .create_project(CreateProjectRequest {
            id: Some("../outside".to_string()),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_config_file_layout() {
    let (_dir, store) = setup_store();
    create(&store, "p", "Canción", "banda");

    let path = store.layout().project_dir("p").join("config.json");
    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with(
        "{\n  \"id\": \"p\",\n  \"name\": \"Canción\",\n  \"style\": \"banda\",\n  \"createdAt\": "
    ));
}

#[test]
fn test_list_projects_requires_config() {
    let (_dir, store) = setup_store();
    create(&store, "b-project", "B", "");
    create(&store, "a-project", "A", "");
    fs::create_dir_all(store.layout().project_dir("no-config")).unwrap();
    fs::write(store.layout().projects_dir.join("stray.txt"), "x").unwrap();

    let projects = store.list_projects().unwrap();
    let ids: Vec<_> = projects.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["a-project", "b-project"]);
    assert_eq!(projects[0]["name"], "A");
}

#[test]
fn test_update_lyrics_keeps_name_and_style() {
    let (_dir, store) = setup_store();
    create(&store, "p", "Original", "tumbado");
    let before = store.get_project("p").unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .update_project(
            "p",
            UpdateProjectRequest {
                raw_lyrics: Some("verso uno".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let after = store.get_project("p").unwrap();
    assert_eq!(after["name"], "Original");
    assert_eq!(after["style"], "tumbado");
    assert_eq!(after["createdAt"], before["createdAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    assert_eq!(after["rawLyrics"], "verso uno");
    assert!(!after.contains_key("enhancedLyrics"));
}

#[test]
fn test_update_leaves_absent_lyrics_untouched() {
    let (_dir, store) = setup_store();
    create(&store, "p", "n", "s");
    store
        .update_project(
            "p",
            UpdateProjectRequest {
                raw_lyrics: Some("raw".to_string()),
                enhanced_lyrics: Some("enhanced".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    store
        .update_project(
            "p",
            UpdateProjectRequest {
                name: Some(json!("renamed")),
                ..Default::default()
            },
        )
        .unwrap();

    let project = store.get_project("p").unwrap();
    assert_eq!(project["name"], "renamed");
    assert_eq!(project["rawLyrics"], "raw");
    assert_eq!(project["enhancedLyrics"], "enhanced");
}

#[test]
fn test_update_without_config_starts_fresh() {
    let (_dir, store) = setup_store();
    fs::create_dir_all(store.layout().project_dir("bare")).unwrap();

    let config = store.update_project("bare", UpdateProjectRequest::default()).unwrap();
    assert_eq!(config["id"], "bare");
    assert_eq!(config["name"], "Untitled");
    assert_eq!(config["style"], "");
    assert!(!config.contains_key("createdAt"));
    assert!(config["updatedAt"].is_string());
}

#[test]
fn test_update_preserves_unknown_config_keys() {
    let (_dir, store) = setup_store();
    let dir = store.layout().project_dir("p");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.json"), r#"{"id":"p","name":"n","bpm":96}"#).unwrap();

    store
        .update_project(
            "p",
            UpdateProjectRequest {
                style: Some(json!("rap")),
                ..Default::default()
            },
        )
        .unwrap();

    let project = store.get_project("p").unwrap();
    assert_eq!(project["bpm"], 96);
    assert_eq!(project["style"], "rap");
    assert_eq!(project["name"], "n");
}

#[test]
fn test_update_keeps_config_key_order() {
    let (_dir, store) = setup_store();
    let dir = store.layout().project_dir("p");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.json"),
        r#"{"name":"n","id":"p","bpm":96,"style":"s","createdAt":null}"#,
    )
    .unwrap();

    store
        .update_project(
            "p",
            UpdateProjectRequest {
                enhanced_lyrics: Some("[Coro]".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let text = fs::read_to_string(dir.join("config.json")).unwrap();
    let stored: Map<String, Value> = serde_json::from_str(&text).unwrap();
    let keys: Vec<_> = stored.keys().map(String::as_str).collect();
    assert_eq!(keys, ["name", "id", "bpm", "style", "createdAt", "updatedAt"]);
    assert_eq!(stored["createdAt"], Value::Null);
    assert_eq!(stored["name"], "n");
}

#[test]
fn test_update_keeps_non_string_name() {
    let (_dir, store) = setup_store();
    let dir = store.layout().project_dir("p");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.json"), r#"{"id":"p","name":7,"style":["a","b"]}"#).unwrap();

    store
        .update_project(
            "p",
            UpdateProjectRequest {
                raw_lyrics: Some("verso".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let project = store.get_project("p").unwrap();
    assert_eq!(project["name"], 7);
    assert_eq!(project["style"], json!(["a", "b"]));
    assert_eq!(project["rawLyrics"], "verso");
}

#[test]
fn test_three_generations_numbered_in_order() {
    let (_dir, store) = setup_store();
    create(&store, "p", "n", "s");

    let attempts: Vec<u32> = (0..3)
        .map(|i| {
            store
                .append_generation("p", fields(json!({"prompt": format!("take {}", i)})))
                .unwrap()
        })
        .collect();
    assert_eq!(attempts, [1, 2, 3]);

    let project = store.get_project("p").unwrap();
    let generations = project["generations"].as_array().unwrap();
    assert_eq!(generations.len(), 3);
    for (i, record) in generations.iter().enumerate() {
        assert_eq!(record["attempt"], i as u64 + 1);
        assert_eq!(record["prompt"], format!("take {}", i));
        assert!(record["timestamp"].is_string());
    }
}

#[test]
fn test_generation_never_overwrites_existing_attempt() {
    let (_dir, store) = setup_store();
    create(&store, "p", "n", "s");
    for _ in 0..3 {
        store.append_generation("p", Map::new()).unwrap();
    }

    // Attempt 1 removed out of band: count + 1 would collide with attempt 3
    let generations_dir = store.layout().project_dir("p").join("generations");
    fs::remove_file(generations_dir.join("attempt-1.json")).unwrap();
    let attempt_3_before = fs::read_to_string(generations_dir.join("attempt-3.json")).unwrap();

    let next = store.append_generation("p", fields(json!({"late": true}))).unwrap();
    assert_eq!(next, 4);
    assert_eq!(
        fs::read_to_string(generations_dir.join("attempt-3.json")).unwrap(),
        attempt_3_before
    );
}

#[test]
fn test_generation_recreates_missing_directory() {
    let (_dir, store) = setup_store();
    create(&store, "p", "n", "s");
    fs::remove_dir(store.layout().project_dir("p").join("generations")).unwrap();

    assert!(!store.get_project("p").unwrap().contains_key("generations"));
    assert_eq!(store.append_generation("p", Map::new()).unwrap(), 1);
    assert!(store.get_project("p").unwrap().contains_key("generations"));
}

#[test]
fn test_missing_project_is_not_found() {
    let (_dir, store) = setup_store();

    assert!(matches!(store.get_project("ghost"), Err(Error::NotFound(_))));
    assert!(matches!(
        store.update_project("ghost", UpdateProjectRequest::default()),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        store.append_generation("ghost", Map::new()),
        Err(Error::NotFound(_))
    ));
    // Nothing was created as a side effect
    assert!(!store.layout().project_dir("ghost").exists());
}

#[test]
fn test_list_styles_skips_folders_without_metadata() {
    let (_dir, store) = setup_store();
    let styles = &store.layout().styles_dir;
    fs::create_dir_all(styles.join("norteno")).unwrap();
    fs::write(
        styles.join("norteno").join("metadata.json"),
        r#"{"name": "Norteño", "bpm": 110}"#,
    )
    .unwrap();
    fs::create_dir_all(styles.join("audio-only")).unwrap();
    fs::write(styles.join("catalog.json"), "{}").unwrap();

    let listed = store.list_styles().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], "norteno");
    assert_eq!(listed[0]["name"], "Norteño");
    assert_eq!(listed[0]["bpm"], 110);
}

#[test]
fn test_prompt_template() {
    let (_dir, store) = setup_store();
    assert!(matches!(store.read_prompt_template(), Err(Error::NotFound(_))));

    fs::write(store.layout().prompt_template_path(), "Improve these lyrics:\n").unwrap();
    assert_eq!(store.read_prompt_template().unwrap(), "Improve these lyrics:\n");
}
