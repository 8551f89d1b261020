//! # Role Store
//!
//! Client-local durable key-value storage for the selected role id.
//!
//! An entry survives across sessions until explicitly changed. There is no
//! schema versioning: a value the catalog does not recognise is treated as
//! absent by the resolver, not here.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use super::errors::{AccessError, AccessResult};

/// Default key the selected role id is stored under
pub const DEFAULT_STORAGE_KEY: &str = "selectedRole";

/// Key-value storage backing the selected role
pub trait RoleStore {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> AccessResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> AccessResult<()>;
}

impl<S: RoleStore + ?Sized> RoleStore for &S {
    fn load(&self, key: &str) -> AccessResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> AccessResult<()> {
        (**self).save(key, value)
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryRoleStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl RoleStore for MemoryRoleStore {
    fn load(&self, key: &str) -> AccessResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AccessError::Storage("role store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> AccessResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AccessError::Storage("role store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parsed state file
enum FileContents {
    Entries(Map<String, Value>),
    /// Content that is not a JSON object
    Corrupt(String),
}

/// JSON-file-backed store.
///
/// The file holds one JSON object mapping keys to plain strings, e.g.
/// `{"selectedRole":"legad"}`. Keys written by other tools are preserved
/// across saves. A missing file reads as empty. Writes go to a sibling
/// `<file>.tmp` that is renamed into place.
#[derive(Debug, Clone)]
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_contents(&self) -> AccessResult<FileContents> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(FileContents::Entries(Map::new()))
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(FileContents::Entries(Map::new()));
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => Ok(FileContents::Entries(entries)),
            Ok(other) => Ok(FileContents::Corrupt(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Ok(FileContents::Corrupt(e.to_string())),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> AccessResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.tmp_path();

        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RoleStore for FileRoleStore {
    fn load(&self, key: &str) -> AccessResult<Option<String>> {
        let entries = match self.read_contents()? {
            FileContents::Entries(entries) => entries,
            FileContents::Corrupt(reason) => {
                return Err(AccessError::Storage(format!(
                    "corrupt role store {}: {}",
                    self.path.display(),
                    reason
                )))
            }
        };

        match entries.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(AccessError::Storage(format!(
                "entry {} in {} is {}, expected a string",
                key,
                self.path.display(),
                json_kind(other)
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> AccessResult<()> {
        // Unparseable content is replaced; read failures are not
        let mut entries = match self.read_contents()? {
            FileContents::Entries(entries) => entries,
            FileContents::Corrupt(_) => Map::new(),
        };
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryRoleStore::new();
        assert_eq!(store.load(DEFAULT_STORAGE_KEY).unwrap(), None);

        store.save(DEFAULT_STORAGE_KEY, "legad").unwrap();
        assert_eq!(
            store.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("legad")
        );
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryRoleStore::new();
        let other = store.clone();

        store.save("k", "v").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileRoleStore::new(dir.path().join("state.json"));

        assert_eq!(store.load(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        FileRoleStore::new(&path).save(DEFAULT_STORAGE_KEY, "j3-ops").unwrap();

        let reopened = FileRoleStore::new(&path);
        assert_eq!(
            reopened.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("j3-ops")
        );
    }

    #[test]
    fn test_file_store_writes_plain_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        FileRoleStore::new(&path).save(DEFAULT_STORAGE_KEY, "legad").unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "selectedRole": "legad" }));
    }

    #[test]
    fn test_file_store_reads_existing_state_and_keeps_foreign_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"selectedRole":"legad","theme":"dark","layout":{"cols":3}}"#)
            .unwrap();

        let store = FileRoleStore::new(&path);
        assert_eq!(
            store.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("legad")
        );

        store.save(DEFAULT_STORAGE_KEY, "j2-intel").unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["selectedRole"], "j2-intel");
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["layout"]["cols"], 3);
    }

    #[test]
    fn test_file_store_non_string_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"selectedRole":42}"#).unwrap();

        let store = FileRoleStore::new(&path);
        assert!(matches!(
            store.load(DEFAULT_STORAGE_KEY),
            Err(AccessError::Storage(_))
        ));
    }

    #[test]
    fn test_file_store_failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // A directory in place of the state file makes the rename fail
        let path = dir.path().join("state.json");
        fs::create_dir(&path).unwrap();

        let store = FileRoleStore::new(&path);
        assert!(store.write_entries(&Map::new()).is_err());
        assert!(!dir.path().join("state.json.tmp").exists());

        assert!(store.save(DEFAULT_STORAGE_KEY, "legad").is_err());
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_file_stores_with_shared_stem_use_distinct_temp_files() {
        let dir = tempdir().unwrap();
        let json = FileRoleStore::new(dir.path().join("x.json"));
        let yaml = FileRoleStore::new(dir.path().join("x.yaml"));

        assert_ne!(json.tmp_path(), yaml.tmp_path());
        assert_eq!(json.tmp_path(), dir.path().join("x.json.tmp"));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let store = FileRoleStore::new(dir.path().join("state.json"));

        store.save("theme", "dark").unwrap();
        store.save(DEFAULT_STORAGE_KEY, "legad").unwrap();

        assert_eq!(store.load("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileRoleStore::new(&path);
        assert!(matches!(
            store.load(DEFAULT_STORAGE_KEY),
            Err(AccessError::Storage(_))
        ));

        // Saving replaces unparseable content
        store.save(DEFAULT_STORAGE_KEY, "j4-log").unwrap();
        assert_eq!(
            store.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("j4-log")
        );
    }

    #[test]
    fn test_file_store_non_object_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[\"legad\"]").unwrap();

        let store = FileRoleStore::new(&path);
        assert!(store.load(DEFAULT_STORAGE_KEY).is_err());

        store.save(DEFAULT_STORAGE_KEY, "j5-plans").unwrap();
        assert_eq!(
            store.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("j5-plans")
        );
    }
}
