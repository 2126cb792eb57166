//! Durable key-value storage for dismissal flags.
//!
//! The gatekeeper only needs boolean flags under a fixed namespace. The trait
//! keeps it independent of the backend: the CLI uses a JSON file in the user
//! config dir, tests use the in-memory store.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde_json::{Map, Value};

/// Namespace all flags live under in the persisted file.
pub const NAMESPACE: &str = "plugin.printwatch";

/// Boolean flag storage. No transactional guarantees; callers treat read
/// failures as absent.
pub trait KvStore: Send + Sync {
    fn get_flag(&self, key: &str) -> Result<Option<bool>>;
    fn set_flag(&self, key: &str, value: bool) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        (**self).get_flag(key)
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        (**self).set_flag(key, value)
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        (**self).get_flag(key)
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        (**self).set_flag(key, value)
    }
}

/// JSON-file backed store.
///
/// The file holds one object per namespace, e.g.
/// `{"plugin.printwatch": {"ignored.server.error": true}}`.
/// Writes take an exclusive lock and replace the file atomically via a temp
/// file, so concurrent processes cannot tear it.
pub struct FileStore {
    path: PathBuf,
    namespace: String,
}

impl FileStore {
    /// Default location: `~/.config/printwatch/dismissed.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("printwatch")
            .join("dismissed.json")
    }

    pub fn new() -> Self {
        Self::at_path(Self::default_path())
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            namespace: NAMESPACE.to_string(),
        }
    }

    /// All flags currently persisted under the namespace.
    pub fn entries(&self) -> Result<Vec<(String, bool)>> {
        let mut entries: Vec<(String, bool)> = self
            .load()?
            .into_iter()
            .filter_map(|(key, value)| value.as_bool().map(|b| (key, b)))
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let root: Value = serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", self.path.display()))?;

        Ok(root
            .get(&self.namespace)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, flags: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut root = Map::new();
        root.insert(self.namespace.clone(), Value::Object(flags));

        // write to a temp file, then rename into place
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, serde_json::to_string_pretty(&Value::Object(root))?)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        Ok(())
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_path = self.path.with_extension("lock");
        let lock_file = File::create(&lock_path)
            .with_context(|| format!("failed to create {}", lock_path.display()))?;
        lock_file.lock_exclusive()?;
        let result = f();
        let _ = lock_file.unlock();
        result
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for FileStore {
    fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.load()?.get(key).and_then(Value::as_bool))
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.with_lock(|| {
            let mut flags = self.load()?;
            flags.insert(key.to_string(), Value::Bool(value));
            self.save(flags)
        })
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        let flags = self.flags.lock().expect("flag map poisoned");
        Ok(flags.get(key).copied())
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        let mut flags = self.flags.lock().expect("flag map poisoned");
        flags.insert(key.to_string(), value);
        Ok(())
    }
}

/// Allow tests to poke at the file directly.
impl FileStore {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
