//! Bounded list of recently searched cities.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::StoreError;

pub const MAX_RECENT_CITIES: usize = 5;

/// Move `name` to the front of `list`, dropping case-insensitive duplicates
/// and anything beyond [`MAX_RECENT_CITIES`].
pub fn push_recent(list: &mut Vec<String>, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        return;
    }

    let lowered = name.to_lowercase();
    list.retain(|c| c.to_lowercase() != lowered);
    list.insert(0, name.to_string());
    list.truncate(MAX_RECENT_CITIES);
}

/// Persistent storage for the recent-city list.
pub trait RecentStore {
    /// A missing or unreadable list is an empty one.
    fn load(&self) -> Vec<String>;

    fn save(&mut self, list: &[String]) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    list: Vec<String>,
}

impl MemoryStore {
    pub fn with_cities(cities: &[&str]) -> Self {
        Self {
            list: cities.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RecentStore for MemoryStore {
    fn load(&self) -> Vec<String> {
        self.list.clone()
    }

    fn save(&mut self, list: &[String]) -> Result<(), StoreError> {
        self.list = list.to_vec();
        Ok(())
    }
}

/// Recent cities kept as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentStore for JsonFileStore {
    fn load(&self) -> Vec<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<String>>>(&contents) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring corrupt recent-city list {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    fn save(&mut self, list: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(list)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
