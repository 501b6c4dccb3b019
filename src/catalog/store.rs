use super::record::Cat;
use crate::{Result, ShelterError};
use std::collections::HashSet;
use std::path::Path;

/// Read-only, ordered set of cats loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    cats: Vec<Cat>,
}

impl RecordStore {
    /// Build a store from records, rejecting duplicate ids
    pub fn from_records(cats: Vec<Cat>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(cats.len());
        for cat in &cats {
            if !seen.insert(cat.id) {
                return Err(ShelterError::Data(format!(
                    "Duplicate cat id {} ({})",
                    cat.id, cat.name
                )));
            }
        }

        Ok(Self { cats })
    }

    /// Load the store from a JSON array on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShelterError::Data(format!("Failed to read data file {}: {}", path.display(), e))
        })?;

        let cats: Vec<Cat> = serde_json::from_str(&contents).map_err(|e| {
            ShelterError::Data(format!(
                "Failed to parse data file {}: {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::from_records(cats)?;
        tracing::info!("Loaded {} cats from {}", store.len(), path.display());
        Ok(store)
    }

    /// All records in their original order
    pub fn all(&self) -> &[Cat] {
        &self.cats
    }

    /// Look up a record by exact id
    pub fn find(&self, id: u64) -> Option<&Cat> {
        self.cats.iter().find(|cat| cat.id == id)
    }

    pub fn len(&self) -> usize {
        self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cats.is_empty()
    }
}
