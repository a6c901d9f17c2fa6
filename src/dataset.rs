//! Record store and data asset loading.
//!
//! The store is built once at startup from a JSON asset and never mutated afterwards, so
//! it is shared read-only (behind an `Arc`) by everything that filters or renders it.
//! Loading goes through a [`RecordSource`]: either a file on disk or the table bundled
//! into the binary.

pub mod record;
pub mod validation;

use crate::error::{DdError, Result};
use async_trait::async_trait;
use record::{DiveRecord, RawDive};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use record::{parse_dd, Board, Event, Position, ALL_GROUPS};

/// Degree-of-difficulty table shipped with the binary.
pub const BUNDLED_DATA: &str = include_str!("../data/dd_table.json");

/// Immutable collection of derived dive records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DiveRecord>,
}

impl RecordStore {
    /// Derive every raw record, assigning ids in load order.
    pub fn from_raw(raw: Vec<RawDive>) -> Self {
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(id, raw)| DiveRecord::derive(raw, id))
            .collect();
        Self { records }
    }

    /// Decode a data asset.
    ///
    /// Accepts either `{"data": [...]}` or a bare top-level array of records.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        let entries = match document {
            Value::Object(mut map) => map
                .remove("data")
                .ok_or_else(|| DdError::data("expected a top-level \"data\" array"))?,
            array @ Value::Array(_) => array,
            _ => {
                return Err(DdError::data(
                    "expected an object with a \"data\" array or a bare array",
                ))
            }
        };

        let raw: Vec<RawDive> = serde_json::from_value(entries)?;
        Ok(Self::from_raw(raw))
    }

    pub fn records(&self) -> &[DiveRecord] {
        &self.records
    }

    /// Look up a record by its load-order id.
    pub fn get(&self, id: usize) -> Option<&DiveRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Where a record store comes from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read and derive the full store.
    async fn load(&self) -> Result<RecordStore>;

    /// Short name shown in the status line.
    fn name(&self) -> String;
}

/// Data asset read from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn load(&self) -> Result<RecordStore> {
        validation::validate_data_path(&self.path)?;
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DdError::file_error(format!("Failed to read {}", self.path.display()), e))?;
        RecordStore::from_json(&text)
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

/// The table compiled into the binary.
pub struct BundledSource;

#[async_trait]
impl RecordSource for BundledSource {
    async fn load(&self) -> Result<RecordStore> {
        RecordStore::from_json(BUNDLED_DATA)
    }

    fn name(&self) -> String {
        "bundled DD table".to_string()
    }
}

/// Picks the record source for the command line and loads it.
pub struct DatasetFactory;

impl DatasetFactory {
    /// Load the asset at `path`, or the bundled table when no path is given.
    ///
    /// Returns the store together with the source name for display.
    pub async fn create(path: Option<&Path>) -> Result<(RecordStore, String)> {
        let source: Box<dyn RecordSource> = match path {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(BundledSource),
        };

        let store = source.load().await?;
        log::info!("loaded {} dive records from {}", store.len(), source.name());
        Ok((store, source.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DIVES: &str = r#"{"data": [
        {"Event": "Springboard", "Board": "1m", "Group": 1, "Dive Number": 101,
         "Dive Description": "Forward Dive", "A": "1.4", "B": "1.3", "C": "1.2", "D": "-"},
        {"Event": "Platform", "Board": "10m", "Group": 6, "Dive Number": 612,
         "Dive Description": "Armstand Forward Somersault", "A": "x", "B": "1.8", "C": "1.7", "D": "-"}
    ]}"#;

    #[test]
    fn decodes_wrapped_document() {
        let store = RecordStore::from_json(TWO_DIVES).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().dive_number(), 101);
        assert_eq!(store.get(1).unwrap().id(), 1);
        assert_eq!(store.get(1).unwrap().board(), Board::TenMetre);
    }

    #[test]
    fn decodes_bare_array() {
        let bare = r#"[{"Event": "Springboard", "Board": "3m", "Group": 2, "Dive Number": 201,
            "Dive Description": "Back Dive", "A": "2.0", "B": "1.9", "C": "1.8", "D": "-"}]"#;
        let store = RecordStore::from_json(bare).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(
            RecordStore::from_json(r#"{"rows": []}"#),
            Err(DdError::DataError { .. })
        ));
        assert!(matches!(
            RecordStore::from_json("42"),
            Err(DdError::DataError { .. })
        ));
        assert!(matches!(
            RecordStore::from_json(r#"{"data": [{"Event": "Pool"}]}"#),
            Err(DdError::DataError { .. })
        ));
    }

    #[test]
    fn bundled_table_loads() {
        let store = RecordStore::from_json(BUNDLED_DATA).unwrap();
        assert!(!store.is_empty());
        assert!(store
            .records()
            .iter()
            .all(|r| r.board().event() == r.event()));
    }

    #[tokio::test]
    async fn factory_defaults_to_bundled_table() {
        let (store, name) = DatasetFactory::create(None).await.unwrap();
        assert!(!store.is_empty());
        assert_eq!(name, "bundled DD table");
    }
}
