//! File-based record storage.

use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::ResourceKind;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::ResourceStorage;

/// File-based record storage implementation.
pub struct FileRecordStorage {
    /// Base directory for records.
    records_dir: PathBuf,
    /// Mutex for coordinating file operations.
    lock: Mutex<()>,
}

impl FileRecordStorage {
    /// Create a new file record storage.
    #[must_use]
    pub fn new(records_dir: PathBuf) -> Self {
        Self {
            records_dir,
            lock: Mutex::new(()),
        }
    }

    fn kind_dir(&self, kind: ResourceKind) -> PathBuf {
        self.records_dir.join(kind.as_str())
    }

    fn record_path(&self, kind: ResourceKind, name: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{}.json", sanitize_name(name)))
    }

    fn temp_path(&self, kind: ResourceKind, name: &str) -> PathBuf {
        self.kind_dir(kind)
            .join(format!("{}.json.tmp", sanitize_name(name)))
    }

    /// Write a record to a temp file, then rename it into place.
    ///
    /// With `create_new`, an existing record is left untouched and `false` is
    /// returned. Callers hold `self.lock`, so the existence check and the
    /// rename cannot interleave with another writer in this process.
    fn write_record(
        &self,
        kind: ResourceKind,
        name: &str,
        record: &Value,
        create_new: bool,
    ) -> StorageResult<bool> {
        let path = self.record_path(kind, name);
        std::fs::create_dir_all(self.kind_dir(kind))?;

        if create_new && path.exists() {
            return Ok(false);
        }

        let temp_path = self.temp_path(kind, name);
        if let Err(e) = write_temp(&temp_path, record) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(true)
    }

    fn read_record(&self, kind: ResourceKind, name: &str) -> StorageResult<Option<Value>> {
        let path = self.record_path(kind, name);

        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        FileExt::lock_shared(&file).map_err(|e| StorageError::LockFailed(e.to_string()))?;
        let record: Value = serde_json::from_reader(&file)?;
        FileExt::unlock(&file).map_err(|e| StorageError::LockFailed(e.to_string()))?;

        Ok(Some(record))
    }

    fn read_names(&self, kind: ResourceKind) -> StorageResult<Vec<String>> {
        let dir = self.kind_dir(kind);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => names.push(stem.to_string()),
                None => tracing::warn!(path = ?path, "Skipping record with non-UTF-8 name"),
            }
        }

        names.sort();
        Ok(names)
    }

    fn remove_record(&self, kind: ResourceKind, name: &str) -> StorageResult<bool> {
        match std::fs::remove_file(self.record_path(kind, name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_temp(path: &Path, record: &Value) -> StorageResult<()> {
    let file = std::fs::File::create(path)?;
    file.lock_exclusive()
        .map_err(|e| StorageError::LockFailed(e.to_string()))?;

    let mut writer = BufWriter::new(&file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    drop(writer);

    file.sync_all()?;
    FileExt::unlock(&file).map_err(|e| StorageError::LockFailed(e.to_string()))?;
    Ok(())
}

#[async_trait]
impl ResourceStorage for FileRecordStorage {
    async fn insert(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<bool> {
        let _guard = self.lock.lock().await;
        self.write_record(kind, name, record, true)
    }

    async fn save(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        self.write_record(kind, name, record, false).map(|_| ())
    }

    async fn load(&self, kind: ResourceKind, name: &str) -> StorageResult<Option<Value>> {
        let _guard = self.lock.lock().await;
        self.read_record(kind, name)
    }

    async fn list_names(&self, kind: ResourceKind) -> StorageResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_names(kind)
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock().await;
        self.remove_record(kind, name)
    }
}

/// Sanitize a name for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn create_test_storage() -> (FileRecordStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileRecordStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_record_crud() {
        let (storage, _temp) = create_test_storage();
        let record = json!({"name": "db", "result": "abc"});

        assert!(storage.insert(ResourceKind::Password, "db", &record).await.unwrap());

        let loaded = storage.load(ResourceKind::Password, "db").await.unwrap().unwrap();
        assert_eq!(loaded, record);

        // Same name under another kind is a separate record
        assert!(storage.load(ResourceKind::String, "db").await.unwrap().is_none());

        assert_eq!(
            storage.list_names(ResourceKind::Password).await.unwrap(),
            vec!["db".to_string()]
        );

        assert!(storage.delete(ResourceKind::Password, "db").await.unwrap());
        assert!(!storage.delete(ResourceKind::Password, "db").await.unwrap());
        assert!(storage.load(ResourceKind::Password, "db").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_does_not_overwrite() {
        let (storage, _temp) = create_test_storage();

        assert!(storage.insert(ResourceKind::String, "tag", &json!({"v": 1})).await.unwrap());
        assert!(!storage.insert(ResourceKind::String, "tag", &json!({"v": 2})).await.unwrap());

        let loaded = storage.load(ResourceKind::String, "tag").await.unwrap().unwrap();
        assert_eq!(loaded["v"], 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_name_free() {
        let (storage, temp) = create_test_storage();

        // A directory where the temp file should go makes the write fail.
        let blocker = temp.path().join("string").join("tag.json.tmp");
        std::fs::create_dir_all(&blocker).unwrap();

        assert!(storage.insert(ResourceKind::String, "tag", &json!({"v": 1})).await.is_err());
        assert!(storage.load(ResourceKind::String, "tag").await.unwrap().is_none());
        assert!(storage.list_names(ResourceKind::String).await.unwrap().is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        assert!(storage.insert(ResourceKind::String, "tag", &json!({"v": 2})).await.unwrap());

        let loaded = storage.load(ResourceKind::String, "tag").await.unwrap().unwrap();
        assert_eq!(loaded["v"], 2);
        assert!(!blocker.exists());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let (storage, _temp) = create_test_storage();

        storage.save(ResourceKind::Id, "node", &json!({"v": 1})).await.unwrap();
        storage.save(ResourceKind::Id, "node", &json!({"v": 2})).await.unwrap();

        let loaded = storage.load(ResourceKind::Id, "node").await.unwrap().unwrap();
        assert_eq!(loaded["v"], 2);
    }

    #[tokio::test]
    async fn test_list_names_sorted_and_filtered() {
        let (storage, temp) = create_test_storage();

        for name in ["b", "a", "c.prod"] {
            storage.insert(ResourceKind::String, name, &json!({})).await.unwrap();
        }
        std::fs::write(temp.path().join("string").join("notes.txt"), "x").unwrap();

        assert_eq!(
            storage.list_names(ResourceKind::String).await.unwrap(),
            vec!["a".to_string(), "b".to_string(), "c.prod".to_string()]
        );
        assert!(storage.list_names(ResourceKind::Id).await.unwrap().is_empty());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("db-main_1.prod"), "db-main_1.prod");
        assert_eq!(sanitize_name("a/b c"), "a_b_c");
    }
}
