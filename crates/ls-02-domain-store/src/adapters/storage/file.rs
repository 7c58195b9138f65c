use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-backed key-value store.
///
/// The whole map lives in memory and is rewritten to a single file after
/// every write. The file is replaced atomically (temp file, fsync, rename),
/// so a crash leaves either the old or the new contents, never a mix.
///
/// Format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`, keys in
/// ascending order.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Opens the store at `path`.
    ///
    /// A missing or unreadable file yields an empty store. A truncated file
    /// keeps every complete record before the damage.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let data = match Self::load_from_file(&path) {
            Ok(data) => {
                info!(path = %path.display(), keys = data.len(), "Opened storage file");
                data
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable storage file, starting empty");
                BTreeMap::new()
            }
        };

        Self { data, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut file = std::fs::File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let mut data = BTreeMap::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let Some((key, next)) = read_record(&bytes, cursor) else {
                warn!(path = %path.display(), offset = cursor, "Truncated record in storage file");
                break;
            };
            let Some((value, next)) = read_record(&bytes, next) else {
                warn!(path = %path.display(), offset = next, "Truncated record in storage file");
                break;
            };
            data.insert(key.to_vec(), value.to_vec());
            cursor = next;
        }

        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            write_record(&mut bytes, key)?;
            write_record(&mut bytes, value)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Applies `mutate` to a copy, persists it, and only then swaps it in.
    fn commit(
        &mut self,
        mutate: impl FnOnce(&mut BTreeMap<Vec<u8>, Vec<u8>>),
    ) -> Result<(), KVStoreError> {
        let previous = self.data.clone();
        mutate(&mut self.data);
        if let Err(e) = self.save_to_file() {
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn read_record(bytes: &[u8], cursor: usize) -> Option<(&[u8], usize)> {
    let len_end = cursor.checked_add(4)?;
    let len = u32::from_le_bytes(bytes.get(cursor..len_end)?.try_into().ok()?) as usize;
    let end = len_end.checked_add(len)?;
    Some((bytes.get(len_end..end)?, end))
}

fn write_record(out: &mut Vec<u8>, record: &[u8]) -> Result<(), KVStoreError> {
    let len = u32::try_from(record.len()).map_err(|_| KVStoreError::IOError {
        message: format!("record of {} bytes exceeds the file format limit", record.len()),
    })?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(record);
    Ok(())
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.commit(|data| {
            data.insert(key.to_vec(), value.to_vec());
        })
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.commit(|data| {
            data.remove(key);
        })
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.commit(|data| {
            for BatchOperation::Put { key, value } in operations {
                data.insert(key, value);
            }
        })
    }
}
