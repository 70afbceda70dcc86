//! pocketbook-storage-json
//!
//! File-backed [`KeyValueStore`]: one JSON document per key under a data directory.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use pocketbook_core::{CoreError, KeyValueStore};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<data_dir>/<canonical key>.json`.
///
/// Writes are staged in a `.tmp` sibling and renamed into place, so a failed write leaves the
/// previous file untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|err| {
            CoreError::StorageWrite(format!("cannot create {}: {err}", data_dir.display()))
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `key`. Keys with the same [`canonical_name`] share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", canonical_name(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CoreError::StorageRead(format!(
                "{}: {err}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|err| {
                // Best effort: the staging file may not exist or may not be a file.
                let _ = fs::remove_file(&tmp);
                tracing::warn!(path = %path.display(), error = %err, "write failed");
                CoreError::StorageWrite(format!("{}: {err}", path.display()))
            })?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CoreError::StorageWrite(format!(
                "{}: {err}",
                path.display()
            ))),
        }
    }
}

/// Lowercases `key` and replaces anything outside `[a-z0-9]` with `_`.
/// `@pocketbook:transactions` becomes `pocketbook_transactions`.
///
/// The mapping is lossy: `@pocketbook:transactions` and `Pocketbook.Transactions` name the
/// same file, so they address the same stored value. Pick keys that differ in their
/// alphanumeric characters.
pub fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        "store".into()
    } else {
        trimmed.to_string()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
