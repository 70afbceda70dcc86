use std::{collections::HashMap, sync::Mutex};

use crate::CoreError;

/// Flat string key-value medium with no native query or append primitive.
///
/// Implementations report read failures as [`CoreError::StorageRead`] and write or removal
/// failures as [`CoreError::StorageWrite`]. A failed `write` must leave the previous value intact.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

/// In-process medium. Writes can be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    write_fault: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw payload.
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.into(), value.into());
        }
        self
    }

    /// Makes every subsequent `write`/`remove` fail with `reason` until cleared with `None`.
    pub fn set_write_fault(&self, reason: Option<&str>) {
        if let Ok(mut fault) = self.write_fault.lock() {
            *fault = reason.map(str::to_string);
        }
    }

    /// Raw payload currently held under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn check_write_fault(&self) -> Result<(), CoreError> {
        let fault = self
            .write_fault
            .lock()
            .map_err(|err| CoreError::StorageWrite(err.to_string()))?;
        match fault.as_ref() {
            Some(reason) => Err(CoreError::StorageWrite(reason.clone())),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let items = self
            .items
            .lock()
            .map_err(|err| CoreError::StorageRead(err.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.check_write_fault()?;
        let mut items = self
            .items
            .lock()
            .map_err(|err| CoreError::StorageWrite(err.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.check_write_fault()?;
        let mut items = self
            .items
            .lock()
            .map_err(|err| CoreError::StorageWrite(err.to_string()))?;
        items.remove(key);
        Ok(())
    }
}
