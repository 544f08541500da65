use crate::core::traits::StorageBackend;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-process store; clones share the same contents
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageBackend {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
