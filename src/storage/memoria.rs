use std::collections::HashMap;

use crate::error::StorageError;
use crate::storage::StorageBackend;

#[derive(Debug, Default, Clone)]
pub struct MemoriaStorage {
    items: HashMap<String, String>,
    /// Si es `true`, toda escritura falla (simula cuota excedida).
    solo_lectura: bool,
}

impl MemoriaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solo_lectura() -> Self {
        MemoriaStorage { items: HashMap::new(), solo_lectura: true }
    }

    /// Inserta un valor crudo, sin pasar por `set_item`.
    pub fn con_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl StorageBackend for MemoriaStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.solo_lectura {
            return Err(StorageError::NoDisponible("cuota excedida".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.solo_lectura {
            return Err(StorageError::NoDisponible("almacenamiento de sólo lectura".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}
