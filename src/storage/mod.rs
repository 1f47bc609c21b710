//! Capa de almacenamiento clave-valor y adaptador de persistencia del progreso.
//!
//! `StorageBackend` es el equivalente de un localStorage: guarda cadenas bajo
//! una clave. Hay tres implementaciones:
//! - `ArchivoStorage`: un JSON en disco con todas las claves
//! - `SqliteStorage`: una tabla `kv` en SQLite
//! - `MemoriaStorage`: sólo en memoria (tests, o modo sin persistencia)

mod archivo;
mod memoria;
pub mod progreso;
mod sql;

pub use archivo::ArchivoStorage;
pub use memoria::MemoriaStorage;
pub use progreso::{cargar_progreso, escribir_progreso, guardar_progreso, reset_progreso, EstadoPersistido};
pub use sql::SqliteStorage;

use crate::error::StorageError;

/// Clave fija bajo la que se guarda el progreso.
pub const CLAVE_ESTADO: &str = "grilla-admin-v1";

/// Backend clave-valor. Las implementaciones deben ser `Send` para poder vivir
/// dentro del estado compartido del servidor.
pub trait StorageBackend: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
