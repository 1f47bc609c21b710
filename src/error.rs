//! Tipos de error del crate.
//!
//! Ninguno es fatal: quien los recibe degrada a un valor seguro (catálogo
//! vacío, progreso vacío) y sigue funcionando con el estado en memoria.

use thiserror::Error;

/// Fallo al obtener o interpretar el catálogo de materias.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP {0} al obtener el catálogo")]
    Http(u16),

    #[error("error de red: {0}")]
    Red(#[from] reqwest::Error),

    #[error("no se pudo leer '{ruta}': {fuente}")]
    Io {
        ruta: String,
        #[source]
        fuente: std::io::Error,
    },

    #[error("JSON de catálogo inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("estructura de catálogo inesperada: {0}")]
    Formato(String),
}

/// Error del backend clave-valor.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("almacenamiento no disponible: {0}")]
    NoDisponible(String),
}

/// Fallos del adaptador de persistencia del progreso.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("no se pudo guardar el estado: {0}")]
    Escritura(#[source] StorageError),

    #[error("no se pudo leer el estado: {0}")]
    Lectura(#[source] StorageError),

    #[error("estado guardado malformado: {0}")]
    Malformado(#[source] serde_json::Error),

    #[error("estado guardado malformado: se esperaba un objeto")]
    NoEsObjeto,
}

/// Transiciones de progreso rechazadas.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProgresoError {
    #[error("la materia '{0}' no existe en el catálogo")]
    MateriaDesconocida(String),

    #[error("la materia '{codigo}' está bloqueada; faltan previas: {}", .faltantes.join(", "))]
    MateriaBloqueada { codigo: String, faltantes: Vec<String> },
}
