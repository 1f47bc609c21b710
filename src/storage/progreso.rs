//! Adaptador de persistencia del progreso del usuario.
//!
//! El formato guardado es `{"aprobadas": [...], "cursando": [...]}`. Un fallo
//! al escribir se registra y se ignora: el estado en memoria manda. Un valor
//! ausente o malformado se lee como progreso vacío.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::models::ProgresoUsuario;
use crate::storage::StorageBackend;

/// Forma serializada del progreso.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoPersistido {
    #[serde(default)]
    pub aprobadas: Vec<String>,
    #[serde(default)]
    pub cursando: Vec<String>,
}

impl From<&ProgresoUsuario> for EstadoPersistido {
    fn from(p: &ProgresoUsuario) -> Self {
        let mut aprobadas: Vec<String> = p.aprobadas.iter().cloned().collect();
        let mut cursando: Vec<String> = p.cursando.iter().cloned().collect();
        aprobadas.sort();
        cursando.sort();
        EstadoPersistido { aprobadas, cursando }
    }
}

impl From<EstadoPersistido> for ProgresoUsuario {
    fn from(e: EstadoPersistido) -> Self {
        ProgresoUsuario {
            aprobadas: e.aprobadas.into_iter().collect(),
            cursando: e.cursando.into_iter().collect(),
        }
    }
}

/// Versión que propaga el error, para quien necesite informarlo.
pub fn escribir_progreso<S: StorageBackend + ?Sized>(
    storage: &mut S,
    key: &str,
    progreso: &ProgresoUsuario,
) -> Result<(), PersistenceError> {
    let obj = EstadoPersistido::from(progreso);
    // Vec<String> siempre serializa
    let text = serde_json::to_string(&obj).map_err(PersistenceError::Malformado)?;
    storage.set_item(key, &text).map_err(PersistenceError::Escritura)
}

/// Guarda el progreso; nunca falla hacia el llamador. Devuelve si se pudo escribir.
pub fn guardar_progreso<S: StorageBackend + ?Sized>(storage: &mut S, key: &str, progreso: &ProgresoUsuario) -> bool {
    match escribir_progreso(storage, key, progreso) {
        Ok(()) => {
            debug!(
                "progreso guardado en '{}' ({} aprobadas, {} cursando)",
                key,
                progreso.aprobadas.len(),
                progreso.cursando.len()
            );
            true
        }
        Err(e) => {
            warn!("No se pudo guardar el estado: {}", e);
            false
        }
    }
}

/// Lee y valida el valor guardado.
pub fn leer_progreso<S: StorageBackend + ?Sized>(storage: &S, key: &str) -> Result<Option<ProgresoUsuario>, PersistenceError> {
    let raw = match storage.get_item(key).map_err(PersistenceError::Lectura)? {
        Some(r) if !r.trim().is_empty() => r,
        _ => return Ok(None),
    };
    let valor: serde_json::Value = serde_json::from_str(&raw).map_err(PersistenceError::Malformado)?;
    // serde acepta también una secuencia para un struct; sólo vale el objeto
    if !valor.is_object() {
        return Err(PersistenceError::NoEsObjeto);
    }
    let obj: EstadoPersistido = serde_json::from_value(valor).map_err(PersistenceError::Malformado)?;
    Ok(Some(obj.into()))
}

/// Progreso previo, o vacío si no hay o no se puede interpretar.
pub fn cargar_progreso<S: StorageBackend + ?Sized>(storage: &S, key: &str) -> ProgresoUsuario {
    match leer_progreso(storage, key) {
        Ok(Some(p)) => p,
        Ok(None) => ProgresoUsuario::nuevo(),
        Err(e) => {
            warn!("No se pudo cargar el estado: {}", e);
            ProgresoUsuario::nuevo()
        }
    }
}

/// Borra la clave persistida y vacía ambos conjuntos.
///
/// Los conjuntos en memoria se limpian aunque el borrado falle.
pub fn reset_progreso<S: StorageBackend + ?Sized>(storage: &mut S, key: &str, progreso: &mut ProgresoUsuario) {
    if let Err(e) = storage.remove_item(key) {
        warn!("No se pudo borrar el estado guardado: {}", e);
    }
    progreso.limpiar();
}
