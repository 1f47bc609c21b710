//! Predicados sobre materias: previas cumplidas, estado y bloqueo.

use std::collections::HashSet;

use crate::models::{Estado, Materia};

/// Previas cumplidas = TODAS las previas (sin espacios) están en `aprobadas`.
/// Sin previas, siempre es `true`.
pub fn can_take(materia: &Materia, aprobadas: &HashSet<String>) -> bool {
    materia
        .previas
        .iter()
        .all(|c| aprobadas.contains(c.trim()))
}

/// Aprobada tiene prioridad sobre cursando.
pub fn get_estado(codigo: &str, aprobadas: &HashSet<String>, cursando: &HashSet<String>) -> Estado {
    if aprobadas.contains(codigo) {
        Estado::Aprobada
    } else if cursando.contains(codigo) {
        Estado::Cursando
    } else {
        Estado::Pendiente
    }
}

/// Una materia está bloqueada cuando está pendiente y le faltan previas.
pub fn esta_bloqueada(materia: &Materia, aprobadas: &HashSet<String>, cursando: &HashSet<String>) -> bool {
    get_estado(&materia.codigo, aprobadas, cursando) == Estado::Pendiente && !can_take(materia, aprobadas)
}

/// Previas aún no aprobadas, en el orden declarado. Coincide con `can_take`:
/// la lista es vacía sólo si la materia se puede cursar.
pub fn previas_pendientes(materia: &Materia, aprobadas: &HashSet<String>) -> Vec<String> {
    materia
        .previas
        .iter()
        .map(|c| c.trim())
        .filter(|c| !aprobadas.contains(*c))
        .map(|c| c.to_string())
        .collect()
}
