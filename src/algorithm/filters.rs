//! Filtros y orden del listado de materias.
//!
//! Los criterios llegan como texto crudo desde los controles de la interfaz;
//! un criterio vacío no filtra. Ningún campo malformado produce error: la
//! materia simplemente no coincide.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::algorithm::predicados::get_estado;
use crate::models::{activo, Catalogo, CriteriosFiltro, Materia, OpcionesFiltro};

/// Conjunción de todos los criterios activos.
pub fn matches_filters(
    materia: &Materia,
    criterios: &CriteriosFiltro,
    aprobadas: &HashSet<String>,
    cursando: &HashSet<String>,
) -> bool {
    if let Some(q) = activo(&criterios.q) {
        let q = q.trim().to_lowercase();
        if !q.is_empty()
            && !(materia.nombre.to_lowercase().contains(&q) || materia.codigo.to_lowercase().contains(&q))
        {
            return false;
        }
    }

    if let Some(fa) = activo(&criterios.anio) {
        if !coincide_numero(materia.anio, fa) {
            return false;
        }
    }
    if let Some(fs) = activo(&criterios.semestre) {
        if !coincide_numero(materia.semestre, fs) {
            return false;
        }
    }
    if let Some(far) = activo(&criterios.area) {
        if materia.area != far {
            return false;
        }
    }
    if let Some(ft) = activo(&criterios.tipo) {
        match materia.tipo {
            Some(t) if t.as_str() == ft => {}
            _ => return false,
        }
    }

    if let Some(fe) = activo(&criterios.estado) {
        if get_estado(&materia.codigo, aprobadas, cursando).as_str() != fe {
            return false;
        }
    }
    true
}

/// Compara la forma textual del campo contra el valor crudo del filtro.
fn coincide_numero(campo: Option<i64>, filtro: &str) -> bool {
    match campo {
        Some(v) => v.to_string() == filtro,
        None => false,
    }
}

/// Año, luego semestre, luego código. Años o semestres ausentes van al final.
pub fn comparar_materias(a: &Materia, b: &Materia) -> Ordering {
    let aa = a.anio.unwrap_or(i64::MAX);
    let ab = b.anio.unwrap_or(i64::MAX);
    let sa = a.semestre.unwrap_or(i64::MAX);
    let sb = b.semestre.unwrap_or(i64::MAX);
    aa.cmp(&ab)
        .then(sa.cmp(&sb))
        .then_with(|| a.codigo.cmp(&b.codigo))
}

pub fn ordenar_materias(materias: &mut [&Materia]) {
    materias.sort_by(|a, b| comparar_materias(a, b));
}

/// Materias del catálogo que pasan los filtros, ya ordenadas.
pub fn filtrar_catalogo<'a>(
    catalogo: &'a Catalogo,
    criterios: &CriteriosFiltro,
    aprobadas: &HashSet<String>,
    cursando: &HashSet<String>,
) -> Vec<&'a Materia> {
    let mut items: Vec<&Materia> = catalogo
        .materias
        .iter()
        .filter(|m| matches_filters(m, criterios, aprobadas, cursando))
        .collect();
    ordenar_materias(&mut items);
    items
}

/// Años y semestres distintos (ordenados) y la lista de áreas.
pub fn opciones_filtros(catalogo: &Catalogo) -> OpcionesFiltro {
    let mut anios: Vec<i64> = catalogo.materias.iter().filter_map(|m| m.anio).collect();
    anios.sort_unstable();
    anios.dedup();

    let mut semestres: Vec<i64> = catalogo.materias.iter().filter_map(|m| m.semestre).collect();
    semestres.sort_unstable();
    semestres.dedup();

    OpcionesFiltro {
        anios,
        semestres,
        areas: catalogo.areas.clone(),
    }
}
