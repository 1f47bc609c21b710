use std::collections::HashSet;

use crate::models::{Catalogo, Kpis};

/// Totales del catálogo contra el conjunto de aprobadas.
///
/// Sólo cuentan las materias presentes en el catálogo; códigos aprobados que
/// no existen en él se ignoran. "Cursando" no influye.
pub fn compute_kpis(catalogo: &Catalogo, aprobadas: &HashSet<String>) -> Kpis {
    let total_materias = catalogo.materias.len();
    let mut aprobadas_count = 0usize;
    let mut creditos_totales = 0.0f64;
    let mut creditos_aprobados = 0.0f64;

    for m in &catalogo.materias {
        let c = m.creditos_o_cero();
        creditos_totales += c;
        if aprobadas.contains(&m.codigo) {
            aprobadas_count += 1;
            creditos_aprobados += c;
        }
    }

    let porcentaje = if creditos_totales > 0.0 {
        ((creditos_aprobados / creditos_totales) * 100.0).round().max(0.0) as u32
    } else {
        0
    };

    Kpis {
        total_materias,
        aprobadas: aprobadas_count,
        creditos_totales,
        creditos_aprobados,
        porcentaje,
    }
}
