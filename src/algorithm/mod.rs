//! Lógica pura sobre el catálogo: predicados, filtros y agregados.
//!
//! Nada aquí muta estado ni hace I/O; `app` llama a estas funciones después
//! de cada transición para derivar la vista.

pub mod filters;
pub mod kpis;
pub mod predicados;

pub use filters::{comparar_materias, filtrar_catalogo, matches_filters, opciones_filtros, ordenar_materias};
pub use kpis::compute_kpis;
pub use predicados::{can_take, esta_bloqueada, get_estado, previas_pendientes};
