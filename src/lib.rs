// Biblioteca raíz del crate `grilla`.
// Grilla de materias: catálogo de la carrera, progreso del usuario
// (aprobadas / cursando), filtros del listado y avance en créditos.
pub mod algorithm;
pub mod app;
pub mod catalogo;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod storage;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
