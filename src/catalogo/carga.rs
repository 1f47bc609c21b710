//! Ciclo de vida de la carga del catálogo.
//!
//! `NoCargado → Cargando → {Cargado | Fallido}`. Cada intento recibe un
//! ticket con número de secuencia; sólo el resultado del ticket más reciente
//! se aplica, los anteriores se descartan aunque lleguen después.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::error::LoadError;
use crate::models::Catalogo;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum EstadoCarga {
    NoCargado,
    Cargando { secuencia: u64, desde: DateTime<Utc> },
    Cargado { secuencia: u64, en: DateTime<Utc>, materias: usize },
    Fallido { secuencia: u64, en: DateTime<Utc>, error: String },
}

impl EstadoCarga {
    pub fn es_fallido(&self) -> bool {
        matches!(self, EstadoCarga::Fallido { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketCarga(u64);

/// Qué pasó con el resultado entregado a `ControlCarga::completar`.
#[derive(Debug)]
pub enum ResultadoCarga {
    Aplicado(Catalogo),
    /// Falló: el catálogo debe quedar vacío.
    Fallido(LoadError),
    /// Llegó tarde: existe un intento más reciente.
    Descartado { secuencia: u64, vigente: u64 },
}

#[derive(Debug)]
pub struct ControlCarga {
    ultima: u64,
    estado: EstadoCarga,
}

impl Default for ControlCarga {
    fn default() -> Self {
        ControlCarga { ultima: 0, estado: EstadoCarga::NoCargado }
    }
}

impl ControlCarga {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estado(&self) -> &EstadoCarga {
        &self.estado
    }

    pub fn iniciar(&mut self) -> TicketCarga {
        self.ultima += 1;
        self.estado = EstadoCarga::Cargando { secuencia: self.ultima, desde: Utc::now() };
        TicketCarga(self.ultima)
    }

    pub fn es_vigente(&self, ticket: TicketCarga) -> bool {
        ticket.0 == self.ultima
    }

    /// Registra el resultado de un intento y decide si aplicarlo.
    pub fn completar(&mut self, ticket: TicketCarga, resultado: Result<Catalogo, LoadError>) -> ResultadoCarga {
        if !self.es_vigente(ticket) {
            warn!(
                "resultado de carga #{} descartado: la carga vigente es #{}",
                ticket.0, self.ultima
            );
            return ResultadoCarga::Descartado { secuencia: ticket.0, vigente: self.ultima };
        }

        match resultado {
            Ok(catalogo) => {
                info!("carga #{} completada ({} materias)", ticket.0, catalogo.materias.len());
                self.estado = EstadoCarga::Cargado {
                    secuencia: ticket.0,
                    en: Utc::now(),
                    materias: catalogo.materias.len(),
                };
                ResultadoCarga::Aplicado(catalogo)
            }
            Err(e) => {
                warn!("carga #{} fallida: {}", ticket.0, e);
                self.estado = EstadoCarga::Fallido { secuencia: ticket.0, en: Utc::now(), error: e.to_string() };
                ResultadoCarga::Fallido(e)
            }
        }
    }
}
