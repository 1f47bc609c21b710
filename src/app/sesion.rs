use std::sync::{Mutex, MutexGuard};

use crate::app::EstadoApp;
use crate::catalogo::{cargar_catalogo, ResultadoCarga};
use crate::error::ProgresoError;
use crate::models::{CriteriosFiltro, Tipo, Vista};

/// Filtros rápidos: sólo obligatorias, sólo opcionales, o limpiar todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroRapido {
    Obligatorias,
    Opcionales,
    Limpiar,
}

impl FiltroRapido {
    pub fn parse(s: &str) -> Option<FiltroRapido> {
        match s.to_lowercase().as_str() {
            "ob" => Some(FiltroRapido::Obligatorias),
            "op" => Some(FiltroRapido::Opcionales),
            "limpiar" | "clear" => Some(FiltroRapido::Limpiar),
            _ => None,
        }
    }
}

/// Estado de una sesión de uso: el estado de la aplicación, los criterios de
/// filtro actuales (efímeros) y la última vista calculada.
///
/// La vista sólo cambia en `refrescar`; cambiar criterios no la recalcula,
/// eso lo decide quien llama (inmediato o diferido).
#[derive(Debug)]
pub struct Sesion {
    app: EstadoApp,
    criterios: CriteriosFiltro,
    vista: Vista,
    refrescos: u64,
}

impl Sesion {
    pub fn new(app: EstadoApp) -> Self {
        let criterios = CriteriosFiltro::default();
        let vista = app.vista(&criterios);
        Sesion { app, criterios, vista, refrescos: 0 }
    }

    pub fn app(&self) -> &EstadoApp {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut EstadoApp {
        &mut self.app
    }

    pub fn criterios(&self) -> &CriteriosFiltro {
        &self.criterios
    }

    pub fn vista(&self) -> &Vista {
        &self.vista
    }

    /// Cantidad de veces que se recalculó la vista.
    pub fn refrescos(&self) -> u64 {
        self.refrescos
    }

    pub fn set_criterios(&mut self, criterios: CriteriosFiltro) {
        self.criterios = criterios;
    }

    /// Un filtro rápido reemplaza sólo el tipo, salvo `Limpiar` que vacía todo.
    pub fn aplicar_filtro_rapido(&mut self, filtro: FiltroRapido) {
        match filtro {
            FiltroRapido::Obligatorias => self.criterios.tipo = Some(Tipo::OB.as_str().to_string()),
            FiltroRapido::Opcionales => self.criterios.tipo = Some(Tipo::OP.as_str().to_string()),
            FiltroRapido::Limpiar => self.criterios = CriteriosFiltro::default(),
        }
    }

    pub fn refrescar(&mut self) -> &Vista {
        self.vista = self.app.vista(&self.criterios);
        self.refrescos += 1;
        &self.vista
    }

    pub fn set_aprobada(&mut self, codigo: &str, valor: bool) -> Result<&Vista, ProgresoError> {
        self.app.set_aprobada(codigo, valor)?;
        Ok(self.refrescar())
    }

    pub fn set_cursando(&mut self, codigo: &str, valor: bool) -> Result<&Vista, ProgresoError> {
        self.app.set_cursando(codigo, valor)?;
        Ok(self.refrescar())
    }

    pub fn reset_progreso(&mut self) -> &Vista {
        self.app.reset_progreso();
        self.refrescar()
    }
}

/// Toma el candado de la sesión. Un candado envenenado se recupera: el
/// estado interno sigue siendo coherente porque cada transición es atómica.
pub fn bloquear(sesion: &Mutex<Sesion>) -> MutexGuard<'_, Sesion> {
    sesion.lock().unwrap_or_else(|e| e.into_inner())
}

/// Carga el catálogo desde `origen` y lo aplica a la sesión si el intento
/// sigue siendo el más reciente. El candado no se mantiene durante la espera.
pub async fn cargar_catalogo_en(sesion: &Mutex<Sesion>, origen: &str) -> ResultadoCarga {
    let ticket = bloquear(sesion).app_mut().iniciar_carga(origen);
    let resultado = cargar_catalogo(origen).await;

    let mut s = bloquear(sesion);
    let res = s.app_mut().completar_carga(ticket, resultado);
    if !matches!(res, ResultadoCarga::Descartado { .. }) {
        s.refrescar();
    }
    res
}
