//! Estado de la aplicación.
//!
//! `EstadoApp` es el valor que posee el controlador: catálogo, progreso del
//! usuario, backend de persistencia y control de carga. Las mutaciones
//! (`set_aprobada`, `set_cursando`, `reset_progreso`) hacen
//! "mutar → persistir" en un solo paso; la derivación (`vista`, `kpis`) es
//! pura y se recalcula a pedido.

pub mod sesion;

pub use sesion::{bloquear, cargar_catalogo_en, FiltroRapido, Sesion};

use log::{debug, info};

use crate::algorithm::{compute_kpis, esta_bloqueada, filtrar_catalogo, get_estado, opciones_filtros, previas_pendientes};
use crate::catalogo::{mensaje_error_carga, ControlCarga, EstadoCarga, ResultadoCarga, TicketCarga};
use crate::error::{LoadError, ProgresoError};
use crate::models::{Catalogo, CriteriosFiltro, Estado, Kpis, MateriaVista, OpcionesFiltro, ProgresoUsuario, Vista};
use crate::storage::{cargar_progreso, guardar_progreso, reset_progreso, StorageBackend};

pub const MENSAJE_SIN_COINCIDENCIAS: &str = "No hay materias que coincidan con los filtros.";

pub struct EstadoApp {
    catalogo: Catalogo,
    progreso: ProgresoUsuario,
    storage: Box<dyn StorageBackend>,
    clave: String,
    carga: ControlCarga,
    origen: String,
}

impl std::fmt::Debug for EstadoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstadoApp")
            .field("materias", &self.catalogo.materias.len())
            .field("aprobadas", &self.progreso.aprobadas.len())
            .field("cursando", &self.progreso.cursando.len())
            .field("clave", &self.clave)
            .field("carga", self.carga.estado())
            .finish()
    }
}

impl EstadoApp {
    /// Estado vacío: sin catálogo y sin progreso. Llamar a `restaurar_progreso`
    /// para recuperar lo guardado.
    pub fn new(storage: Box<dyn StorageBackend>, clave: &str) -> Self {
        EstadoApp {
            catalogo: Catalogo::vacio(),
            progreso: ProgresoUsuario::nuevo(),
            storage,
            clave: clave.to_string(),
            carga: ControlCarga::new(),
            origen: String::new(),
        }
    }

    pub fn restaurar_progreso(&mut self) {
        self.progreso = cargar_progreso(self.storage.as_ref(), &self.clave);
        info!(
            "progreso restaurado: {} aprobadas, {} cursando",
            self.progreso.aprobadas.len(),
            self.progreso.cursando.len()
        );
    }

    pub fn catalogo(&self) -> &Catalogo {
        &self.catalogo
    }

    pub fn progreso(&self) -> &ProgresoUsuario {
        &self.progreso
    }

    pub fn clave(&self) -> &str {
        &self.clave
    }

    pub fn estado_carga(&self) -> &EstadoCarga {
        self.carga.estado()
    }

    // ---------- Carga ----------

    /// Marca el comienzo de una carga desde `origen` y entrega su ticket.
    pub fn iniciar_carga(&mut self, origen: &str) -> TicketCarga {
        self.origen = origen.to_string();
        self.carga.iniciar()
    }

    /// Aplica el resultado si el ticket sigue vigente. En caso de fallo el
    /// catálogo queda vacío; nunca queda un catálogo parcial.
    pub fn completar_carga(&mut self, ticket: TicketCarga, resultado: Result<Catalogo, LoadError>) -> ResultadoCarga {
        let res = self.carga.completar(ticket, resultado);
        match &res {
            ResultadoCarga::Aplicado(c) => self.catalogo = c.clone(),
            ResultadoCarga::Fallido(_) => self.catalogo = Catalogo::vacio(),
            ResultadoCarga::Descartado { .. } => {}
        }
        res
    }

    /// Reemplaza el catálogo sin pasar por el ciclo de carga.
    pub fn set_catalogo(&mut self, catalogo: Catalogo) {
        self.catalogo = catalogo;
    }

    // ---------- Transiciones ----------

    fn exigir_materia(&self, codigo: &str) -> Result<(), ProgresoError> {
        if self.catalogo.materia(codigo).is_none() {
            return Err(ProgresoError::MateriaDesconocida(codigo.to_string()));
        }
        Ok(())
    }

    /// Marca o desmarca una materia como aprobada y persiste. Aprobar la
    /// quita de "cursando"; desaprobar no la devuelve. Desmarcar se permite
    /// aunque el código ya no esté en el catálogo.
    pub fn set_aprobada(&mut self, codigo: &str, valor: bool) -> Result<(), ProgresoError> {
        if valor {
            self.exigir_materia(codigo)?;
            self.progreso.aprobar(codigo);
        } else {
            self.progreso.desaprobar(codigo);
        }
        debug!("aprobada {} = {}", codigo, valor);
        guardar_progreso(self.storage.as_mut(), &self.clave, &self.progreso);
        Ok(())
    }

    /// Marca o desmarca una materia como "cursando" y persiste. No se puede
    /// marcar una materia bloqueada; desmarcar vale para cualquier código.
    pub fn set_cursando(&mut self, codigo: &str, valor: bool) -> Result<(), ProgresoError> {
        if valor {
            self.exigir_materia(codigo)?;
            if let Some(m) = self.catalogo.materia(codigo) {
                if esta_bloqueada(m, &self.progreso.aprobadas, &self.progreso.cursando) {
                    return Err(ProgresoError::MateriaBloqueada {
                        codigo: codigo.to_string(),
                        faltantes: previas_pendientes(m, &self.progreso.aprobadas),
                    });
                }
            }
            self.progreso.marcar_cursando(codigo);
        } else {
            self.progreso.desmarcar_cursando(codigo);
        }
        debug!("cursando {} = {}", codigo, valor);
        guardar_progreso(self.storage.as_mut(), &self.clave, &self.progreso);
        Ok(())
    }

    /// Borra el progreso guardado y el de memoria en una sola transición.
    pub fn reset_progreso(&mut self) {
        reset_progreso(self.storage.as_mut(), &self.clave, &mut self.progreso);
        info!("progreso reiniciado");
    }

    // ---------- Derivación ----------

    pub fn estado_de(&self, codigo: &str) -> Estado {
        get_estado(codigo, &self.progreso.aprobadas, &self.progreso.cursando)
    }

    pub fn kpis(&self) -> Kpis {
        compute_kpis(&self.catalogo, &self.progreso.aprobadas)
    }

    pub fn opciones_filtros(&self) -> OpcionesFiltro {
        opciones_filtros(&self.catalogo)
    }

    /// Listado filtrado y ordenado, con estado y bloqueo de cada materia.
    pub fn vista(&self, criterios: &CriteriosFiltro) -> Vista {
        let aprobadas = &self.progreso.aprobadas;
        let cursando = &self.progreso.cursando;

        let materias: Vec<MateriaVista> = filtrar_catalogo(&self.catalogo, criterios, aprobadas, cursando)
            .into_iter()
            .map(|m| MateriaVista {
                materia: m.clone(),
                estado: get_estado(&m.codigo, aprobadas, cursando),
                bloqueada: esta_bloqueada(m, aprobadas, cursando),
                previas_pendientes: previas_pendientes(m, aprobadas),
                nombre_area: self.catalogo.nombre_area(&m.area).to_string(),
            })
            .collect();

        let kpis = self.kpis();
        let mensaje = if self.carga.estado().es_fallido() {
            Some(mensaje_error_carga(&self.origen))
        } else if materias.is_empty() {
            Some(MENSAJE_SIN_COINCIDENCIAS.to_string())
        } else {
            None
        };

        Vista { materias, etiqueta_progreso: kpis.etiqueta(), kpis, mensaje }
    }
}
