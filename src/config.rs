//! Configuración desde variables de entorno (y `.env` si existe).
//!
//! - `GRILLA_CATALOGO`: archivo o URL del catálogo
//! - `GRILLA_STORAGE`: `archivo:<ruta>`, `sqlite:<ruta>` o `memoria`
//! - `GRILLA_CLAVE_ESTADO`: clave bajo la que se guarda el progreso
//! - `GRILLA_BIND`: dirección del servidor HTTP
//! - `GRILLA_DEBOUNCE_MS`: retardo del recálculo al cambiar filtros

use std::time::Duration;

use log::{info, warn};

use crate::catalogo::CATALOGO_POR_DEFECTO;
use crate::error::StorageError;
use crate::storage::{ArchivoStorage, MemoriaStorage, SqliteStorage, StorageBackend, CLAVE_ESTADO};

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
pub const ESTADO_POR_DEFECTO: &str = "data/estado.json";
pub const DEBOUNCE_MS_POR_DEFECTO: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipoStorage {
    Archivo(String),
    Sqlite(String),
    Memoria,
}

impl TipoStorage {
    /// `archivo:<ruta>`, `sqlite:<ruta>`, `memoria`; una ruta sola es un archivo.
    pub fn parse(s: &str) -> TipoStorage {
        let s = s.trim();
        if s.eq_ignore_ascii_case("memoria") || s.eq_ignore_ascii_case("memory") {
            TipoStorage::Memoria
        } else if let Some(ruta) = s.strip_prefix("sqlite:") {
            TipoStorage::Sqlite(ruta.to_string())
        } else if let Some(ruta) = s.strip_prefix("archivo:") {
            TipoStorage::Archivo(ruta.to_string())
        } else if s.is_empty() {
            TipoStorage::Archivo(ESTADO_POR_DEFECTO.to_string())
        } else {
            TipoStorage::Archivo(s.to_string())
        }
    }

    pub fn abrir(&self) -> Result<Box<dyn StorageBackend>, StorageError> {
        Ok(match self {
            TipoStorage::Archivo(ruta) => Box::new(ArchivoStorage::new(ruta)),
            TipoStorage::Sqlite(ruta) => Box::new(SqliteStorage::open(Some(ruta.as_str()))?),
            TipoStorage::Memoria => Box::new(MemoriaStorage::new()),
        })
    }

    /// Como `abrir`, pero si el backend no se puede abrir sigue sólo en memoria.
    pub fn abrir_o_memoria(&self) -> Box<dyn StorageBackend> {
        match self.abrir() {
            Ok(s) => s,
            Err(e) => {
                warn!("No se pudo abrir el almacenamiento {:?}: {}; se usa memoria", self, e);
                Box::new(MemoriaStorage::new())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalogo: String,
    pub storage: TipoStorage,
    pub clave_estado: String,
    pub bind: String,
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalogo: CATALOGO_POR_DEFECTO.to_string(),
            storage: TipoStorage::Archivo(ESTADO_POR_DEFECTO.to_string()),
            clave_estado: CLAVE_ESTADO.to_string(),
            bind: BIND_POR_DEFECTO.to_string(),
            debounce: Duration::from_millis(DEBOUNCE_MS_POR_DEFECTO),
        }
    }
}

impl Config {
    /// Lee `.env` si existe y luego el entorno del proceso.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Construye la configuración con una función de búsqueda arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let def = Config::default();
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let debounce = match get("GRILLA_DEBOUNCE_MS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!("GRILLA_DEBOUNCE_MS inválido ({}); se usa {}", v, DEBOUNCE_MS_POR_DEFECTO);
                    def.debounce
                }
            },
            None => def.debounce,
        };

        let cfg = Config {
            catalogo: get("GRILLA_CATALOGO").unwrap_or(def.catalogo),
            storage: get("GRILLA_STORAGE").map(|s| TipoStorage::parse(&s)).unwrap_or(def.storage),
            clave_estado: get("GRILLA_CLAVE_ESTADO").unwrap_or(def.clave_estado),
            bind: get("GRILLA_BIND").unwrap_or(def.bind),
            debounce,
        };
        info!("configuración: {:?}", cfg);
        cfg
    }
}
