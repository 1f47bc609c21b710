//! Carga y normalización del catálogo de materias (`materias_admin.json`).
//!
//! Submódulos:
//! - `normalizar`: coerción tolerante de cada registro crudo
//! - `carga`: ciclo de vida de la carga con tickets de secuencia

pub mod carga;
pub mod normalizar;

pub use carga::{ControlCarga, EstadoCarga, ResultadoCarga, TicketCarga};
pub use normalizar::{normalizar_previas, normalizar_previas_texto, parse_catalogo};

use log::{error, info};

use crate::error::LoadError;
use crate::models::Catalogo;

/// Ruta por defecto del catálogo, relativa al directorio de trabajo.
pub const CATALOGO_POR_DEFECTO: &str = "data/materias_admin.json";

/// Mensaje a mostrar cuando la carga falla y el catálogo queda vacío.
pub fn mensaje_error_carga(origen: &str) -> String {
    format!("Error cargando la malla. Revisa la ruta {}.", origen)
}

fn es_url(origen: &str) -> bool {
    let o = origen.trim_start().to_lowercase();
    o.starts_with("http://") || o.starts_with("https://")
}

/// Obtiene el catálogo desde una URL `http(s)://` o un archivo local.
pub async fn cargar_catalogo(origen: &str) -> Result<Catalogo, LoadError> {
    let texto = if es_url(origen) {
        obtener_remoto(origen).await?
    } else {
        tokio::fs::read_to_string(origen).await.map_err(|e| LoadError::Io {
            ruta: origen.to_string(),
            fuente: e,
        })?
    };

    let catalogo = parse_catalogo(&texto)?;
    info!(
        "catálogo cargado desde {}: {} áreas, {} materias",
        origen,
        catalogo.areas.len(),
        catalogo.materias.len()
    );
    Ok(catalogo)
}

async fn obtener_remoto(url: &str) -> Result<String, LoadError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Http(status.as_u16()));
    }
    Ok(resp.text().await?)
}

/// Igual que `cargar_catalogo`, pero ante un fallo devuelve el catálogo vacío.
pub async fn cargar_catalogo_o_vacio(origen: &str) -> Catalogo {
    match cargar_catalogo(origen).await {
        Ok(c) => c,
        Err(e) => {
            error!("No se pudo cargar el catálogo '{}': {}", origen, e);
            Catalogo::vacio()
        }
    }
}
