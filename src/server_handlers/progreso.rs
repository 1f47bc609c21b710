use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::app::bloquear;
use crate::error::ProgresoError;
use crate::server::EstadoServidor;
use crate::storage::EstadoPersistido;

#[derive(Debug, Deserialize)]
pub struct CambioProgreso {
    pub valor: bool,
}

fn error_progreso(e: ProgresoError) -> HttpResponse {
    match &e {
        ProgresoError::MateriaDesconocida(_) => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
        ProgresoError::MateriaBloqueada { faltantes, .. } => HttpResponse::Conflict().json(json!({
            "error": e.to_string(),
            "faltantes": faltantes
        })),
    }
}

/// GET /progreso
pub async fn progreso_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    HttpResponse::Ok().json(EstadoPersistido::from(s.app().progreso()))
}

/// PUT /progreso/aprobadas/{codigo}  body: {"valor": true|false}
pub async fn set_aprobada_handler(
    data: web::Data<EstadoServidor>,
    path: web::Path<String>,
    body: web::Json<CambioProgreso>,
) -> impl Responder {
    let codigo = path.into_inner();
    let mut s = bloquear(&data.sesion);
    match s.set_aprobada(&codigo, body.valor) {
        Ok(vista) => HttpResponse::Ok().json(json!({
            "codigo": codigo,
            "aprobada": body.valor,
            "kpis": vista.kpis
        })),
        Err(e) => error_progreso(e),
    }
}

/// PUT /progreso/cursando/{codigo}  body: {"valor": true|false}
pub async fn set_cursando_handler(
    data: web::Data<EstadoServidor>,
    path: web::Path<String>,
    body: web::Json<CambioProgreso>,
) -> impl Responder {
    let codigo = path.into_inner();
    let mut s = bloquear(&data.sesion);
    match s.set_cursando(&codigo, body.valor) {
        Ok(vista) => HttpResponse::Ok().json(json!({
            "codigo": codigo,
            "cursando": body.valor,
            "kpis": vista.kpis
        })),
        Err(e) => error_progreso(e),
    }
}

/// DELETE /progreso
/// Borra el progreso guardado y el de memoria.
pub async fn reset_progreso_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let mut s = bloquear(&data.sesion);
    let vista = s.reset_progreso();
    HttpResponse::Ok().json(json!({"status": "ok", "kpis": vista.kpis}))
}
