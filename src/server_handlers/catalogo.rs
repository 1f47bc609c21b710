use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::app::{bloquear, cargar_catalogo_en};
use crate::catalogo::ResultadoCarga;
use crate::server::EstadoServidor;

/// GET /catalogo
/// Devuelve áreas, materias y el estado de la última carga.
pub async fn catalogo_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    let app = s.app();
    HttpResponse::Ok().json(json!({
        "areas": app.catalogo().areas,
        "materias": app.catalogo().materias,
        "carga": app.estado_carga()
    }))
}

/// POST /catalogo/recargar
/// Vuelve a leer el catálogo desde el origen configurado. Si falla, el
/// catálogo queda vacío y se informa el error.
pub async fn recargar_catalogo_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    match cargar_catalogo_en(&data.sesion, &data.catalogo_origen).await {
        ResultadoCarga::Aplicado(c) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "areas": c.areas.len(),
            "materias": c.materias.len()
        })),
        ResultadoCarga::Fallido(e) => HttpResponse::BadGateway().json(json!({
            "status": "error",
            "error": format!("{}", e),
            "materias": 0
        })),
        ResultadoCarga::Descartado { secuencia, vigente } => HttpResponse::Conflict().json(json!({
            "status": "descartado",
            "secuencia": secuencia,
            "vigente": vigente
        })),
    }
}
