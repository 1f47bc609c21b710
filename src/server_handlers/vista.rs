use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::app::{bloquear, FiltroRapido};
use crate::models::CriteriosFiltro;
use crate::server::EstadoServidor;

/// GET /materias?q=&estado=&anio=&semestre=&area=&tipo=
/// Vista calculada en el momento con los criterios de la query; no toca los
/// filtros guardados en la sesión.
pub async fn materias_handler(data: web::Data<EstadoServidor>, query: web::Query<CriteriosFiltro>) -> impl Responder {
    let criterios = query.into_inner();
    let s = bloquear(&data.sesion);
    HttpResponse::Ok().json(s.app().vista(&criterios))
}

/// GET /kpis
pub async fn kpis_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    let kpis = s.app().kpis();
    HttpResponse::Ok().json(json!({"kpis": kpis, "etiqueta": kpis.etiqueta()}))
}

/// GET /filtros/opciones
pub async fn opciones_filtros_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    HttpResponse::Ok().json(s.app().opciones_filtros())
}

/// GET /filtros
pub async fn get_filtros_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    HttpResponse::Ok().json(s.criterios())
}

/// PUT /filtros[?inmediato=true]
/// Guarda los criterios y programa el recálculo de la vista tras el retardo
/// configurado; cada PUT nuevo cancela el recálculo pendiente. Con
/// `inmediato=true` recalcula en el acto.
pub async fn set_filtros_handler(
    data: web::Data<EstadoServidor>,
    query: web::Query<HashMap<String, String>>,
    body: web::Json<CriteriosFiltro>,
) -> impl Responder {
    let inmediato = query
        .get("inmediato")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if inmediato {
        data.debouncer.cancel();
        let mut s = bloquear(&data.sesion);
        s.set_criterios(body.into_inner());
        return HttpResponse::Ok().json(s.refrescar());
    }

    bloquear(&data.sesion).set_criterios(body.into_inner());
    let sesion = Arc::clone(&data.sesion);
    data.debouncer.schedule(move || {
        bloquear(&sesion).refrescar();
    });
    HttpResponse::Accepted().json(json!({
        "status": "programado",
        "delay_ms": data.debouncer.delay().as_millis() as u64
    }))
}

/// POST /filtros/rapido/{ob|op|limpiar}
pub async fn filtro_rapido_handler(data: web::Data<EstadoServidor>, path: web::Path<String>) -> impl Responder {
    let nombre = path.into_inner();
    let filtro = match FiltroRapido::parse(&nombre) {
        Some(f) => f,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("filtro rápido desconocido: '{}' (use ob, op o limpiar)", nombre)}))
        }
    };
    data.debouncer.cancel();
    let mut s = bloquear(&data.sesion);
    s.aplicar_filtro_rapido(filtro);
    HttpResponse::Ok().json(s.refrescar())
}

/// GET /vista
/// Última vista calculada para los filtros de la sesión.
pub async fn vista_handler(data: web::Data<EstadoServidor>) -> impl Responder {
    let s = bloquear(&data.sesion);
    HttpResponse::Ok().json(s.vista())
}
