use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::models::CriteriosFiltro;
use crate::storage::EstadoPersistido;

pub async fn help_handler() -> impl Responder {
    let filtros_ejemplo = CriteriosFiltro {
        q: Some("contab".to_string()),
        estado: Some("pendiente".to_string()),
        anio: Some("1".to_string()),
        semestre: None,
        area: Some("CONT".to_string()),
        tipo: Some("OB".to_string()),
    };
    let progreso_ejemplo = EstadoPersistido {
        aprobadas: vec!["ADM101".to_string()],
        cursando: vec!["CON102".to_string()],
    };

    let help = json!({
        "description": "API de la grilla de materias. Marca materias como aprobadas o cursando, filtra el listado y calcula el avance en créditos.",
        "endpoints": {
            "GET /catalogo": "áreas, materias y estado de la última carga",
            "POST /catalogo/recargar": "vuelve a leer el catálogo",
            "GET /materias": "listado filtrado por query (q, estado, anio, semestre, area, tipo)",
            "GET /kpis": "totales y porcentaje de créditos aprobados",
            "GET /filtros/opciones": "años, semestres y áreas disponibles",
            "GET|PUT /filtros": "criterios de la sesión; PUT recalcula con retardo salvo ?inmediato=true",
            "POST /filtros/rapido/{ob|op|limpiar}": "accesos rápidos de filtro",
            "GET /vista": "última vista calculada",
            "GET /progreso": "materias aprobadas y cursando",
            "PUT /progreso/aprobadas/{codigo}": "body {\"valor\": bool}",
            "PUT /progreso/cursando/{codigo}": "body {\"valor\": bool}; rechazado si faltan previas",
            "DELETE /progreso": "borra el progreso guardado"
        },
        "filtros_example": filtros_ejemplo,
        "progreso_example": progreso_ejemplo,
        "get_example_query": "/materias?q=contab&estado=pendiente&anio=1&tipo=OB",
        "estados": ["aprobada", "cursando", "pendiente"],
        "tipos": ["OB", "OP"]
    });

    HttpResponse::Ok().json(help)
}
