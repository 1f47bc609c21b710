use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::app::{cargar_catalogo_en, EstadoApp, Sesion};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::server_handlers::*;

/// Estado compartido entre los workers del servidor.
#[derive(Debug)]
pub struct EstadoServidor {
    pub sesion: Arc<Mutex<Sesion>>,
    pub debouncer: Debouncer,
    pub catalogo_origen: String,
}

impl EstadoServidor {
    pub fn new(sesion: Sesion, config: &Config) -> Self {
        EstadoServidor {
            sesion: Arc::new(Mutex::new(sesion)),
            debouncer: Debouncer::new(config.debounce),
            catalogo_origen: config.catalogo.clone(),
        }
    }
}

/// Construye la sesión a partir de la configuración y restaura el progreso
/// guardado. El catálogo todavía no está cargado.
pub fn construir_sesion(config: &Config) -> Sesion {
    let storage = config.storage.abrir_o_memoria();
    let mut app = EstadoApp::new(storage, &config.clave_estado);
    app.restaurar_progreso();
    Sesion::new(app)
}

pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalogo", web::get().to(catalogo_handler))
        .route("/catalogo/recargar", web::post().to(recargar_catalogo_handler))
        .route("/materias", web::get().to(materias_handler))
        .route("/kpis", web::get().to(kpis_handler))
        .route("/filtros/opciones", web::get().to(opciones_filtros_handler))
        .route("/filtros", web::get().to(get_filtros_handler))
        .route("/filtros", web::put().to(set_filtros_handler))
        .route("/filtros/rapido/{filtro}", web::post().to(filtro_rapido_handler))
        .route("/vista", web::get().to(vista_handler))
        .route("/progreso", web::get().to(progreso_handler))
        .route("/progreso", web::delete().to(reset_progreso_handler))
        .route("/progreso/aprobadas/{codigo}", web::put().to(set_aprobada_handler))
        .route("/progreso/cursando/{codigo}", web::put().to(set_cursando_handler))
        .route("/help", web::get().to(help_handler));
}

/// Arranque completo: progreso guardado → catálogo → servidor HTTP.
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let sesion = construir_sesion(&config);
    let data = web::Data::new(EstadoServidor::new(sesion, &config));

    cargar_catalogo_en(&data.sesion, &data.catalogo_origen).await;

    info!("Iniciando servidor en http://{}", config.bind);
    let data_srv = data.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(data_srv.clone())
            .wrap(Cors::permissive())
            .configure(configurar_rutas)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
