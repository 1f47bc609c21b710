// --- Grilla de materias - Archivo principal ---

use grilla::config::Config;
use grilla::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("=== Grilla de materias (API) ===");
    let config = Config::from_env();
    run_server(config).await
}
