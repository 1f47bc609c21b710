use std::collections::HashSet;

use grilla::algorithm::{can_take, esta_bloqueada, previas_pendientes};
use grilla::catalogo::{cargar_catalogo, cargar_catalogo_o_vacio, normalizar_previas_texto, parse_catalogo};
use grilla::error::LoadError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Servidor HTTP mínimo que responde una sola vez con `status` y `cuerpo`.
/// Devuelve la URL base y la tarea que atiende la conexión.
async fn servidor_fijo(status: &'static str, cuerpo: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let tarea = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut pedido = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            pedido.extend_from_slice(&buf[..n]);
            if pedido.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let respuesta = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            cuerpo.len(),
            cuerpo
        );
        socket.write_all(respuesta.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&pedido).to_string()
    });
    (format!("http://{}", addr), tarea)
}

#[test]
fn previas_en_texto_se_separan() {
    assert_eq!(normalizar_previas_texto("A100, A200;A300"), vec!["A100", "A200", "A300"]);
    assert_eq!(normalizar_previas_texto("  A100 ,, ;  "), vec!["A100"]);
    assert!(normalizar_previas_texto("").is_empty());
    assert!(normalizar_previas_texto(" ; , ").is_empty());
}

#[test]
fn normalizar_es_idempotente() {
    let crudo = r#"{"materias": [
        {"codigo": " A1 ", "nombre": "Uno", "anio": "1", "semestre": 2.0, "creditos": "7,5", "tipo": "ob", "previas": "B1; C1"},
        {"codigo": "B1", "previas": ["C1"]},
        {"codigo": "C1", "previas": 5}
    ]}"#;
    let primera = parse_catalogo(crudo).unwrap();
    let otra_vez = parse_catalogo(&serde_json::to_string(&primera).unwrap()).unwrap();
    assert_eq!(primera, otra_vez);

    let a1 = primera.materia("A1").unwrap();
    assert_eq!(a1.anio, Some(1));
    assert_eq!(a1.semestre, Some(2));
    assert_eq!(a1.creditos, Some(7.5));
    assert_eq!(a1.previas, vec!["B1", "C1"]);
    assert!(primera.materia("C1").unwrap().previas.is_empty());
}

#[test]
fn previas_en_lista_se_conservan_tal_cual() {
    let cat = parse_catalogo(r#"{"materias": [{"codigo": "Q1", "previas": ["M1", "", null]}]}"#).unwrap();
    let q1 = cat.materia("Q1").unwrap();
    assert_eq!(q1.previas, vec!["M1", "", ""]);

    let aprobadas: HashSet<String> = ["M1".to_string()].into_iter().collect();
    assert!(!can_take(q1, &aprobadas));
    assert!(esta_bloqueada(q1, &aprobadas, &HashSet::new()));
    assert_eq!(previas_pendientes(q1, &aprobadas), vec!["", ""]);
}

#[test]
fn registros_sin_codigo_se_omiten() {
    let cat = parse_catalogo(r#"{"materias": [{"nombre": "Huérfana"}, {"codigo": "  "}, "texto", {"codigo": "OK1"}]}"#).unwrap();
    assert_eq!(cat.materias.len(), 1);
    assert_eq!(cat.materias[0].codigo, "OK1");
}

#[test]
fn claves_faltantes_dan_catalogo_vacio() {
    let cat = parse_catalogo("{}").unwrap();
    assert!(cat.is_empty());
    assert!(cat.areas.is_empty());

    let cat = parse_catalogo(r#"{"areas": "no", "materias": null}"#).unwrap();
    assert!(cat.is_empty());
}

#[test]
fn documento_invalido_es_error() {
    assert!(matches!(parse_catalogo("no es json"), Err(LoadError::Json(_))));
    assert!(matches!(parse_catalogo("[]"), Err(LoadError::Formato(_))));
    assert!(matches!(parse_catalogo(r#"{"materias": {"a": 1}}"#), Err(LoadError::Formato(_))));
}

#[test]
fn nombre_de_area_cae_al_id() {
    let cat = parse_catalogo(r#"{"areas": [{"id": "ADM", "nombre": "Administración"}], "materias": []}"#).unwrap();
    assert_eq!(cat.nombre_area("ADM"), "Administración");
    assert_eq!(cat.nombre_area("XYZ"), "XYZ");
}

#[tokio::test]
async fn carga_el_catalogo_de_ejemplo() {
    let ruta = concat!(env!("CARGO_MANIFEST_DIR"), "/data/materias_admin.json");
    let cat = cargar_catalogo(ruta).await.unwrap();
    assert!(!cat.areas.is_empty());
    assert!(!cat.materias.is_empty());
    for m in &cat.materias {
        assert!(!m.codigo.is_empty());
        assert!(m.previas.iter().all(|p| !p.trim().is_empty()), "{} tiene previas vacías", m.codigo);
    }
}

#[tokio::test]
async fn archivo_inexistente_es_error_io() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("no-existe.json");
    let ruta = ruta.to_str().unwrap();
    match cargar_catalogo(ruta).await {
        Err(LoadError::Io { ruta: r, .. }) => assert_eq!(r, ruta),
        other => panic!("se esperaba error de E/S, llegó {:?}", other),
    }
    assert!(cargar_catalogo_o_vacio(ruta).await.is_empty());
}

#[tokio::test]
async fn http_no_exitoso_es_error() {
    let (url, tarea) = servidor_fijo("404 Not Found", "{}").await;
    let res = cargar_catalogo(&format!("{}/materias_admin.json", url)).await;
    assert!(matches!(res, Err(LoadError::Http(404))), "llegó {:?}", res);
    tarea.await.unwrap();
}

#[tokio::test]
async fn http_exitoso_pide_sin_cache() {
    let cuerpo = r#"{"areas": [{"id": "A", "nombre": "Área"}], "materias": [{"codigo": "M1", "previas": "M0"}]}"#;
    let (url, tarea) = servidor_fijo("200 OK", cuerpo).await;
    let cat = cargar_catalogo(&format!("{}/materias_admin.json", url)).await.unwrap();
    assert_eq!(cat.materias.len(), 1);
    assert_eq!(cat.materias[0].previas, vec!["M0"]);

    let pedido = tarea.await.unwrap().to_lowercase();
    assert!(pedido.contains("cache-control: no-store"), "pedido: {}", pedido);
}
