use grilla::error::PersistenceError;
use grilla::models::ProgresoUsuario;
use grilla::storage::progreso::leer_progreso;
use grilla::storage::{
    cargar_progreso, escribir_progreso, guardar_progreso, reset_progreso, ArchivoStorage, MemoriaStorage,
    SqliteStorage, StorageBackend, CLAVE_ESTADO,
};

fn progreso_ejemplo() -> ProgresoUsuario {
    let mut p = ProgresoUsuario::nuevo();
    p.aprobar("ADM101");
    p.aprobar("CON101");
    p.marcar_cursando("MAT102");
    p
}

fn roundtrip<S: StorageBackend>(storage: &mut S) {
    let p = progreso_ejemplo();
    assert!(guardar_progreso(storage, CLAVE_ESTADO, &p));
    let leido = cargar_progreso(storage, CLAVE_ESTADO);
    assert_eq!(leido, p);
}

#[test]
fn roundtrip_memoria() {
    roundtrip(&mut MemoriaStorage::new());
}

#[test]
fn roundtrip_archivo() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = ArchivoStorage::new(dir.path().join("estado.json"));
    roundtrip(&mut s);

    // Una nueva instancia sobre el mismo archivo ve lo guardado
    let otra = ArchivoStorage::new(dir.path().join("estado.json"));
    assert_eq!(cargar_progreso(&otra, CLAVE_ESTADO), progreso_ejemplo());
}

#[test]
fn roundtrip_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("estado.db");
    let mut s = SqliteStorage::open(ruta.to_str()).unwrap();
    roundtrip(&mut s);
}

#[test]
fn formato_guardado() {
    let mut s = MemoriaStorage::new();
    guardar_progreso(&mut s, CLAVE_ESTADO, &progreso_ejemplo());
    let raw = s.get_item(CLAVE_ESTADO).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["aprobadas"], serde_json::json!(["ADM101", "CON101"]));
    assert_eq!(v["cursando"], serde_json::json!(["MAT102"]));
}

#[test]
fn sin_estado_previo_es_vacio() {
    let s = MemoriaStorage::new();
    assert!(cargar_progreso(&s, CLAVE_ESTADO).is_empty());
}

#[test]
fn estado_malformado_es_vacio() {
    let casos = [
        "{ esto no es json",
        "null",
        "42",
        r#"{"aprobadas": "ADM101"}"#,
        r#"{"aprobadas": [1, 2], "cursando": []}"#,
        r#"[["ADM101"], ["CON101"]]"#,
        r#""ADM101""#,
    ];
    for raw in casos.iter() {
        let s = MemoriaStorage::new().con_item(CLAVE_ESTADO, raw);
        assert!(cargar_progreso(&s, CLAVE_ESTADO).is_empty(), "'{}' debería leerse como vacío", raw);
    }
}

#[test]
fn lista_en_lugar_de_objeto_es_error() {
    let s = MemoriaStorage::new().con_item(CLAVE_ESTADO, r#"[["ADM101"], ["CON101"]]"#);
    assert!(matches!(leer_progreso(&s, CLAVE_ESTADO), Err(PersistenceError::NoEsObjeto)));
}

#[test]
fn campos_faltantes_se_toman_vacios() {
    let s = MemoriaStorage::new().con_item(CLAVE_ESTADO, r#"{"aprobadas": ["ADM101"]}"#);
    let p = cargar_progreso(&s, CLAVE_ESTADO);
    assert!(p.aprobadas.contains("ADM101"));
    assert!(p.cursando.is_empty());
}

#[test]
fn fallo_de_escritura_no_propaga() {
    let mut s = MemoriaStorage::solo_lectura();
    let p = progreso_ejemplo();
    assert!(!guardar_progreso(&mut s, CLAVE_ESTADO, &p));
    assert!(escribir_progreso(&mut s, CLAVE_ESTADO, &p).is_err());
}

#[test]
fn reset_borra_clave_y_conjuntos() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = ArchivoStorage::new(dir.path().join("estado.json"));
    let mut p = progreso_ejemplo();
    guardar_progreso(&mut s, CLAVE_ESTADO, &p);
    s.set_item("otra-clave", "1").unwrap();

    reset_progreso(&mut s, CLAVE_ESTADO, &mut p);
    assert!(p.is_empty());
    assert_eq!(s.get_item(CLAVE_ESTADO).unwrap(), None);
    assert_eq!(s.get_item("otra-clave").unwrap(), Some("1".to_string()));
}

#[test]
fn reset_con_storage_no_disponible_limpia_memoria() {
    let mut s = MemoriaStorage::solo_lectura();
    let mut p = progreso_ejemplo();
    reset_progreso(&mut s, CLAVE_ESTADO, &mut p);
    assert!(p.is_empty());
}
