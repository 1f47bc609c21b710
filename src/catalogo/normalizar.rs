use log::warn;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::models::{Area, Catalogo, Materia, Tipo};

/// Convierte un valor JSON escalar a texto (las cadenas se recortan).
fn valor_a_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64() {
                if (f.floor() - f).abs() < f64::EPSILON {
                    format!("{}", f as i64)
                } else {
                    format!("{}", f)
                }
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn campo_texto(obj: &Map<String, Value>, campo: &str) -> String {
    obj.get(campo).map(valor_a_string).unwrap_or_default()
}

fn campo_entero(obj: &Map<String, Value>, campo: &str) -> Option<i64> {
    match obj.get(campo)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && (f.floor() - f).abs() < f64::EPSILON)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn campo_numero(obj: &Map<String, Value>, campo: &str) -> Option<f64> {
    match obj.get(campo)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Divide un texto de previas en rachas de coma, punto y coma o espacios.
pub fn normalizar_previas_texto(texto: &str) -> Vec<String> {
    texto
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Coerción de `previas`: lista tal cual (cada elemento como texto), texto
/// separado, cualquier otra cosa vacía. Una entrada vacía de la lista se
/// conserva y nunca queda cumplida.
pub fn normalizar_previas(valor: Option<&Value>) -> Vec<String> {
    match valor {
        Some(Value::Array(items)) => items.iter().map(valor_a_string).collect(),
        Some(Value::String(s)) => normalizar_previas_texto(s),
        _ => Vec::new(),
    }
}

fn parse_area(v: &Value) -> Option<Area> {
    let obj = v.as_object()?;
    let id = campo_texto(obj, "id");
    if id.is_empty() {
        return None;
    }
    Some(Area { id, nombre: campo_texto(obj, "nombre") })
}

/// Normaliza un registro crudo. Devuelve `None` si no es un objeto o no tiene código.
pub fn parse_materia(v: &Value) -> Option<Materia> {
    let obj = v.as_object()?;
    let codigo = campo_texto(obj, "codigo");
    if codigo.is_empty() {
        return None;
    }
    Some(Materia {
        codigo,
        nombre: campo_texto(obj, "nombre"),
        anio: campo_entero(obj, "anio"),
        semestre: campo_entero(obj, "semestre"),
        area: campo_texto(obj, "area"),
        creditos: campo_numero(obj, "creditos"),
        tipo: obj.get("tipo").and_then(|t| t.as_str()).and_then(Tipo::parse),
        previas: normalizar_previas(obj.get("previas")),
    })
}

/// Interpreta el JSON del catálogo.
///
/// `areas` que no sea lista se toma como vacía; `materias` ausente o `null`
/// también. Un `materias` presente que no sea lista es un error.
pub fn parse_catalogo(texto: &str) -> Result<Catalogo, LoadError> {
    let json: Value = serde_json::from_str(texto)?;
    let obj = json
        .as_object()
        .ok_or_else(|| LoadError::Formato("se esperaba un objeto en la raíz".to_string()))?;

    let areas: Vec<Area> = match obj.get("areas") {
        Some(Value::Array(items)) => items.iter().filter_map(parse_area).collect(),
        _ => Vec::new(),
    };

    let materias_raw: &[Value] = match obj.get("materias") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(LoadError::Formato("'materias' debe ser una lista".to_string())),
    };

    let mut materias = Vec::with_capacity(materias_raw.len());
    for (idx, raw) in materias_raw.iter().enumerate() {
        match parse_materia(raw) {
            Some(m) => materias.push(m),
            None => warn!("materia #{} descartada: no es un objeto o no tiene código", idx),
        }
    }

    Ok(Catalogo { areas, materias })
}
