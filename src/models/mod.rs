// Estructuras de datos principales

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub nombre: String,
}

/// Tipo de materia: obligatoria u opcional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tipo {
    OB,
    OP,
}

impl Tipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tipo::OB => "OB",
            Tipo::OP => "OP",
        }
    }

    /// Acepta "OB"/"OP" sin distinguir mayúsculas; cualquier otro valor es `None`.
    pub fn parse(s: &str) -> Option<Tipo> {
        match s.trim().to_uppercase().as_str() {
            "OB" => Some(Tipo::OB),
            "OP" => Some(Tipo::OP),
            _ => None,
        }
    }
}

impl fmt::Display for Tipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materia {
    pub codigo: String,
    pub nombre: String,
    pub anio: Option<i64>,
    pub semestre: Option<i64>,
    pub area: String,
    /// `None` cuando el dato original falta o no es numérico.
    pub creditos: Option<f64>,
    pub tipo: Option<Tipo>,
    pub previas: Vec<String>,
}

impl Materia {
    /// Créditos con `0` como valor por defecto.
    pub fn creditos_o_cero(&self) -> f64 {
        match self.creditos {
            Some(c) if c.is_finite() => c,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogo {
    pub areas: Vec<Area>,
    pub materias: Vec<Materia>,
}

impl Catalogo {
    pub fn vacio() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.materias.is_empty()
    }

    pub fn materia(&self, codigo: &str) -> Option<&Materia> {
        self.materias.iter().find(|m| m.codigo == codigo)
    }

    /// Nombre del área, o el propio id si no hay un área con ese id.
    pub fn nombre_area<'a>(&'a self, id: &'a str) -> &'a str {
        self.areas
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.nombre.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(id)
    }
}

/// Estado derivado de una materia respecto del progreso del usuario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    Aprobada,
    Cursando,
    Pendiente,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Aprobada => "aprobada",
            Estado::Cursando => "cursando",
            Estado::Pendiente => "pendiente",
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Materias aprobadas y en curso del usuario.
///
/// Un código no debería estar en ambos conjuntos; sólo se garantiza en la
/// transición `aprobar`, no como invariante permanente.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgresoUsuario {
    pub aprobadas: HashSet<String>,
    pub cursando: HashSet<String>,
}

impl ProgresoUsuario {
    pub fn nuevo() -> Self {
        Self::default()
    }

    /// Aprobar quita la materia de "cursando".
    pub fn aprobar(&mut self, codigo: &str) {
        self.aprobadas.insert(codigo.to_string());
        self.cursando.remove(codigo);
    }

    /// Desaprobar no devuelve la materia a "cursando".
    pub fn desaprobar(&mut self, codigo: &str) {
        self.aprobadas.remove(codigo);
    }

    pub fn marcar_cursando(&mut self, codigo: &str) {
        self.cursando.insert(codigo.to_string());
    }

    pub fn desmarcar_cursando(&mut self, codigo: &str) {
        self.cursando.remove(codigo);
    }

    pub fn limpiar(&mut self) {
        self.aprobadas.clear();
        self.cursando.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.aprobadas.is_empty() && self.cursando.is_empty()
    }
}

/// Valores crudos de los controles de filtro. Una cadena vacía equivale a "sin filtro".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriosFiltro {
    pub q: Option<String>,
    pub estado: Option<String>,
    pub anio: Option<String>,
    pub semestre: Option<String>,
    pub area: Option<String>,
    pub tipo: Option<String>,
}

impl CriteriosFiltro {
    pub fn is_empty(&self) -> bool {
        [&self.q, &self.estado, &self.anio, &self.semestre, &self.area, &self.tipo]
            .iter()
            .all(|c| activo(c).is_none())
    }
}

/// Devuelve el valor de un criterio sólo si no está vacío.
pub fn activo(c: &Option<String>) -> Option<&str> {
    c.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub total_materias: usize,
    pub aprobadas: usize,
    pub creditos_totales: f64,
    pub creditos_aprobados: f64,
    pub porcentaje: u32,
}

impl Kpis {
    /// Texto de la barra de progreso, p. ej. `"40% · 20/50 créditos"`.
    pub fn etiqueta(&self) -> String {
        format!(
            "{}% · {}/{} créditos",
            self.porcentaje, self.creditos_aprobados, self.creditos_totales
        )
    }
}

/// Opciones disponibles para poblar los controles de filtro.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpcionesFiltro {
    pub anios: Vec<i64>,
    pub semestres: Vec<i64>,
    pub areas: Vec<Area>,
}

/// Una materia tal como se muestra en el listado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MateriaVista {
    pub materia: Materia,
    pub estado: Estado,
    pub bloqueada: bool,
    pub previas_pendientes: Vec<String>,
    pub nombre_area: String,
}

/// Resultado de derivar el listado: materias filtradas y ordenadas más los KPIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vista {
    pub materias: Vec<MateriaVista>,
    pub kpis: Kpis,
    pub etiqueta_progreso: String,
    pub mensaje: Option<String>,
}
