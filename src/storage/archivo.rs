use std::collections::BTreeMap;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Guarda todas las claves en un único objeto JSON `{clave: valor}`.
#[derive(Debug, Clone)]
pub struct ArchivoStorage {
    ruta: PathBuf,
}

impl ArchivoStorage {
    pub fn new<P: AsRef<Path>>(ruta: P) -> Self {
        ArchivoStorage { ruta: ruta.as_ref().to_path_buf() }
    }

    fn leer_mapa(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.ruta.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.ruta)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Para escribir: si el archivo existe pero es inválido, se empieza de cero.
    fn leer_mapa_para_escribir(&self) -> BTreeMap<String, String> {
        match self.leer_mapa() {
            Ok(m) => m,
            Err(e) => {
                warn!("archivo de estado {:?} ilegible, se reescribe: {}", self.ruta, e);
                BTreeMap::new()
            }
        }
    }

    fn escribir_mapa(&self, mapa: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(dir) = self.ruta.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(mapa)?;
        let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(&self.ruta)?;
        f.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl StorageBackend for ArchivoStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.leer_mapa()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut mapa = self.leer_mapa_para_escribir();
        mapa.insert(key.to_string(), value.to_string());
        self.escribir_mapa(&mapa)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut mapa = self.leer_mapa_para_escribir();
        if mapa.remove(key).is_some() || self.ruta.exists() {
            self.escribir_mapa(&mapa)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archivo_inexistente_es_vacio() {
        let dir = tempfile::tempdir().unwrap();
        let s = ArchivoStorage::new(dir.path().join("no-existe.json"));
        assert_eq!(s.get_item("k").unwrap(), None);
    }

    #[test]
    fn crea_directorios_intermedios() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = ArchivoStorage::new(dir.path().join("a/b/estado.json"));
        s.set_item("k", "v").unwrap();
        assert_eq!(s.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn archivo_corrupto_se_reescribe() {
        let dir = tempfile::tempdir().unwrap();
        let ruta = dir.path().join("estado.json");
        std::fs::write(&ruta, "{ no es json").unwrap();
        let mut s = ArchivoStorage::new(&ruta);
        assert!(s.get_item("k").is_err());
        s.set_item("k", "v").unwrap();
        assert_eq!(s.get_item("k").unwrap(), Some("v".to_string()));
    }
}
