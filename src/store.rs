//! Flat-file JSON store
//!
//! Each collection lives in one JSON document holding an array of objects.
//! Every read loads the whole document; every mutation rewrites it in full.
//! A per-file mutex serializes read-modify-write sequences so two concurrent
//! mutations cannot silently lose a write within this process.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::errors::AppError;

/// JSON document backing one collection of `T`.
pub struct JsonStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _entidad: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _entidad: PhantomData,
        }
    }

    /// Acquire the file lock. Hold the guard across a load + replace pair.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the full collection. A missing file is the empty collection.
    pub fn load(&self) -> Result<Vec<T>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Store(e)),
        }
    }

    /// Rewrite the document with the given collection.
    ///
    /// Pretty-printed UTF-8; serde_json leaves non-ASCII characters
    /// unescaped, matching the persisted layout of the original files.
    pub fn replace(&self, items: &[T]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::producto::Producto;

    fn producto(id: i64, nombre: &str) -> Producto {
        Producto {
            id,
            nombre: nombre.to_string(),
            descripcion: "".to_string(),
            precio_costo: 10.0,
            precio_venta: 15.0,
            stock: 20,
            unidades_vendidas: 0,
        }
    }

    #[test]
    fn missing_file_reads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Producto> = JsonStore::new(dir.path().join("no-existe.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn round_trip_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Producto> = JsonStore::new(dir.path().join("productos.json"));

        let originales = vec![producto(1, "Camiseta"), producto(2, "Pantalón")];
        store.replace(&originales).unwrap();

        let leidos = store.load().unwrap();
        assert_eq!(leidos, originales);
    }

    #[test]
    fn round_trip_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Producto> = JsonStore::new(dir.path().join("productos.json"));

        store.replace(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn non_ascii_preserved_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Producto> = JsonStore::new(dir.path().join("productos.json"));

        store.replace(&[producto(1, "Cinturón")]).unwrap();

        let crudo = std::fs::read_to_string(store.path()).unwrap();
        assert!(crudo.contains("Cinturón"));
        assert!(!crudo.contains("\\u00f3"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos.json");
        std::fs::write(&path, "{ esto no es json").unwrap();

        let store: JsonStore<Producto> = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(AppError::Corrupt(_))));
    }
}
