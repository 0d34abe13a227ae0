//! Repositorio de productos sobre el almacén JSON plano.
//!
//! Cada operación recarga el documento completo y, si muta, lo reescribe
//! entero bajo el lock del archivo.

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::producto::{
    ActualizarParcialPayload, ActualizarProductoPayload, CrearProductoPayload, Producto,
};
use crate::store::JsonStore;

/// Criterios opcionales del filtro avanzado. Los precios acotan
/// `precio_venta`; un criterio ausente no se aplica.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiltroProductos {
    pub nombre: Option<String>,
    pub precio_min: Option<f64>,
    pub precio_max: Option<f64>,
    pub stock_min: Option<i64>,
}

#[derive(Clone)]
pub struct ProductoRepo {
    store: Arc<JsonStore<Producto>>,
}

impl ProductoRepo {
    pub fn new(store: Arc<JsonStore<Producto>>) -> Self {
        Self { store }
    }

    pub fn listar(&self) -> Result<Vec<Producto>, AppError> {
        self.store.load()
    }

    /// Búsqueda por subcadena del nombre, sin distinguir mayúsculas.
    pub fn buscar_por_nombre(&self, nombre: &str) -> Result<Vec<Producto>, AppError> {
        let aguja = nombre.to_lowercase();
        let productos = self.store.load()?;
        Ok(productos
            .into_iter()
            .filter(|p| p.nombre.to_lowercase().contains(&aguja))
            .collect())
    }

    pub fn filtrar(&self, filtro: &FiltroProductos) -> Result<Vec<Producto>, AppError> {
        let aguja = filtro.nombre.as_ref().map(|n| n.to_lowercase());
        let productos = self.store.load()?;
        Ok(productos
            .into_iter()
            .filter(|p| {
                if let Some(ref aguja) = aguja {
                    if !p.nombre.to_lowercase().contains(aguja) {
                        return false;
                    }
                }
                if let Some(min) = filtro.precio_min {
                    if p.precio_venta < min {
                        return false;
                    }
                }
                if let Some(max) = filtro.precio_max {
                    if p.precio_venta > max {
                        return false;
                    }
                }
                if let Some(min) = filtro.stock_min {
                    if p.stock < min {
                        return false;
                    }
                }
                true
            })
            .collect())
    }

    pub fn obtener(&self, id: i64) -> Result<Producto, AppError> {
        let productos = self.store.load()?;
        productos
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))
    }

    /// Crea un producto con id asignado como max(ids existentes) + 1.
    pub fn crear(&self, payload: CrearProductoPayload) -> Result<Producto, AppError> {
        let _guard = self.store.lock();
        let mut productos = self.store.load()?;

        let id = productos.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let producto = Producto {
            id,
            nombre: payload.nombre,
            descripcion: payload.descripcion,
            precio_costo: payload.precio_costo,
            precio_venta: payload.precio_venta,
            stock: payload.stock,
            unidades_vendidas: payload.unidades_vendidas,
        };

        productos.push(producto.clone());
        self.store.replace(&productos)?;
        Ok(producto)
    }

    /// Reemplazo completo de todos los campos salvo el id.
    pub fn actualizar(
        &self,
        id: i64,
        payload: ActualizarProductoPayload,
    ) -> Result<Producto, AppError> {
        let _guard = self.store.lock();
        let mut productos = self.store.load()?;

        let lugar = productos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))?;

        *lugar = Producto {
            id,
            nombre: payload.nombre,
            descripcion: payload.descripcion,
            precio_costo: payload.precio_costo,
            precio_venta: payload.precio_venta,
            stock: payload.stock,
            unidades_vendidas: payload.unidades_vendidas,
        };
        let actualizado = lugar.clone();

        self.store.replace(&productos)?;
        Ok(actualizado)
    }

    /// Sobrescribe solo los campos presentes en el payload.
    pub fn actualizar_parcial(
        &self,
        id: i64,
        campos: ActualizarParcialPayload,
    ) -> Result<Producto, AppError> {
        let _guard = self.store.lock();
        let mut productos = self.store.load()?;

        let producto = productos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))?;

        if let Some(nombre) = campos.nombre {
            producto.nombre = nombre;
        }
        if let Some(descripcion) = campos.descripcion {
            producto.descripcion = descripcion;
        }
        if let Some(precio_costo) = campos.precio_costo {
            producto.precio_costo = precio_costo;
        }
        if let Some(precio_venta) = campos.precio_venta {
            producto.precio_venta = precio_venta;
        }
        if let Some(stock) = campos.stock {
            producto.stock = stock;
        }
        if let Some(unidades) = campos.unidades_vendidas {
            producto.unidades_vendidas = unidades;
        }
        let actualizado = producto.clone();

        self.store.replace(&productos)?;
        Ok(actualizado)
    }

    /// Elimina por id. Devuelve false si no había fila que borrar.
    pub fn eliminar(&self, id: i64) -> Result<bool, AppError> {
        let _guard = self.store.lock();
        let mut productos = self.store.load()?;

        let antes = productos.len();
        productos.retain(|p| p.id != id);
        if productos.len() == antes {
            return Ok(false);
        }

        self.store.replace(&productos)?;
        Ok(true)
    }

    /// Aplica un delta al stock. Falla sin persistir si el resultado
    /// quedaría negativo.
    pub fn ajustar_stock(&self, id: i64, delta: i64) -> Result<Producto, AppError> {
        let _guard = self.store.lock();
        let mut productos = self.store.load()?;

        let producto = productos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))?;

        let nuevo_stock = producto.stock + delta;
        if nuevo_stock < 0 {
            return Err(AppError::InsufficientStock);
        }

        producto.stock = nuevo_stock;
        let actualizado = producto.clone();

        self.store.replace(&productos)?;
        Ok(actualizado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_temporal() -> (tempfile::TempDir, ProductoRepo) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path().join("productos.json")));
        (dir, ProductoRepo::new(store))
    }

    fn payload(nombre: &str, stock: i64) -> CrearProductoPayload {
        CrearProductoPayload {
            nombre: nombre.to_string(),
            descripcion: "".to_string(),
            precio_costo: 10.0,
            precio_venta: 15.0,
            stock,
            unidades_vendidas: 0,
        }
    }

    #[test]
    fn ids_son_max_mas_uno() {
        let (_dir, repo) = repo_temporal();

        let a = repo.crear(payload("A", 1)).unwrap();
        let b = repo.crear(payload("B", 1)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        // Tras borrar el último, el hueco se reutiliza (max + 1)
        assert!(repo.eliminar(2).unwrap());
        let c = repo.crear(payload("C", 1)).unwrap();
        assert_eq!(c.id, 2);

        // El id nuevo siempre supera a todos los existentes
        let ids: Vec<i64> = repo.listar().unwrap().iter().map(|p| p.id).collect();
        assert!(c.id >= *ids.iter().max().unwrap());
    }

    #[test]
    fn eliminar_inexistente_no_cambia_nada() {
        let (_dir, repo) = repo_temporal();
        repo.crear(payload("A", 1)).unwrap();

        assert!(!repo.eliminar(99).unwrap());
        assert_eq!(repo.listar().unwrap().len(), 1);
    }

    #[test]
    fn ajustar_stock_aplica_delta() {
        let (_dir, repo) = repo_temporal();
        let p = repo.crear(payload("A", 10)).unwrap();

        let tras_salida = repo.ajustar_stock(p.id, -4).unwrap();
        assert_eq!(tras_salida.stock, 6);

        let tras_entrada = repo.ajustar_stock(p.id, 10).unwrap();
        assert_eq!(tras_entrada.stock, 16);
    }

    #[test]
    fn ajustar_stock_negativo_falla_sin_persistir() {
        let (_dir, repo) = repo_temporal();
        let p = repo.crear(payload("A", 3)).unwrap();

        let resultado = repo.ajustar_stock(p.id, -5);
        assert!(matches!(resultado, Err(AppError::InsufficientStock)));

        // El stock en disco no cambió
        assert_eq!(repo.obtener(p.id).unwrap().stock, 3);
    }

    #[test]
    fn ajustar_stock_producto_inexistente() {
        let (_dir, repo) = repo_temporal();
        assert!(matches!(
            repo.ajustar_stock(42, 1),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn busqueda_ignora_mayusculas() {
        let (_dir, repo) = repo_temporal();
        repo.crear(payload("Camiseta Roja", 1)).unwrap();
        repo.crear(payload("Pantalón", 1)).unwrap();

        let resultados = repo.buscar_por_nombre("camiseta").unwrap();
        assert_eq!(resultados.len(), 1);
        assert_eq!(resultados[0].nombre, "Camiseta Roja");

        assert!(repo.buscar_por_nombre("zapato").unwrap().is_empty());
    }

    #[test]
    fn filtro_combina_criterios() {
        let (_dir, repo) = repo_temporal();
        repo.crear(CrearProductoPayload {
            precio_venta: 20.0,
            ..payload("Camiseta", 10)
        })
        .unwrap();
        repo.crear(CrearProductoPayload {
            precio_venta: 50.0,
            ..payload("Campera", 2)
        })
        .unwrap();

        let filtro = FiltroProductos {
            nombre: Some("cam".to_string()),
            precio_min: Some(10.0),
            precio_max: Some(30.0),
            stock_min: Some(5),
        };
        let resultados = repo.filtrar(&filtro).unwrap();
        assert_eq!(resultados.len(), 1);
        assert_eq!(resultados[0].nombre, "Camiseta");
    }

    #[test]
    fn actualizar_reemplaza_todo_salvo_id() {
        let (_dir, repo) = repo_temporal();
        let p = repo.crear(payload("A", 5)).unwrap();

        let actualizado = repo
            .actualizar(
                p.id,
                ActualizarProductoPayload {
                    nombre: "B".to_string(),
                    descripcion: "nueva".to_string(),
                    precio_costo: 1.0,
                    precio_venta: 2.0,
                    stock: 0,
                    unidades_vendidas: 9,
                },
            )
            .unwrap();

        assert_eq!(actualizado.id, p.id);
        assert_eq!(actualizado.nombre, "B");
        assert_eq!(actualizado.unidades_vendidas, 9);
    }

    #[test]
    fn actualizacion_parcial_solo_toca_campos_presentes() {
        let (_dir, repo) = repo_temporal();
        let p = repo.crear(payload("A", 5)).unwrap();

        let actualizado = repo
            .actualizar_parcial(
                p.id,
                ActualizarParcialPayload {
                    stock: Some(8),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(actualizado.stock, 8);
        assert_eq!(actualizado.nombre, "A");
        assert_eq!(actualizado.precio_costo, 10.0);
    }
}
