//! Repositorio de ventas sobre el almacén JSON plano.
//!
//! El registro de una venta valida el producto referenciado contra el
//! almacén de productos, pero nunca lo muta: los dos archivos son
//! almacenes independientes y el descuento de stock es una llamada
//! explícita y separada a `ProductoRepo::ajustar_stock`.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::producto::Producto;
use crate::models::venta::{RegistrarVentaPayload, Venta};
use crate::store::JsonStore;

#[derive(Clone)]
pub struct VentaRepo {
    store: Arc<JsonStore<Venta>>,
    productos: Arc<JsonStore<Producto>>,
}

impl VentaRepo {
    pub fn new(store: Arc<JsonStore<Venta>>, productos: Arc<JsonStore<Producto>>) -> Self {
        Self { store, productos }
    }

    pub fn listar(&self) -> Result<Vec<Venta>, AppError> {
        self.store.load()
    }

    pub fn obtener(&self, id: i64) -> Result<Venta, AppError> {
        let ventas = self.store.load()?;
        ventas
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Venta no encontrada".into()))
    }

    /// Registra una venta: el producto debe existir y tener stock
    /// suficiente. En caso de fallo no se añade nada al registro.
    pub fn registrar(&self, payload: RegistrarVentaPayload) -> Result<Venta, AppError> {
        let _guard = self.store.lock();

        let productos = self.productos.load()?;
        let producto = productos
            .iter()
            .find(|p| p.id == payload.producto_id)
            .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))?;

        if producto.stock < payload.cantidad_vendida {
            return Err(AppError::InsufficientStock);
        }

        let mut ventas = self.store.load()?;
        let venta = Venta {
            id: ventas.iter().map(|v| v.id).max().unwrap_or(0) + 1,
            producto_id: payload.producto_id,
            cantidad_vendida: payload.cantidad_vendida,
        };

        ventas.push(venta.clone());
        self.store.replace(&ventas)?;
        Ok(venta)
    }

    pub fn eliminar(&self, id: i64) -> Result<bool, AppError> {
        let _guard = self.store.lock();
        let mut ventas = self.store.load()?;

        let antes = ventas.len();
        ventas.retain(|v| v.id != id);
        if ventas.len() == antes {
            return Ok(false);
        }

        self.store.replace(&ventas)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos_temporales() -> (tempfile::TempDir, VentaRepo, Arc<JsonStore<Producto>>) {
        let dir = tempfile::tempdir().unwrap();
        let productos = Arc::new(JsonStore::new(dir.path().join("productos.json")));
        let ventas = Arc::new(JsonStore::new(dir.path().join("ventas.json")));
        let repo = VentaRepo::new(ventas, Arc::clone(&productos));
        (dir, repo, productos)
    }

    fn producto(id: i64, stock: i64) -> Producto {
        Producto {
            id,
            nombre: format!("Producto {id}"),
            descripcion: String::new(),
            precio_costo: 10.0,
            precio_venta: 15.0,
            stock,
            unidades_vendidas: 0,
        }
    }

    #[test]
    fn registrar_asigna_ids_consecutivos() {
        let (_dir, repo, productos) = repos_temporales();
        productos.replace(&[producto(1, 100)]).unwrap();

        let v1 = repo
            .registrar(RegistrarVentaPayload {
                producto_id: 1,
                cantidad_vendida: 3,
            })
            .unwrap();
        let v2 = repo
            .registrar(RegistrarVentaPayload {
                producto_id: 1,
                cantidad_vendida: 5,
            })
            .unwrap();

        assert_eq!(v1.id, 1);
        assert_eq!(v2.id, 2);
        assert_eq!(repo.listar().unwrap().len(), 2);
    }

    #[test]
    fn registrar_no_descuenta_stock() {
        let (_dir, repo, productos) = repos_temporales();
        productos.replace(&[producto(1, 10)]).unwrap();

        repo.registrar(RegistrarVentaPayload {
            producto_id: 1,
            cantidad_vendida: 4,
        })
        .unwrap();

        // El archivo de productos queda intacto
        let guardados = productos.load().unwrap();
        assert_eq!(guardados[0].stock, 10);
    }

    #[test]
    fn registrar_producto_inexistente_es_not_found() {
        let (_dir, repo, _productos) = repos_temporales();

        let resultado = repo.registrar(RegistrarVentaPayload {
            producto_id: 7,
            cantidad_vendida: 1,
        });
        assert!(matches!(resultado, Err(AppError::NotFound(_))));
        assert!(repo.listar().unwrap().is_empty());
    }

    #[test]
    fn registrar_sin_stock_no_agrega_al_registro() {
        let (_dir, repo, productos) = repos_temporales();
        productos.replace(&[producto(1, 2)]).unwrap();

        let resultado = repo.registrar(RegistrarVentaPayload {
            producto_id: 1,
            cantidad_vendida: 3,
        });
        assert!(matches!(resultado, Err(AppError::InsufficientStock)));
        assert!(repo.listar().unwrap().is_empty());
    }

    #[test]
    fn eliminar_venta() {
        let (_dir, repo, productos) = repos_temporales();
        productos.replace(&[producto(1, 100)]).unwrap();

        let venta = repo
            .registrar(RegistrarVentaPayload {
                producto_id: 1,
                cantidad_vendida: 1,
            })
            .unwrap();

        assert!(repo.eliminar(venta.id).unwrap());
        assert!(!repo.eliminar(venta.id).unwrap());
        assert!(repo.listar().unwrap().is_empty());
    }
}
