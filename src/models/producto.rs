//! Modelo de datos para productos del inventario.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio_costo: f64,
    pub precio_venta: f64,
    pub stock: i64,
    #[serde(default)]
    pub unidades_vendidas: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrearProductoPayload {
    pub nombre: String,
    pub descripcion: String,
    pub precio_costo: f64,
    pub precio_venta: f64,
    pub stock: i64,
    #[serde(default)]
    pub unidades_vendidas: i64,
}

/// Reemplazo completo: sobrescribe todos los campos salvo el id.
#[derive(Debug, Clone, Deserialize)]
pub struct ActualizarProductoPayload {
    pub nombre: String,
    pub descripcion: String,
    pub precio_costo: f64,
    pub precio_venta: f64,
    pub stock: i64,
    #[serde(default)]
    pub unidades_vendidas: i64,
}

/// Actualización parcial: solo se sobrescriben los campos presentes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActualizarParcialPayload {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio_costo: Option<f64>,
    pub precio_venta: Option<f64>,
    pub stock: Option<i64>,
    pub unidades_vendidas: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AjustarStockPayload {
    pub delta: i64,
}
