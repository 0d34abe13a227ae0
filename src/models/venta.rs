//! Modelo de datos para registrar ventas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: i64,
    pub producto_id: i64,
    pub cantidad_vendida: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrarVentaPayload {
    pub producto_id: i64,
    pub cantidad_vendida: i64,
}
