//! Endpoints de inventario: registro y consulta de ventas más los
//! reportes agregados sobre el catálogo.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::producto::Producto;
use crate::models::venta::{RegistrarVentaPayload, Venta};
use crate::reportes;
use crate::validation;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ventas", get(listar_ventas).post(registrar_venta))
        .route("/ventas/top", get(ranking_ganancias))
        .route("/ventas/:id", get(obtener_venta).delete(eliminar_venta))
        .route("/ventas/producto/:id", get(historial_ventas))
        .route("/ganancia-total", get(ganancia_total))
        .route("/producto-mayor-stock", get(producto_mayor_stock))
        .route("/stock-total", get(stock_total))
        .route("/valor-inventario", get(valor_inventario))
        .route("/productos-agotados", get(productos_agotados))
        .route("/stock-bajo", get(stock_bajo))
}

/// Registrar una venta. Solo actualiza el registro de ventas: el stock
/// del producto no se descuenta automáticamente.
async fn registrar_venta(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegistrarVentaPayload>,
) -> Result<Json<Venta>, AppError> {
    validation::validar_registrar_venta(&payload).map_err(AppError::Validation)?;

    let venta = state.ventas.registrar(payload).map_err(|e| {
        if matches!(e, AppError::NotFound(_) | AppError::InsufficientStock) {
            tracing::warn!(error = %e, "venta rechazada");
        }
        e
    })?;

    tracing::info!(
        id = venta.id,
        producto_id = venta.producto_id,
        cantidad = venta.cantidad_vendida,
        "venta registrada"
    );
    Ok(Json(venta))
}

/// Listar todas las ventas registradas
async fn listar_ventas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Venta>>, AppError> {
    Ok(Json(state.ventas.listar()?))
}

/// Obtener una venta por ID
async fn obtener_venta(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Venta>, AppError> {
    Ok(Json(state.ventas.obtener(id)?))
}

/// Eliminar una venta por ID
async fn eliminar_venta(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.ventas.eliminar(id)? {
        return Err(AppError::NotFound("Venta no encontrada".into()));
    }
    tracing::info!(id, "venta eliminada");
    Ok(StatusCode::NO_CONTENT)
}

/// Ranking de productos por ganancia total realizada
async fn ranking_ganancias(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<reportes::RankingGanancia>>, AppError> {
    let productos = state.productos.listar()?;
    let ventas = state.ventas.listar()?;
    Ok(Json(reportes::ranking_ganancias(&productos, &ventas)))
}

/// Historial de ventas de un producto
async fn historial_ventas(
    State(state): State<Arc<AppState>>,
    Path(producto_id): Path<i64>,
) -> Result<Json<Vec<Venta>>, AppError> {
    let ventas = state.ventas.listar()?;
    let historial = reportes::historial_ventas(&ventas, producto_id);
    if historial.is_empty() {
        return Err(AppError::NotFound(
            "No se encontraron ventas para este producto".into(),
        ));
    }
    Ok(Json(historial))
}

/// Ganancia total del inventario vendido
async fn ganancia_total(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let productos = state.productos.listar()?;
    Ok(Json(json!({
        "ganancia_total": reportes::ganancia_total(&productos)
    })))
}

/// Producto con mayor cantidad en stock
async fn producto_mayor_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let productos = state.productos.listar()?;
    let mayor = reportes::producto_mayor_stock(&productos)
        .ok_or_else(|| AppError::NotFound("No hay productos en el inventario".into()))?;
    Ok(Json(json!({
        "id": mayor.id,
        "nombre": mayor.nombre,
        "stock": mayor.stock
    })))
}

/// Cantidad total de unidades en stock
async fn stock_total(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let productos = state.productos.listar()?;
    Ok(Json(json!({
        "stock_total": reportes::stock_total(&productos)
    })))
}

/// Valor del inventario a precio de costo y de venta
async fn valor_inventario(
    State(state): State<Arc<AppState>>,
) -> Result<Json<reportes::ValorInventario>, AppError> {
    let productos = state.productos.listar()?;
    Ok(Json(reportes::valor_inventario(&productos)))
}

/// Productos con stock agotado
async fn productos_agotados(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Producto>>, AppError> {
    let productos = state.productos.listar()?;
    Ok(Json(reportes::productos_agotados(&productos)))
}

#[derive(Debug, Deserialize)]
struct UmbralQuery {
    umbral: Option<i64>,
}

/// Productos con stock menor o igual al umbral (por defecto 5)
async fn stock_bajo(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UmbralQuery>,
) -> Result<Json<Vec<Producto>>, AppError> {
    let umbral = query.umbral.unwrap_or(5);
    validation::validar_umbral(umbral).map_err(AppError::Validation)?;

    let productos = state.productos.listar()?;
    Ok(Json(reportes::stock_bajo(&productos, umbral)))
}
