//! Endpoints de productos: CRUD, búsquedas, exportación CSV y ganancia
//! por producto.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::producto::{
    ActualizarParcialPayload, ActualizarProductoPayload, AjustarStockPayload,
    CrearProductoPayload, Producto,
};
use crate::repos::producto_repo::FiltroProductos;
use crate::reportes;
use crate::validation;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(listar_productos).post(crear_producto))
        .route("/buscar", get(buscar_productos))
        .route("/filtrar", get(filtrar_productos))
        .route("/exportar/csv", get(exportar_csv))
        .route(
            "/:id",
            get(obtener_producto)
                .put(actualizar_producto)
                .patch(actualizar_parcial)
                .delete(eliminar_producto),
        )
        .route("/:id/ajustar-stock", post(ajustar_stock))
        .route("/:id/ganancia", get(ganancia_producto))
        .route("/:id/ganancia-porcentaje", get(porcentaje_ganancia))
}

/// Listar todos los productos
async fn listar_productos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Producto>>, AppError> {
    Ok(Json(state.productos.listar()?))
}

/// Obtener producto por ID
async fn obtener_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Producto>, AppError> {
    Ok(Json(state.productos.obtener(id)?))
}

/// Crear nuevo producto con ID generado automáticamente
async fn crear_producto(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CrearProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validar_crear_producto(&payload).map_err(AppError::Validation)?;

    let producto = state.productos.crear(payload)?;
    tracing::info!(id = producto.id, nombre = %producto.nombre, "producto creado");
    Ok((StatusCode::CREATED, Json(producto)))
}

/// Actualizar producto existente (reemplazo completo salvo el id)
async fn actualizar_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarProductoPayload>,
) -> Result<Json<Producto>, AppError> {
    validation::validar_actualizar_producto(&payload).map_err(AppError::Validation)?;

    let producto = state.productos.actualizar(id, payload)?;
    tracing::info!(id, nombre = %producto.nombre, "producto actualizado");
    Ok(Json(producto))
}

/// Actualización parcial: solo los campos presentes
async fn actualizar_parcial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(campos): Json<ActualizarParcialPayload>,
) -> Result<Json<Producto>, AppError> {
    validation::validar_actualizar_parcial(&campos).map_err(AppError::Validation)?;

    let producto = state.productos.actualizar_parcial(id, campos)?;
    tracing::info!(id, "producto actualizado parcialmente");
    Ok(Json(producto))
}

/// Eliminar producto por ID
async fn eliminar_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.productos.eliminar(id)? {
        return Err(AppError::NotFound("Producto no encontrado".into()));
    }
    tracing::info!(id, "producto eliminado");
    Ok(StatusCode::NO_CONTENT)
}

/// Sumar o restar stock de un producto
async fn ajustar_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AjustarStockPayload>,
) -> Result<Json<Producto>, AppError> {
    let producto = state.productos.ajustar_stock(id, payload.delta)?;
    tracing::info!(id, delta = payload.delta, stock = producto.stock, "stock ajustado");
    Ok(Json(producto))
}

#[derive(Debug, Deserialize)]
struct BuscarQuery {
    nombre: String,
}

/// Buscar productos por nombre (subcadena, sin distinguir mayúsculas)
async fn buscar_productos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BuscarQuery>,
) -> Result<Json<Vec<Producto>>, AppError> {
    if query.nombre.is_empty() {
        return Err(AppError::Validation(
            "El parámetro nombre no puede estar vacío".into(),
        ));
    }

    let resultados = state.productos.buscar_por_nombre(&query.nombre)?;
    if resultados.is_empty() {
        return Err(AppError::NotFound(
            "No se encontraron productos con ese nombre".into(),
        ));
    }
    Ok(Json(resultados))
}

/// Filtro avanzado de productos; cada criterio es opcional
async fn filtrar_productos(
    State(state): State<Arc<AppState>>,
    Query(filtro): Query<FiltroProductos>,
) -> Result<Json<Vec<Producto>>, AppError> {
    if filtro.precio_min.is_some_and(|v| v < 0.0) || filtro.precio_max.is_some_and(|v| v < 0.0) {
        return Err(AppError::Validation(
            "Los precios del filtro no pueden ser negativos".into(),
        ));
    }
    if filtro.stock_min.is_some_and(|v| v < 0) {
        return Err(AppError::Validation(
            "El stock mínimo no puede ser negativo".into(),
        ));
    }

    let resultados = state.productos.filtrar(&filtro)?;
    if resultados.is_empty() {
        return Err(AppError::NotFound(
            "No se encontraron productos con ese criterio".into(),
        ));
    }
    Ok(Json(resultados))
}

/// Exportar todos los productos en CSV
async fn exportar_csv(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let productos = state.productos.listar()?;

    let mut cuerpo =
        String::from("id,nombre,descripcion,precio_costo,precio_venta,stock,unidades_vendidas\n");
    for p in &productos {
        cuerpo.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            p.id,
            campo_csv(&p.nombre),
            campo_csv(&p.descripcion),
            p.precio_costo,
            p.precio_venta,
            p.stock,
            p.unidades_vendidas
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=productos.csv",
            ),
        ],
        cuerpo,
    ))
}

/// Entrecomilla un campo CSV solo cuando hace falta.
fn campo_csv(valor: &str) -> String {
    if valor.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}

/// Calcular la ganancia total de un producto según sus unidades vendidas
async fn ganancia_producto(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<reportes::GananciaProducto>, AppError> {
    let productos = state.productos.listar()?;
    reportes::ganancia_producto(&productos, id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))
}

/// Calcular el porcentaje de ganancia unitaria de un producto
async fn porcentaje_ganancia(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<reportes::PorcentajeGanancia>, AppError> {
    let productos = state.productos.listar()?;
    reportes::porcentaje_ganancia(&productos, id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".into()))
}

#[cfg(test)]
mod tests {
    use super::campo_csv;

    #[test]
    fn campos_simples_sin_comillas() {
        assert_eq!(campo_csv("Camiseta"), "Camiseta");
    }

    #[test]
    fn comas_y_comillas_se_escapan() {
        assert_eq!(campo_csv("rojo, grande"), "\"rojo, grande\"");
        assert_eq!(campo_csv("talla \"M\""), "\"talla \"\"M\"\"\"");
    }
}
