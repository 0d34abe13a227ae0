use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dato no encontrado: {0}")]
    NotFound(String),

    #[error("Validación fallida: {0}")]
    Validation(String),

    #[error("Stock insuficiente")]
    InsufficientStock,

    #[error("Error de E/S en el almacén: {0}")]
    Store(#[from] std::io::Error),

    #[error("JSON inválido en el almacén: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InsufficientStock => {
                (StatusCode::BAD_REQUEST, "Stock insuficiente".to_string())
            }
            // Los errores del almacén se registran con contexto y se
            // responden con un mensaje genérico, sin rutas internas.
            AppError::Store(e) => {
                tracing::error!(error = %e, "error de E/S en el almacén");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno leyendo datos".to_string(),
                )
            }
            AppError::Corrupt(e) => {
                tracing::error!(error = %e, "archivo JSON corrupto en el almacén");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno leyendo datos".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
