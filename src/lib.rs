pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repos;
pub mod reportes;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use config::AppConfig;
use models::producto::Producto;
use models::venta::Venta;
use repos::producto_repo::ProductoRepo;
use repos::venta_repo::VentaRepo;
use store::JsonStore;

/// Estado global de la aplicación, compartido entre handlers.
pub struct AppState {
    pub productos: ProductoRepo,
    pub ventas: VentaRepo,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let productos_store: Arc<JsonStore<Producto>> =
            Arc::new(JsonStore::new(&config.productos_path));
        let ventas_store: Arc<JsonStore<Venta>> = Arc::new(JsonStore::new(&config.ventas_path));

        Self {
            productos: ProductoRepo::new(Arc::clone(&productos_store)),
            ventas: VentaRepo::new(ventas_store, productos_store),
        }
    }
}

/// Construye el router completo de la API.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(raiz))
        .nest("/productos", handlers::producto_handler::router())
        .nest("/inventario", handlers::inventario_handler::router())
        .with_state(state)
}

/// Endpoint de bienvenida.
async fn raiz() -> Json<Value> {
    Json(json!({
        "mensaje": "Bienvenido a la API del Inventario Sicurezza"
    }))
}
