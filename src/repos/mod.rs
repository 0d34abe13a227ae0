pub mod producto_repo;
pub mod venta_repo;
