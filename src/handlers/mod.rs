pub mod inventario_handler;
pub mod producto_handler;
