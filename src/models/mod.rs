pub mod producto;
pub mod venta;
