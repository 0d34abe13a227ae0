//! Input validation module
//!
//! Centralized validation for product and sale payloads. Every helper
//! returns a Spanish, human-readable message that is surfaced verbatim
//! to the caller as a 422/400 response.

use crate::models::producto::{ActualizarParcialPayload, ActualizarProductoPayload, CrearProductoPayload};
use crate::models::venta::RegistrarVentaPayload;

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Validate a product name
/// - Must be non-empty after trimming
/// - Maximum 200 characters
pub fn validar_nombre(nombre: &str) -> ValidationResult {
    let trimmed = nombre.trim();

    if trimmed.is_empty() {
        return Err("El nombre del producto no puede estar vacío".into());
    }

    if trimmed.len() > 200 {
        return Err("El nombre del producto no puede superar 200 caracteres".into());
    }

    Ok(())
}

/// Validate a unit price (cost or sale)
/// - Must be finite and strictly positive
pub fn validar_precio(valor: f64, campo: &str) -> ValidationResult {
    if valor.is_nan() || valor.is_infinite() {
        return Err(format!("El {} no es un número válido", campo));
    }

    if valor <= 0.0 {
        return Err(format!("El {} debe ser mayor que 0", campo));
    }

    Ok(())
}

/// Validate a stock or units-sold counter (>= 0)
pub fn validar_cantidad(valor: i64, campo: &str) -> ValidationResult {
    if valor < 0 {
        return Err(format!("El campo {} no puede ser negativo", campo));
    }

    Ok(())
}

/// Validate the quantity of a sale (> 0)
pub fn validar_cantidad_vendida(cantidad: i64) -> ValidationResult {
    if cantidad <= 0 {
        return Err("La cantidad vendida debe ser mayor que 0".into());
    }

    Ok(())
}

/// Validate the low-stock threshold (>= 1)
pub fn validar_umbral(umbral: i64) -> ValidationResult {
    if umbral < 1 {
        return Err("El umbral debe ser mayor o igual a 1".into());
    }

    Ok(())
}

/// Combined validation for creating a product
pub fn validar_crear_producto(payload: &CrearProductoPayload) -> ValidationResult {
    validar_nombre(&payload.nombre)?;
    validar_precio(payload.precio_costo, "precio de costo")?;
    validar_precio(payload.precio_venta, "precio de venta")?;
    validar_cantidad(payload.stock, "stock")?;
    validar_cantidad(payload.unidades_vendidas, "unidades_vendidas")?;
    Ok(())
}

/// Combined validation for a full product update
pub fn validar_actualizar_producto(payload: &ActualizarProductoPayload) -> ValidationResult {
    validar_nombre(&payload.nombre)?;
    validar_precio(payload.precio_costo, "precio de costo")?;
    validar_precio(payload.precio_venta, "precio de venta")?;
    validar_cantidad(payload.stock, "stock")?;
    validar_cantidad(payload.unidades_vendidas, "unidades_vendidas")?;
    Ok(())
}

/// Combined validation for a partial product update (only named fields)
pub fn validar_actualizar_parcial(payload: &ActualizarParcialPayload) -> ValidationResult {
    if let Some(ref nombre) = payload.nombre {
        validar_nombre(nombre)?;
    }
    if let Some(precio) = payload.precio_costo {
        validar_precio(precio, "precio de costo")?;
    }
    if let Some(precio) = payload.precio_venta {
        validar_precio(precio, "precio de venta")?;
    }
    if let Some(stock) = payload.stock {
        validar_cantidad(stock, "stock")?;
    }
    if let Some(unidades) = payload.unidades_vendidas {
        validar_cantidad(unidades, "unidades_vendidas")?;
    }
    Ok(())
}

/// Combined validation for registering a sale
pub fn validar_registrar_venta(payload: &RegistrarVentaPayload) -> ValidationResult {
    validar_cantidad_vendida(payload.cantidad_vendida)
}
