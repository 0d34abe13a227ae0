//! Motor de reportes del inventario.
//!
//! Funciones puras sobre instantáneas de productos y ventas: no hacen E/S
//! ni mutan nada; los handlers cargan los datos y pasan las listas.

use serde::Serialize;

use crate::models::producto::Producto;
use crate::models::venta::Venta;

/// Entrada del ranking de productos por ganancia total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingGanancia {
    pub id: i64,
    pub nombre: String,
    pub unidades: i64,
    pub ganancia_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GananciaProducto {
    pub producto: String,
    pub ganancia_total: f64,
    pub unidades_vendidas: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PorcentajeGanancia {
    pub producto: String,
    pub ganancia_unitaria: f64,
    pub porcentaje_ganancia: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValorInventario {
    pub valor_total_costo: f64,
    pub valor_total_venta: f64,
}

fn redondear2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

/// Ranking de productos por ganancia total realizada sobre el registro de
/// ventas. Las ventas cuyo producto no existe se omiten en silencio. Orden
/// descendente por ganancia; los empates conservan el orden de primera
/// aparición en el registro de ventas (orden estable).
pub fn ranking_ganancias(productos: &[Producto], ventas: &[Venta]) -> Vec<RankingGanancia> {
    let mut resumen: Vec<RankingGanancia> = Vec::new();

    for venta in ventas {
        let Some(producto) = productos.iter().find(|p| p.id == venta.producto_id) else {
            continue;
        };

        let ganancia_unitaria = producto.precio_venta - producto.precio_costo;
        match resumen.iter_mut().find(|r| r.id == producto.id) {
            Some(entrada) => {
                entrada.unidades += venta.cantidad_vendida;
                entrada.ganancia_total += venta.cantidad_vendida as f64 * ganancia_unitaria;
            }
            None => resumen.push(RankingGanancia {
                id: producto.id,
                nombre: producto.nombre.clone(),
                unidades: venta.cantidad_vendida,
                ganancia_total: venta.cantidad_vendida as f64 * ganancia_unitaria,
            }),
        }
    }

    // sort_by es estable: los empates mantienen el orden de inserción
    resumen.sort_by(|a, b| {
        b.ganancia_total
            .partial_cmp(&a.ganancia_total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    resumen
}

/// Ganancia total según el contador `unidades_vendidas` de cada producto,
/// independiente del registro de ventas. Redondeada a 2 decimales.
pub fn ganancia_total(productos: &[Producto]) -> f64 {
    let total: f64 = productos
        .iter()
        .map(|p| (p.precio_venta - p.precio_costo) * p.unidades_vendidas as f64)
        .sum();
    redondear2(total)
}

/// Producto con mayor stock; los empates los gana la primera aparición.
pub fn producto_mayor_stock(productos: &[Producto]) -> Option<&Producto> {
    productos.iter().reduce(|mayor, p| {
        if p.stock > mayor.stock {
            p
        } else {
            mayor
        }
    })
}

/// Unidades totales en stock.
pub fn stock_total(productos: &[Producto]) -> i64 {
    productos.iter().map(|p| p.stock).sum()
}

/// Valor del inventario a precio de costo y a precio de venta.
pub fn valor_inventario(productos: &[Producto]) -> ValorInventario {
    let costo: f64 = productos.iter().map(|p| p.precio_costo * p.stock as f64).sum();
    let venta: f64 = productos.iter().map(|p| p.precio_venta * p.stock as f64).sum();
    ValorInventario {
        valor_total_costo: redondear2(costo),
        valor_total_venta: redondear2(venta),
    }
}

/// Productos con stock agotado.
pub fn productos_agotados(productos: &[Producto]) -> Vec<Producto> {
    productos.iter().filter(|p| p.stock == 0).cloned().collect()
}

/// Productos con stock menor o igual al umbral.
pub fn stock_bajo(productos: &[Producto], umbral: i64) -> Vec<Producto> {
    productos
        .iter()
        .filter(|p| p.stock <= umbral)
        .cloned()
        .collect()
}

/// Ganancia total de un producto según sus unidades vendidas.
pub fn ganancia_producto(productos: &[Producto], producto_id: i64) -> Option<GananciaProducto> {
    let p = productos.iter().find(|p| p.id == producto_id)?;
    let ganancia_unitaria = p.precio_venta - p.precio_costo;
    Some(GananciaProducto {
        producto: p.nombre.clone(),
        ganancia_total: redondear2(p.unidades_vendidas as f64 * ganancia_unitaria),
        unidades_vendidas: p.unidades_vendidas,
    })
}

/// Porcentaje de ganancia unitaria de un producto.
///
/// El modelo exige precio_costo > 0, pero el cálculo conserva la guarda
/// contra división por cero de los datos históricos.
pub fn porcentaje_ganancia(productos: &[Producto], producto_id: i64) -> Option<PorcentajeGanancia> {
    let p = productos.iter().find(|p| p.id == producto_id)?;
    let ganancia_unitaria = p.precio_venta - p.precio_costo;
    let porcentaje = if p.precio_costo == 0.0 {
        0.0
    } else {
        ganancia_unitaria / p.precio_costo * 100.0
    };
    Some(PorcentajeGanancia {
        producto: p.nombre.clone(),
        ganancia_unitaria: redondear2(ganancia_unitaria),
        porcentaje_ganancia: redondear2(porcentaje),
    })
}

/// Todas las ventas registradas para un producto.
pub fn historial_ventas(ventas: &[Venta], producto_id: i64) -> Vec<Venta> {
    ventas
        .iter()
        .filter(|v| v.producto_id == producto_id)
        .cloned()
        .collect()
}
