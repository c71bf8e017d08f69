//! Report dashboards (`/api/reportes/*`).
//!
//! The reporting endpoints have not settled on one field casing, so every
//! field accepts its camelCase, PascalCase and snake_case spellings here and
//! nowhere else. Views only ever see the canonical names below.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRange {
    pub desde: String,
    pub hasta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    #[serde(alias = "Fecha", alias = "dia", alias = "Dia")]
    pub fecha: String,
    #[serde(alias = "Total", alias = "monto", alias = "Monto")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    #[serde(default, alias = "totalVentas", alias = "TotalVentas")]
    pub total_ventas: f64,
    #[serde(default, alias = "cantidadVentas", alias = "CantidadVentas", alias = "numeroVentas")]
    pub cantidad_ventas: u64,
    #[serde(default, alias = "ticketPromedio", alias = "TicketPromedio")]
    pub ticket_promedio: f64,
    #[serde(default, alias = "porDia", alias = "PorDia", alias = "ventasPorDia")]
    pub por_dia: Vec<DailySales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopClient {
    #[serde(alias = "Nombre", alias = "cliente", alias = "Cliente")]
    pub nombre: String,
    #[serde(alias = "Total", alias = "totalCompras", alias = "TotalCompras")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientsReport {
    #[serde(default, alias = "totalClientes", alias = "TotalClientes")]
    pub total_clientes: u64,
    #[serde(default, alias = "clientesNuevos", alias = "ClientesNuevos", alias = "Nuevos")]
    pub nuevos: u64,
    #[serde(default, alias = "topClientes", alias = "TopClientes")]
    pub top: Vec<TopClient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationRow {
    #[serde(alias = "Producto", alias = "nombreProducto")]
    pub producto: String,
    #[serde(default, alias = "Rotacion", alias = "indiceRotacion")]
    pub rotacion: f64,
    #[serde(default, alias = "coberturaDias", alias = "CoberturaDias")]
    pub cobertura_dias: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    #[serde(default, alias = "valorTotal", alias = "ValorTotal")]
    pub valor_total: f64,
    #[serde(
        default,
        alias = "productosBajoMinimo",
        alias = "ProductosBajoMinimo",
        alias = "bajoMinimo"
    )]
    pub productos_bajo_minimo: u64,
    #[serde(default, alias = "Rotacion", alias = "rotacionProductos")]
    pub rotacion: Vec<RotationRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_report_accepts_every_casing() {
        let camel: SalesReport = serde_json::from_str(
            r#"{"totalVentas": 120.5, "cantidadVentas": 3, "porDia": [{"fecha": "2024-06-01", "total": 120.5}]}"#,
        )
        .unwrap();
        let pascal: SalesReport = serde_json::from_str(
            r#"{"TotalVentas": 120.5, "CantidadVentas": 3, "PorDia": [{"Fecha": "2024-06-01", "Total": 120.5}]}"#,
        )
        .unwrap();
        let snake: SalesReport = serde_json::from_str(
            r#"{"total_ventas": 120.5, "cantidad_ventas": 3, "por_dia": [{"dia": "2024-06-01", "monto": 120.5}]}"#,
        )
        .unwrap();

        assert_eq!(camel, pascal);
        assert_eq!(camel, snake);
        assert_eq!(camel.por_dia[0].fecha, "2024-06-01");
    }

    #[test]
    fn test_missing_fields_default() {
        let r: InventoryReport = serde_json::from_str(r#"{"ValorTotal": 10}"#).unwrap();
        assert_eq!(r.valor_total, 10.0);
        assert_eq!(r.productos_bajo_minimo, 0);
        assert!(r.rotacion.is_empty());
    }

    #[test]
    fn test_clients_report_top_aliases() {
        let r: ClientsReport = serde_json::from_str(
            r#"{"TotalClientes": 4, "topClientes": [{"Cliente": "Ferreteria Sur", "TotalCompras": 900}]}"#,
        )
        .unwrap();
        assert_eq!(r.total_clientes, 4);
        assert_eq!(r.top[0].nombre, "Ferreteria Sur");
        assert_eq!(r.top[0].total, 900.0);
    }
}
