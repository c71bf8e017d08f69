use contracts::dashboards::d400_reports::dto::{ClientsReport, InventoryReport, ReportRange, SalesReport};

use crate::shared::http::{fetch, ApiError, ApiRequest, CancelToken, Transport};

const API_BASE: &str = "/api/reportes";

/// `cancel` aborts the request when a newer range supersedes it
pub async fn sales_report(
    t: &dyn Transport,
    range: &ReportRange,
    cancel: Option<CancelToken>,
) -> Result<SalesReport, ApiError> {
    let mut request = ApiRequest::get(format!("{}/ventas", API_BASE)).query(range)?;
    if let Some(token) = cancel {
        request = request.with_cancel(token);
    }
    fetch(t, request).await
}

pub async fn clients_report(t: &dyn Transport) -> Result<ClientsReport, ApiError> {
    fetch(t, ApiRequest::get(format!("{}/clientes", API_BASE))).await
}

pub async fn inventory_report(t: &dyn Transport) -> Result<InventoryReport, ApiError> {
    fetch(t, ApiRequest::get(format!("{}/inventario", API_BASE))).await
}

/// `desde` after `hasta` is rejected before any request
pub fn check_range(range: &ReportRange) -> Result<(), String> {
    if range.desde.is_empty() || range.hasta.is_empty() {
        return Err("Indique ambas fechas".to_string());
    }
    // ISO dates compare correctly as text
    if range.desde > range.hasta {
        return Err("La fecha inicial no puede ser posterior a la final".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    fn june() -> ReportRange {
        ReportRange {
            desde: "2024-06-01".to_string(),
            hasta: "2024-06-30".to_string(),
        }
    }

    #[test]
    fn test_sales_report_query() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"TotalVentas": 980.0, "CantidadVentas": 7}));
        let report = block_on(sales_report(&mock, &june(), None)).unwrap();
        assert_eq!(report.total_ventas, 980.0);
        assert_eq!(report.cantidad_ventas, 7);
        assert_eq!(
            mock.calls(),
            vec![(
                HttpMethod::Get,
                "/api/reportes/ventas?desde=2024-06-01&hasta=2024-06-30".to_string()
            )]
        );
    }

    #[test]
    fn test_sales_report_carries_cancel_token() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"TotalVentas": 0.0, "CantidadVentas": 0}));
        let token = CancelToken::new();
        block_on(sales_report(&mock, &june(), Some(token.clone()))).unwrap();
        token.cancel();
        let sent = mock.requests();
        assert!(sent[0].cancel.as_ref().is_some_and(|t| t.is_cancelled()));
    }

    #[test]
    fn test_inventory_report_snake_case() {
        let mock = MockTransport::new();
        mock.reply_json(json!({
            "valor_total": 5400.0,
            "productos_bajo_minimo": 2,
            "rotacion": [{"producto": "Cemento", "rotacion": 3.5, "cobertura_dias": 12.0}]
        }));
        let report = block_on(inventory_report(&mock)).unwrap();
        assert_eq!(report.productos_bajo_minimo, 2);
        assert_eq!(report.rotacion[0].cobertura_dias, Some(12.0));
        assert_eq!(mock.calls()[0].1, "/api/reportes/inventario");
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(&june()).is_ok());
        let reversed = ReportRange {
            desde: "2024-07-01".to_string(),
            hasta: "2024-06-01".to_string(),
        };
        assert!(check_range(&reversed).is_err());
        assert!(check_range(&ReportRange::default()).is_err());
    }
}
