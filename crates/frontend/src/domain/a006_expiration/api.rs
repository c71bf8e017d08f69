use contracts::domain::a006_expiration::aggregate::{
    ExpirationAlert, ExpirationDocument, NewExpirationDocument,
};
use std::future::Future;

use crate::shared::api_utils::segment;
use crate::shared::confirm::gated;
use crate::shared::http::{execute, fetch, ApiError, ApiRequest, Transport};

const ALERTS: &str = "/api/vencimientos/alertas";
const DOCUMENTS: &str = "/api/vencimientos/documentos";

pub async fn fetch_alerts(t: &dyn Transport) -> Result<Vec<ExpirationAlert>, ApiError> {
    fetch(t, ApiRequest::get(ALERTS)).await
}

pub async fn fetch_documents(t: &dyn Transport) -> Result<Vec<ExpirationDocument>, ApiError> {
    fetch(t, ApiRequest::get(DOCUMENTS)).await
}

pub async fn create_document(
    t: &dyn Transport,
    dto: &NewExpirationDocument,
) -> Result<Option<ExpirationDocument>, ApiError> {
    fetch(t, ApiRequest::post(DOCUMENTS).json(dto)?).await
}

/// `Ok(false)` when declined
pub async fn delete_document(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    id: i64,
) -> Result<bool, ApiError> {
    let request = ApiRequest::delete(format!("{}/{}", DOCUMENTS, segment(id)));
    match gated(decision, move || execute(t, request)).await {
        None => Ok(false),
        Some(result) => result.map(|()| true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    #[test]
    fn test_alerts_decode_camel_case_dates() {
        let mock = MockTransport::new();
        mock.reply_json(json!([
            {"id": 3, "documento": "Permiso de bomberos", "fechaVencimiento": "2024-07-01"}
        ]));
        let alerts = block_on(fetch_alerts(&mock)).unwrap();
        assert_eq!(
            alerts[0].fecha_vencimiento,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Get, "/api/vencimientos/alertas".to_string())]
        );
    }

    #[test]
    fn test_create_document_body() {
        let mock = MockTransport::new();
        let dto = NewExpirationDocument {
            nombre: "RUC".into(),
            tipo: "Tributario".into(),
            entidad: None,
            fecha_emision: None,
            fecha_vencimiento: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        let created = block_on(create_document(&mock, &dto)).unwrap();
        assert!(created.is_none());
        assert_eq!(mock.last_body().unwrap()["fechaVencimiento"], json!("2025-01-31"));
    }

    #[test]
    fn test_delete_document_gated() {
        let mock = MockTransport::new();
        assert_eq!(block_on(delete_document(&mock, ready(false), 8)), Ok(false));
        assert_eq!(mock.request_count(), 0);
        assert_eq!(block_on(delete_document(&mock, ready(true), 8)), Ok(true));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Delete, "/api/vencimientos/documentos/8".to_string())]
        );
    }
}
