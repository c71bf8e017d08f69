use contracts::domain::a002_provider::aggregate::Provider;

use crate::shared::registry::{Endpoint, RegistryHook};

pub const PROVIDERS: Endpoint = Endpoint::paged("/api/proveedores");

pub fn use_providers() -> RegistryHook<Provider> {
    RegistryHook::new(PROVIDERS, "proveedor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_provider::aggregate::ProviderDto;
    use contracts::domain::common::ListQuery;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_list_reads_camel_case() {
        let mock = MockTransport::new();
        mock.reply_json(json!([
            {"id": 2, "razonSocial": "Distribuidora Norte", "ruc": "1790012345001"}
        ]));
        let query = ListQuery {
            status: Some("ACTIVO".into()),
            ..Default::default()
        };
        let page = block_on(PROVIDERS.list::<Provider>(&mock, &query)).unwrap();
        assert_eq!(page.rows[0].razon_social, "Distribuidora Norte");
        assert_eq!(
            mock.calls(),
            vec![(
                HttpMethod::Get,
                "/api/proveedores?estado=ACTIVO&pagina=1&tamano=50".to_string()
            )]
        );
    }

    #[test]
    fn test_create_body_uses_wire_names() {
        let mock = MockTransport::new();
        let dto = ProviderDto {
            razon_social: "Distribuidora Norte".into(),
            ruc: "1790012345001".into(),
            ..Default::default()
        };
        let _: Option<Provider> = block_on(PROVIDERS.create(&mock, &dto)).unwrap();
        let body = mock.last_body().unwrap();
        assert_eq!(body["razonSocial"], json!("Distribuidora Norte"));
        assert!(body.get("id").is_none());
        assert_eq!(mock.calls(), vec![(HttpMethod::Post, "/api/proveedores".to_string())]);
    }
}
