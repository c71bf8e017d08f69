use contracts::domain::a004_warehouse::aggregate::Warehouse;

use crate::shared::registry::{Endpoint, RegistryHook};

/// Not paged: the backend returns every warehouse
pub const WAREHOUSES: Endpoint = Endpoint::plain("/api/bodegas");

pub fn use_warehouses() -> RegistryHook<Warehouse> {
    RegistryHook::new(WAREHOUSES, "bodega")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{ListQuery, RecordStatus};
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    #[test]
    fn test_list_ignores_filters() {
        let mock = MockTransport::new();
        mock.reply_json(json!([{"id": 1, "nombre": "Matriz", "estado": "ACTIVO"}]));
        let query = ListQuery::default().with_search("mat");
        let page = block_on(WAREHOUSES.list::<Warehouse>(&mock, &query)).unwrap();
        assert_eq!(page.rows[0].nombre, "Matriz");
        assert_eq!(mock.calls(), vec![(HttpMethod::Get, "/api/bodegas".to_string())]);
    }

    #[test]
    fn test_deactivate() {
        let mock = MockTransport::new();
        let next = block_on(WAREHOUSES.set_status(&mock, ready(true), 1, RecordStatus::Inactive))
            .unwrap();
        assert_eq!(next, Some(RecordStatus::Inactive));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/api/bodegas/1/estado".to_string())]
        );
    }
}
