use contracts::domain::a001_client::aggregate::Client;

use crate::shared::registry::{Endpoint, RegistryHook};

pub const CLIENTS: Endpoint = Endpoint::paged("/api/clientes");

pub fn use_clients() -> RegistryHook<Client> {
    RegistryHook::new(CLIENTS, "cliente")
}
