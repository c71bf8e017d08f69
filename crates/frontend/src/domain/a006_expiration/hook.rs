use contracts::domain::a006_expiration::aggregate::{
    ExpirationAlert, ExpirationDocument, NewExpirationDocument,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::api;
use crate::shared::confirm::{gated, use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::ApiError;
use crate::shared::resource::ResourceList;
use crate::system::auth::request::{use_api, AuthedClient};

/// Alert refresh period of the notification bell
pub const REFRESH_MS: u32 = 5 * 60 * 1000;

#[derive(Clone, Copy)]
pub struct ExpirationsHook {
    pub api: AuthedClient,
    pub alerts: RwSignal<Vec<ExpirationAlert>>,
    pub documents: ResourceList<ExpirationDocument>,
    confirm: ConfirmService,
}

pub fn use_expirations() -> ExpirationsHook {
    ExpirationsHook {
        api: use_api(),
        alerts: RwSignal::new(Vec::new()),
        documents: ResourceList::new(),
        confirm: use_confirm(),
    }
}

impl ExpirationsHook {
    pub fn load_alerts(&self) {
        let this = *self;
        spawn_local(async move {
            match this.api.track(api::fetch_alerts(&this.api)).await {
                Ok(alerts) => {
                    this.alerts.try_set(alerts);
                }
                Err(e) => log::warn!("expiration alerts load failed: {}", e),
            }
        });
    }

    /// Loads now, then every [`REFRESH_MS`] until the owner is cleaned up
    pub fn refresh_periodically(&self) {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        on_cleanup(move || flag.store(false, Ordering::Relaxed));

        let this = *self;
        this.load_alerts();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(REFRESH_MS).await;
                if !running.load(Ordering::Relaxed) {
                    log::debug!("expiration refresh stopped");
                    break;
                }
                this.load_alerts();
            }
        });
    }

    pub fn load_documents(&self) {
        let this = *self;
        spawn_local(async move {
            match this.api.track(api::fetch_documents(&this.api)).await {
                Ok(docs) => this.documents.set(docs),
                Err(e) => log::warn!("expiration documents load failed: {}", e),
            }
        });
    }

    /// `Ok(false)` when declined. Alerts are reloaded since the new
    /// document may already be due.
    pub async fn create(&self, dto: NewExpirationDocument) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Registrar documento",
                format!("¿Registrar «{}» con vencimiento {}?", dto.nombre, dto.fecha_vencimiento.format("%d/%m/%Y")),
            )
            .confirm_text("Registrar")
            .tone(Tone::Brand),
        );
        let client = self.api;
        let Some(created) = gated(decision, || api::create_document(&client, &dto)).await else {
            return Ok(false);
        };
        match created? {
            Some(doc) => self.documents.upsert(doc),
            None => self.load_documents(),
        }
        self.load_alerts();
        Ok(true)
    }

    pub fn delete(&self, doc: ExpirationDocument) {
        let this = *self;
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Eliminar documento",
                format!("¿Eliminar «{}» del seguimiento de vencimientos?", doc.nombre),
            )
            .confirm_text("Eliminar")
            .danger(),
        );
        spawn_local(async move {
            if let Ok(true) = this
                .api
                .track_action(api::delete_document(&this.api, decision, doc.id))
                .await
            {
                this.documents.remove(doc.id);
                this.load_alerts();
            }
        });
    }
}
