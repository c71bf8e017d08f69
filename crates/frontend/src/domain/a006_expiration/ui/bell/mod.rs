use contracts::domain::a006_expiration::aggregate::ExpirationAlert;
use leptos::prelude::*;

use crate::domain::a006_expiration::hook::use_expirations;
use crate::domain::a006_expiration::urgency::{due_label, today, Urgency};
use crate::shared::components::ui::ToneBadge;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;

/// Alerts soonest first
pub fn sorted_alerts(alerts: &[ExpirationAlert]) -> Vec<ExpirationAlert> {
    let mut sorted = alerts.to_vec();
    sorted.sort_by_key(|a| a.fecha_vencimiento);
    sorted
}

/// Top-bar bell with the count of expired or due-this-week documents.
/// Refreshes every five minutes while mounted.
#[component]
pub fn ExpirationBell() -> impl IntoView {
    let expirations = use_expirations();
    let open = RwSignal::new(false);

    expirations.refresh_periodically();

    let urgent = Memo::new(move |_| {
        let today = today();
        expirations.alerts.with(|alerts| {
            alerts
                .iter()
                .filter(|a| Urgency::of(a.fecha_vencimiento, today).needs_attention())
                .count()
        })
    });

    view! {
        <div class="notification-bell">
            <button
                class="top-header__icon-button"
                title="Vencimientos"
                aria-label="Vencimientos"
                on:click=move |_| open.update(|v| *v = !*v)
            >
                {icon("bell")}
                <Show when=move || { urgent.get() > 0 }>
                    <span class="notification-bell__count">{move || urgent.get().to_string()}</span>
                </Show>
            </button>

            <Show when=move || open.get()>
                <div class="notification-bell__panel">
                    <div class="notification-bell__header">"Vencimientos próximos"</div>
                    {move || {
                        let alerts = expirations.alerts.with(|a| sorted_alerts(a));
                        if alerts.is_empty() {
                            return view! {
                                <div class="notification-bell__empty">"Sin documentos por vencer"</div>
                            }
                            .into_any();
                        }
                        let today = today();
                        alerts
                            .into_iter()
                            .map(|alert| {
                                let urgency = Urgency::of(alert.fecha_vencimiento, today);
                                let date = alert.fecha_vencimiento.to_string();
                                view! {
                                    <div class="notification-bell__item">
                                        <div class="notification-bell__title">{alert.documento}</div>
                                        {alert.entidad.map(|e| view! { <div class="notification-bell__subtitle">{e}</div> })}
                                        <div class="notification-bell__meta">
                                            <span>{format_date(&date)}</span>
                                            <ToneBadge tone=urgency.tone()>
                                                {due_label(alert.fecha_vencimiento, today)}
                                            </ToneBadge>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sorted_alerts() {
        let alert = |id, d| ExpirationAlert {
            id,
            documento: format!("doc {}", id),
            entidad: None,
            fecha_vencimiento: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
        };
        let sorted = sorted_alerts(&[alert(1, 20), alert(2, 3), alert(3, 11)]);
        assert_eq!(sorted.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }
}
