use chrono::NaiveDate;
use contracts::domain::a006_expiration::aggregate::{ExpirationDocument, NewExpirationDocument};
use contracts::shared::validation::{FieldErrors, ValidationRules};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a006_expiration::hook::{use_expirations, ExpirationsHook};
use crate::domain::a006_expiration::urgency::{due_label, today, Urgency};
use crate::shared::components::form_modal::{submit_form, FormModal};
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::ui::{optional_text, FormInput, ToneBadge};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;

/// `YYYY-MM-DD` as produced by `<input type="date">`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Form values to a new document, with per-field messages on failure
pub fn build_document(
    nombre: &str,
    tipo: &str,
    entidad: &str,
    emision: &str,
    vencimiento: &str,
) -> Result<NewExpirationDocument, FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(
        "nombre",
        ValidationRules::required()
            .with_max_length(150)
            .validate_string(nombre, "El nombre"),
    );
    errors.check("tipo", ValidationRules::required().validate_string(tipo, "El tipo"));

    let fecha_emision = match optional_text(emision) {
        None => None,
        Some(raw) => {
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                errors.check("fechaEmision", Err("Fecha inválida".to_string()));
            }
            parsed
        }
    };
    let fecha_vencimiento = parse_date(vencimiento);
    match fecha_vencimiento {
        None => errors.check(
            "fechaVencimiento",
            Err("La fecha de vencimiento es obligatoria".to_string()),
        ),
        Some(v) if fecha_emision.is_some_and(|e| e > v) => errors.check(
            "fechaVencimiento",
            Err("El vencimiento no puede ser anterior a la emisión".to_string()),
        ),
        Some(_) => {}
    }

    errors.into_result()?;
    let Some(fecha_vencimiento) = fecha_vencimiento else {
        return Err(FieldErrors::new());
    };
    Ok(NewExpirationDocument {
        nombre: nombre.trim().to_string(),
        tipo: tipo.trim().to_string(),
        entidad: optional_text(entidad),
        fecha_emision,
        fecha_vencimiento,
    })
}

#[component]
pub fn ExpirationDocumentsPage() -> impl IntoView {
    let expirations = use_expirations();
    let show_create = RwSignal::new(false);

    expirations.load_documents();

    let sorted = Memo::new(move |_| {
        expirations.documents.items.with(|docs| {
            let mut docs = docs.clone();
            docs.sort_by_key(|d| d.fecha_vencimiento);
            docs
        })
    });

    view! {
        <div class="page">
            <PageHeader title="Vencimientos" count=Signal::derive(move || expirations.documents.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_create.set(true)>
                    {icon("plus")}
                    " Nuevo documento"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || expirations.api.loading())
                    on_click=Callback::new(move |_| expirations.load_documents())
                />
            </PageHeader>

            <div class="page__content">
                <ActionErrorBanner api=expirations.api />

                <ListStatus
                    loading=Signal::derive(move || expirations.api.loading())
                    error=Signal::derive(move || expirations.api.error())
                    loaded=expirations.documents.loaded
                    has_rows=Signal::derive(move || !sorted.with(Vec::is_empty))
                    empty_text="No hay documentos en seguimiento"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Documento"</TableHeaderCell>
                                <TableHeaderCell>"Tipo"</TableHeaderCell>
                                <TableHeaderCell>"Entidad"</TableHeaderCell>
                                <TableHeaderCell>"Emisión"</TableHeaderCell>
                                <TableHeaderCell>"Vencimiento"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || sorted.get()
                                key=|d| (d.id, d.fecha_vencimiento)
                                children=move |doc: ExpirationDocument| {
                                    let today = today();
                                    let urgency = Urgency::of(doc.fecha_vencimiento, today);
                                    let for_delete = doc.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{doc.nombre.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{doc.tipo.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {doc.entidad.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {doc.fecha_emision.map(|d| format_date(&d.to_string())).unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(&doc.fecha_vencimiento.to_string())}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <ToneBadge tone=urgency.tone()>{due_label(doc.fecha_vencimiento, today)}</ToneBadge>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| expirations.delete(for_delete.clone())
                                                    attr:title="Eliminar"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                <Show when=move || show_create.get()>
                    <NewDocumentForm hook=expirations on_close=Callback::new(move |_| show_create.set(false)) />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn NewDocumentForm(hook: ExpirationsHook, on_close: Callback<()>) -> impl IntoView {
    let nombre = RwSignal::new(String::new());
    let tipo = RwSignal::new(String::new());
    let entidad = RwSignal::new(String::new());
    let emision = RwSignal::new(String::new());
    let vencimiento = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = Callback::new(move |_| {
        let built = build_document(
            &nombre.get_untracked(),
            &tipo.get_untracked(),
            &entidad.get_untracked(),
            &emision.get_untracked(),
            &vencimiento.get_untracked(),
        );
        let dto = match built {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        submit_form(saving, error, on_close, move || async move { hook.create(dto).await });
    });

    view! {
        <FormModal title="Nuevo documento" on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Registrar">
            <FormInput label="Documento" value=nombre field="nombre" errors=errors placeholder="Permiso de funcionamiento" disabled=saving />
            <FormInput label="Tipo" value=tipo field="tipo" errors=errors placeholder="Municipal, tributario..." disabled=saving />
            <FormInput label="Entidad" value=entidad field="entidad" errors=errors disabled=saving />
            <div class="form__row">
                <FormInput label="Emisión" value=emision field="fechaEmision" errors=errors input_type="date" disabled=saving />
                <FormInput label="Vencimiento" value=vencimiento field="fechaVencimiento" errors=errors input_type="date" disabled=saving />
            </div>
        </FormModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_document_ok() {
        let dto = build_document(" RUC ", "Tributario", "", "2024-01-01", "2025-01-01").unwrap();
        assert_eq!(dto.nombre, "RUC");
        assert_eq!(dto.entidad, None);
        assert_eq!(dto.fecha_emision, parse_date("2024-01-01"));
    }

    #[test]
    fn test_build_document_rejects_bad_dates() {
        let errors = build_document("RUC", "Tributario", "", "2025-02-01", "2025-01-01").unwrap_err();
        assert_eq!(
            errors.get("fechaVencimiento"),
            Some("El vencimiento no puede ser anterior a la emisión")
        );

        let errors = build_document("", "", "", "", "").unwrap_err();
        assert!(errors.get("nombre").is_some());
        assert!(errors.get("tipo").is_some());
        assert!(errors.get("fechaVencimiento").is_some());
        assert!(errors.get("fechaEmision").is_none());
    }
}
