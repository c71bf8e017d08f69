use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// `(id, label)` pairs for a select, in list order
pub fn select_options<T>(rows: &[T], id: impl Fn(&T) -> i64, label: impl Fn(&T) -> String) -> Vec<(i64, String)> {
    rows.iter().map(|r| (id(r), label(r))).collect()
}

/// Label of `id` among `options`, or the id itself when missing
pub fn option_label(options: &[(i64, String)], id: i64) -> String {
    options
        .iter()
        .find(|(o, _)| *o == id)
        .map(|(_, l)| l.clone())
        .unwrap_or_else(|| id.to_string())
}

pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Labeled select over records, bound to the chosen id
#[component]
pub fn RecordSelect(
    #[prop(into)] label: String,
    value: RwSignal<Option<i64>>,
    #[prop(into)] options: Signal<Vec<(i64, String)>>,
    field: &'static str,
    #[prop(into)] errors: Signal<FieldErrors>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let select_id = format!("field-{}", field);
    let placeholder = placeholder.unwrap_or_else(|| "Seleccione...".to_string());
    let message = move || errors.with(|e| e.get(field).map(str::to_string));

    view! {
        <div class="form__group">
            <label class="form__label" for=select_id.clone()>{label}</label>
            <select
                id=select_id
                class=move || if message().is_some() { "form__input form__input--invalid" } else { "form__input" }
                prop:value=move || value.get().map(|v| v.to_string()).unwrap_or_default()
                disabled=move || disabled.get()
                on:change=move |ev| value.set(parse_id(&event_target_value(&ev)))
            >
                <option value="">{placeholder}</option>
                <For
                    each=move || options.get()
                    key=|(id, label)| (*id, label.clone())
                    children=move |(id, label)| view! { <option value=id.to_string()>{label}</option> }
                />
            </select>
            {move || message().map(|m| view! { <div class="form__error">{m}</div> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn test_select_options() {
        let rows = vec![(3, "Matriz"), (5, "Sucursal")];
        let opts = select_options(&rows, |r| r.0, |r| r.1.to_string());
        assert_eq!(opts, vec![(3, "Matriz".to_string()), (5, "Sucursal".to_string())]);
        assert_eq!(option_label(&opts, 5), "Sucursal");
        assert_eq!(option_label(&opts, 8), "8");
    }
}
