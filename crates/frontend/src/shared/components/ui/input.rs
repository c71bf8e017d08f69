use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// Labeled text input bound to a signal, with the field's validation message
/// rendered underneath
#[component]
pub fn FormInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    /// Key looked up in `errors`
    field: &'static str,
    #[prop(into)] errors: Signal<FieldErrors>,
    /// "text" (default), "password", "email", "number", "date"
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let input_id = format!("field-{}", field);
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let message = move || errors.with(|e| e.get(field).map(str::to_string));

    view! {
        <div class="form__group">
            <label class="form__label" for=input_id.clone()>{label}</label>
            <input
                id=input_id
                class=move || if message().is_some() { "form__input form__input--invalid" } else { "form__input" }
                type=input_t
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                aria-invalid=move || message().is_some().to_string()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || message().map(|m| view! { <div class="form__error">{m}</div> })}
        </div>
    }
}

/// Trimmed text, `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses a decimal typed with either `.` or `,`
pub fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" a "), Some("a".to_string()));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal(" 3.25 "), Some(3.25));
        assert_eq!(parse_decimal("x"), None);
    }
}
