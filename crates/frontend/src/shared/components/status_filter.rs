use contracts::domain::common::RecordStatus;
use leptos::prelude::*;
use thaw::*;

pub fn parse_status_filter(value: &str) -> Option<RecordStatus> {
    match value {
        "ACTIVO" => Some(RecordStatus::Active),
        "INACTIVO" => Some(RecordStatus::Inactive),
        _ => None,
    }
}

/// "Todos / Activos / Inactivos" select for registry lists
#[component]
pub fn StatusFilter(on_change: Callback<Option<RecordStatus>>) -> impl IntoView {
    let selected = RwSignal::new(String::new());

    Effect::new(move |prev: Option<String>| {
        let value = selected.get();
        if prev.as_ref().is_some_and(|p| *p != value) {
            on_change.run(parse_status_filter(&value));
        }
        value
    });

    view! {
        <Select value=selected size=SelectSize::Small>
            <option value="">"Todos"</option>
            <option value="ACTIVO">"Activos"</option>
            <option value="INACTIVO">"Inactivos"</option>
        </Select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter("ACTIVO"), Some(RecordStatus::Active));
        assert_eq!(parse_status_filter("INACTIVO"), Some(RecordStatus::Inactive));
        assert_eq!(parse_status_filter(""), None);
    }
}
