use crate::shared::confirm::Tone;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueFormat {
    Money,
    Number { decimals: u8 },
    Integer,
}

pub fn format_value(val: f64, fmt: ValueFormat) -> String {
    match fmt {
        ValueFormat::Money => {
            let abs = val.abs();
            if abs >= 1_000_000.0 {
                format!("$ {:.1}M", val / 1_000_000.0)
            } else {
                let cents = (abs * 100.0).round() as i64;
                let sign = if val < 0.0 { "-" } else { "" };
                format!("$ {}{}.{:02}", sign, format_thousands(cents / 100), cents % 100)
            }
        }
        ValueFormat::Number { decimals } => format!("{:.prec$}", val, prec = decimals as usize),
        ValueFormat::Integer => format_thousands(val.round() as i64),
    }
}

fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// `None` while loading or after an error
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(optional, into)] tone: Signal<Tone>,
    #[prop(optional, into)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match tone.get() {
        Tone::Brand => "stat-card stat-card--success",
        Tone::Danger => "stat-card stat-card--error",
        Tone::Warning => "stat-card stat-card--warning",
        Tone::Default => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "-".to_string(),
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1234567.0, ValueFormat::Money), "$ 1.2M");
        assert_eq!(format_value(15230.5, ValueFormat::Money), "$ 15,230.50");
        assert_eq!(format_value(-8.0, ValueFormat::Money), "$ -8.00");
        assert_eq!(format_value(4200.0, ValueFormat::Integer), "4,200");
        assert_eq!(format_value(2.345, ValueFormat::Number { decimals: 1 }), "2.3");
    }
}
