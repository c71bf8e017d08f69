//! How close a document is to expiring, derived from its date and today

use chrono::NaiveDate;

use crate::shared::confirm::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    Expired,
    /// Seven days or fewer
    ThisWeek,
    /// Thirty days or fewer
    ThisMonth,
    Later,
}

impl Urgency {
    pub fn of(expires: NaiveDate, today: NaiveDate) -> Self {
        match days_until(expires, today) {
            d if d < 0 => Urgency::Expired,
            0..=7 => Urgency::ThisWeek,
            8..=30 => Urgency::ThisMonth,
            _ => Urgency::Later,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Urgency::Expired => Tone::Danger,
            Urgency::ThisWeek => Tone::Warning,
            Urgency::ThisMonth => Tone::Brand,
            Urgency::Later => Tone::Default,
        }
    }

    /// Counted in the bell badge
    pub fn needs_attention(self) -> bool {
        matches!(self, Urgency::Expired | Urgency::ThisWeek)
    }
}

pub fn days_until(expires: NaiveDate, today: NaiveDate) -> i64 {
    (expires - today).num_days()
}

pub fn due_label(expires: NaiveDate, today: NaiveDate) -> String {
    match days_until(expires, today) {
        0 => "Vence hoy".to_string(),
        1 => "Vence mañana".to_string(),
        -1 => "Venció ayer".to_string(),
        d if d < 0 => format!("Venció hace {} días", -d),
        d => format!("Vence en {} días", d),
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_urgency_buckets() {
        let today = date(2024, 6, 10);
        assert_eq!(Urgency::of(date(2024, 6, 9), today), Urgency::Expired);
        assert_eq!(Urgency::of(date(2024, 6, 10), today), Urgency::ThisWeek);
        assert_eq!(Urgency::of(date(2024, 6, 17), today), Urgency::ThisWeek);
        assert_eq!(Urgency::of(date(2024, 6, 18), today), Urgency::ThisMonth);
        assert_eq!(Urgency::of(date(2024, 7, 10), today), Urgency::ThisMonth);
        assert_eq!(Urgency::of(date(2024, 7, 11), today), Urgency::Later);
    }

    #[test]
    fn test_due_label() {
        let today = date(2024, 6, 10);
        assert_eq!(due_label(date(2024, 6, 10), today), "Vence hoy");
        assert_eq!(due_label(date(2024, 6, 15), today), "Vence en 5 días");
        assert_eq!(due_label(date(2024, 6, 7), today), "Venció hace 3 días");
    }

    #[test]
    fn test_attention_and_order() {
        assert!(Urgency::Expired.needs_attention());
        assert!(!Urgency::ThisMonth.needs_attention());
        assert!(Urgency::Expired < Urgency::Later);
        assert_eq!(Urgency::ThisWeek.tone(), Tone::Warning);
    }
}
