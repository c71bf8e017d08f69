//! Client-side search and sorting for list pages
use leptos::prelude::*;
use std::cmp::Ordering;

/// Minimum query length before a filter applies
pub const MIN_FILTER_LEN: usize = 2;

pub trait Searchable {
    /// Case-insensitive match against the row's visible text
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Short or blank queries return every row
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let filter = filter.trim().to_lowercase();
    if filter.chars().count() < MIN_FILTER_LEN {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_filter(&filter))
        .cloned()
        .collect()
}

/// True if any of `fields` contains the already-lowercased `filter`
pub fn contains_any(fields: &[&str], filter: &str) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(filter))
}

pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// Search box and sort column of one list page
#[derive(Clone, Copy)]
pub struct ListControls {
    pub search: RwSignal<String>,
    pub sort_field: RwSignal<&'static str>,
    pub ascending: RwSignal<bool>,
}

impl ListControls {
    pub fn new(default_field: &'static str) -> Self {
        Self {
            search: RwSignal::new(String::new()),
            sort_field: RwSignal::new(default_field),
            ascending: RwSignal::new(true),
        }
    }

    /// Same column flips direction; a new column sorts ascending
    pub fn toggle_sort(&self, field: &'static str) {
        if self.sort_field.get_untracked() == field {
            self.ascending.update(|v| *v = !*v);
        } else {
            self.sort_field.set(field);
            self.ascending.set(true);
        }
    }

    pub fn indicator(&self, field: &'static str) -> &'static str {
        get_sort_indicator(self.sort_field.get(), field, self.ascending.get())
    }

    /// Filtered and sorted copy of `rows`; tracks the controls
    pub fn apply<T: Searchable + Sortable + Clone>(&self, rows: &[T]) -> Vec<T> {
        let mut visible = self.search.with(|q| filter_list(rows, q));
        sort_list(&mut visible, self.sort_field.get(), self.ascending.get());
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item(&'static str, i32);

    impl Searchable for Item {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_any(&[self.0], filter)
        }
    }

    impl Sortable for Item {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "n" => self.1.cmp(&other.1),
                _ => cmp_text(self.0, other.0),
            }
        }
    }

    #[test]
    fn test_filter_ignores_short_queries() {
        let items = vec![Item("Cemento", 1), Item("Arena", 2)];
        assert_eq!(filter_list(&items, "c").len(), 2);
        assert_eq!(filter_list(&items, "CEM"), vec![Item("Cemento", 1)]);
    }

    #[test]
    fn test_sort_both_directions() {
        let mut items = vec![Item("b", 2), Item("A", 3), Item("c", 1)];
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].0, "A");
        sort_list(&mut items, "n", false);
        assert_eq!(items.iter().map(|i| i.1).collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
