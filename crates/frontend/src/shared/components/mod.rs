pub mod form_modal;
pub mod line_items;
pub mod list_state;
pub mod page_header;
pub mod pagination_controls;
pub mod record_select;
pub mod stat_card;
pub mod status_filter;
pub mod ui;
