pub mod badge;
pub mod input;

pub use badge::{tone_color, StatusBadge, ToneBadge};
pub use input::{optional_text, parse_decimal, FormInput};
