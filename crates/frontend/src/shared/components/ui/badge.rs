use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

use crate::shared::confirm::Tone;

pub fn tone_color(tone: Tone) -> BadgeColor {
    match tone {
        Tone::Default => BadgeColor::Subtle,
        Tone::Brand => BadgeColor::Brand,
        Tone::Danger => BadgeColor::Danger,
        Tone::Warning => BadgeColor::Warning,
    }
}

/// Active/inactive pill used by every registry table
#[component]
pub fn StatusBadge(active: bool, #[prop(into)] label: String) -> impl IntoView {
    let color = if active { BadgeColor::Success } else { BadgeColor::Danger };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
}

#[component]
pub fn ToneBadge(tone: Tone, children: Children) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=tone_color(tone)>
            {children()}
        </Badge>
    }
}
