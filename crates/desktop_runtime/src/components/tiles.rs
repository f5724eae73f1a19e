use leptos::*;
use system_ui::{Icon, IconName, IconSize};

use super::widgets::WidgetBody;
use crate::{
    bento::TileLayout,
    model::{HeroEffect, HeroOverlay, IconRef, Item},
};

fn hero_style(hero: &HeroOverlay) -> String {
    let filter = match hero.effect {
        HeroEffect::None | HeroEffect::Float => String::new(),
        HeroEffect::Glow => format!(
            "filter: drop-shadow(0 0 {:.0}px rgba(255, 255, 255, 0.8));",
            8.0 * hero.effect_intensity
        ),
        HeroEffect::Shadow => format!(
            "filter: drop-shadow(0 {:.0}px {:.0}px rgba(0, 0, 0, 0.45));",
            4.0 * hero.effect_intensity,
            12.0 * hero.effect_intensity
        ),
        HeroEffect::Blur => format!("filter: blur({:.1}px);", 2.0 * hero.effect_intensity),
    };
    format!(
        "opacity: {:.2}; transform: translate({:.0}%, {:.0}%) rotate({:.0}deg) scale({:.2}); {filter}",
        hero.opacity, hero.offset_x, hero.offset_y, hero.rotation, hero.scale
    )
}

#[component]
fn TileIcon(icon: IconRef, #[prop(default = IconSize::Lg)] size: IconSize) -> impl IntoView {
    match icon {
        IconRef::Symbolic(name) => view! { <Icon icon=IconName::from_token(&name) size /> }.into_view(),
        IconRef::Remote(url) => view! {
            <img class="bento-tile-favicon" src=url alt="" loading="lazy" draggable="false" />
        }
        .into_view(),
    }
}

#[component]
/// Tile contents for one of the closed set of [`TileLayout`] renderings.
pub(super) fn TileBody(item: Item, layout: TileLayout) -> impl IntoView {
    let Item {
        title,
        description,
        visual,
        ..
    } = item;

    match layout {
        TileLayout::IconTile => view! {
            <div class="bento-tile-body" data-ui-slot="icon-tile">
                <TileIcon icon=visual.icon />
                <span class="bento-tile-title">{title}</span>
            </div>
        }
        .into_view(),
        TileLayout::StatusCard => view! {
            <div class="bento-tile-body" data-ui-slot="status-card">
                <TileIcon icon=visual.icon size=IconSize::Md />
                <div class="bento-tile-text">
                    <span class="bento-tile-title">{title}</span>
                    <span class="bento-tile-description">{description}</span>
                </div>
                <span class="bento-status-dot" aria-hidden="true"></span>
            </div>
        }
        .into_view(),
        TileLayout::HeroCard => {
            let hero = visual.hero.map(|hero| {
                let floating = hero.effect == HeroEffect::Float;
                view! {
                    <div
                        class="bento-hero"
                        aria-hidden="true"
                        data-ui-effect=hero.effect.token()
                        data-ui-floating=if floating { "true" } else { "false" }
                        style=hero_style(&hero)
                    >
                        <Icon icon=IconName::from_token(&hero.icon_name) size=IconSize::Xl />
                    </div>
                }
            });
            view! {
                <div class="bento-tile-body" data-ui-slot="hero-card">
                    {hero}
                    <TileIcon icon=visual.icon size=IconSize::Md />
                    <div class="bento-tile-text">
                        <span class="bento-tile-title">{title}</span>
                        <span class="bento-tile-description">{description}</span>
                    </div>
                </div>
            }
            .into_view()
        }
        TileLayout::Custom(widget_id) => view! {
            <div class="bento-tile-body" data-ui-slot="widget">
                <WidgetBody widget_id compact=true />
            </div>
        }
        .into_view(),
    }
}
