//! Presentational pieces shared by the single and compatibility pages.

use api::{ActionNote, ColorSystem, Hissatsu, Item, PersonResult};
use dioxus::prelude::*;

use super::numbers::{mark_numbers, NumberTone};
use super::tally::ColorTally;
use crate::core::config::AppConfig;
use crate::t;

/// Server image, when the result carries one.
#[component]
pub fn ResultImage(#[props(!optional)] url: Option<String>, alt: String) -> Element {
    let Some(path) = url.filter(|u| !u.is_empty()) else {
        return rsx! {};
    };
    let src = AppConfig::resolve().asset_url(&path);
    rsx! {
        figure { class: "result-image",
            img { src: "{src}", alt: "{alt}", crossorigin: "anonymous" }
        }
    }
}

#[component]
pub fn MarkedNumbers(numbers: Vec<u32>, special: Vec<u32>) -> Element {
    let chips: Vec<(String, &'static str)> = mark_numbers(&numbers, &special)
        .iter()
        .map(|number| {
            let class = if number.special {
                "number-chip number-chip--special"
            } else {
                "number-chip"
            };
            (number.label(), class)
        })
        .collect();
    rsx! {
        ul { class: "number-list",
            for (index, (label, class)) in chips.into_iter().enumerate() {
                li { key: "{index}", class: "{class}", "{label}" }
            }
        }
    }
}

#[component]
pub fn ToneNumbers(person: PersonResult) -> Element {
    let chips: Vec<(u32, &'static str)> = person
        .numbers
        .iter()
        .map(|&n| (n, NumberTone::for_number(n, &person).class()))
        .collect();
    rsx! {
        ul { class: "number-list",
            for (index, (value, class)) in chips.into_iter().enumerate() {
                li { key: "{index}", class: "{class}", "{value}" }
            }
        }
    }
}

#[component]
pub fn ToneLegend() -> Element {
    rsx! {
        ul { class: "number-legend",
            li { span { class: "number-chip number-chip--joint", "●" } {t!("legend-joint")} }
            li { span { class: "number-chip number-chip--synergy-1", "●" } {t!("legend-synergy-1")} }
            li { span { class: "number-chip number-chip--synergy-2", "●" } {t!("legend-synergy-2")} }
            li { span { class: "number-chip number-chip--both", "●" } {t!("legend-both")} }
            li { span { class: "number-chip number-chip--solo", "●" } {t!("legend-solo")} }
        }
    }
}

#[component]
pub fn HissatsuCard(hissatsu: Hissatsu) -> Element {
    let color = hissatsu.color_label().unwrap_or("-").to_string();
    rsx! {
        article { class: "result-card",
            header { class: "result-card__header",
                h3 { "{hissatsu.name}" }
                span { class: "color-badge", "{color}" }
            }
            ResultImage { url: hissatsu.image_url.clone(), alt: hissatsu.name.clone() }
            dl { class: "result-card__fields",
                dt { {t!("card-meaning")} } dd { "{hissatsu.meaning}" }
                dt { {t!("card-movement")} } dd { "{hissatsu.movement}" }
                dt { {t!("card-posture")} } dd { "{hissatsu.basic_posture}" }
                dt { {t!("card-talent")} } dd { "{hissatsu.talent}" }
                dt { {t!("card-traits")} } dd { "{hissatsu.characteristics}" }
                dt { {t!("card-advice")} } dd { "{hissatsu.advice}" }
            }
            p { class: "result-card__state result-card__state--on", strong { "ON: " } "{hissatsu.on_state}" }
            p { class: "result-card__state result-card__state--off", strong { "OFF: " } "{hissatsu.off_state}" }
        }
    }
}

#[component]
pub fn ItemCard(item: Item) -> Element {
    let pairing = match (item.pair_no, item.pair_name.as_deref()) {
        (Some(no), Some(name)) => Some(format!("No.{no} {name}")),
        _ => None,
    };
    let linked = item.hissatsu_name.clone().filter(|name| !name.is_empty());
    rsx! {
        article { class: "result-card",
            header { class: "result-card__header",
                h3 { "No.{item.no} {item.name}" }
                span { class: "color-badge", "{item.color}" }
            }
            ResultImage { url: item.image_url.clone(), alt: item.name.clone() }
            dl { class: "result-card__fields",
                if let Some(pairing) = pairing {
                    dt { {t!("card-pair")} } dd { "{pairing}" }
                }
                if let Some(linked) = linked {
                    dt { {t!("card-linked-hissatsu")} } dd { "{linked}" }
                }
                dt { {t!("card-movement")} } dd { "{item.movement}" }
                dt { {t!("card-description")} } dd { "{item.description}" }
            }
            p { class: "result-card__state result-card__state--on", strong { "ON: " } "{item.on_state}" }
            p { class: "result-card__state result-card__state--off", strong { "OFF: " } "{item.off_state}" }
        }
    }
}

/// Heading plus ability cards, or a placeholder when the list is empty.
#[component]
pub fn HissatsuSection(title: String, hissatsus: Vec<Hissatsu>) -> Element {
    rsx! {
        section { class: "result-section",
            h2 { "{title}" }
            if hissatsus.is_empty() {
                p { class: "result-section__placeholder", {t!("label-none")} }
            } else {
                div { class: "result-grid",
                    for (index, hissatsu) in hissatsus.into_iter().enumerate() {
                        HissatsuCard { key: "{index}", hissatsu }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ItemSection(title: String, items: Vec<Item>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "result-section",
            h2 { "{title}" }
            div { class: "result-grid",
                for item in items.into_iter() {
                    ItemCard { key: "{item.no}", item }
                }
            }
        }
    }
}

/// Backend-computed color groups of a single result.
#[component]
pub fn ColorSystems(systems: Vec<ColorSystem>) -> Element {
    if systems.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "result-section",
            h2 { {t!("section-colors")} }
            for (index, system) in systems.into_iter().enumerate() {
                div { key: "{index}", class: "color-system",
                    p { class: "color-system__title",
                        strong { "{system.name}" }
                        " {system.meaning} - {system.total_count}枚"
                    }
                    ul { class: "color-system__colors",
                        for color in system.colors.iter() {
                            li { key: "{color.name}", "{color.name}: {color.meaning} - {color.count}枚" }
                        }
                    }
                }
            }
        }
    }
}

/// Locally aggregated tally of a compatibility result.
#[component]
pub fn ColorTallyList(tallies: Vec<ColorTally>) -> Element {
    rsx! {
        section { class: "result-section",
            h2 { {t!("section-colors")} }
            if tallies.is_empty() {
                p { class: "result-section__placeholder", {t!("label-none")} }
            } else {
                ul { class: "color-tally",
                    for tally in tallies.into_iter() {
                        li { key: "{tally.label}", class: "color-tally__row",
                            span { class: "color-badge", "{tally.label}" }
                            span { class: "color-tally__count", "{tally.count}枚" }
                            if let Some(meaning) = tally.meaning {
                                span { class: "color-tally__meaning", "{meaning}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActionList(actions: Vec<ActionNote>) -> Element {
    if actions.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "result-section",
            h2 { {t!("section-actions")} }
            dl { class: "action-list",
                for (index, action) in actions.into_iter().enumerate() {
                    div { key: "{index}",
                        dt { "{action.action}" }
                        dd { "{action.meaning}" }
                    }
                }
            }
        }
    }
}
