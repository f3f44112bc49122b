use api::SingleResult;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::core::storage::{session_store, RESULT_KEY};
use crate::results::cards::{
    ActionList, ColorSystems, HissatsuSection, ItemSection, MarkedNumbers, ResultImage,
};
use crate::results::{ExportPanel, ExportTarget};
use crate::t;

/// Single diagnosis page. Calls `on_missing` instead of rendering when no
/// result is stored for this session.
#[component]
pub fn ResultPage(on_missing: EventHandler<()>) -> Element {
    let stored = use_hook(|| session_store().load::<SingleResult>(RESULT_KEY).ok());
    let missing = stored.is_none();
    use_effect(move || {
        if missing {
            tracing::info!("No stored result; returning to entry page");
            on_missing.call(());
        }
    });

    let Some(result) = stored else {
        return rsx! {};
    };

    let heading = match result.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => t!("result-title-named", name = name),
        None => t!("result-title"),
    };

    rsx! {
        section { class: "page page-result",
            h1 { "{heading}" }
            p { class: "page-result__meta", "{result.birthdate} {result.birthtime}" }

            ResultImage { url: result.image_url.clone(), alt: heading.clone() }

            section { class: "result-section",
                h2 { {t!("section-numbers")} }
                MarkedNumbers {
                    numbers: result.numbers.clone(),
                    special: result.hissatsu_numbers.clone(),
                }
            }

            if !result.hissatsus.is_empty() || !result.items.is_empty() {
                section { class: "result-section",
                    h2 { {t!("section-names")} }
                    ul { class: "name-list",
                        for (index, hissatsu) in result.hissatsus.iter().enumerate() {
                            li { key: "h{index}", class: "name-list__hissatsu", "【必殺技】{hissatsu.name}" }
                        }
                        for item in result.items.iter() {
                            li { key: "i{item.no}", "No.{item.no}  {item.name}" }
                        }
                    }
                }
            }

            ColorSystems { systems: result.color_counts.color_systems.clone() }
            HissatsuSection { title: t!("section-hissatsus"), hissatsus: result.hissatsus.clone() }
            ItemSection { title: t!("section-items"), items: result.items.clone() }
            ActionList { actions: result.actions.clone() }

            ExportPanel { target: ExportTarget::Single(result.clone()) }
        }
    }
}
