use api::{CompatibilityResult, PersonResult};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::core::storage::{session_store, COMPATIBILITY_RESULT_KEY};
use crate::results::cards::{
    ActionList, ColorTallyList, HissatsuSection, ItemSection, ResultImage, ToneLegend, ToneNumbers,
};
use crate::results::tally::tally_colors;
use crate::results::{ExportPanel, ExportTarget};
use crate::t;

fn display_name(person: &PersonResult, default: String) -> String {
    person
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or(default)
}

/// Compatibility diagnosis page. Calls `on_missing` instead of rendering when
/// no result is stored for this session.
#[component]
pub fn CompatibilityPage(on_missing: EventHandler<()>) -> Element {
    let stored =
        use_hook(|| session_store().load::<CompatibilityResult>(COMPATIBILITY_RESULT_KEY).ok());
    let missing = stored.is_none();
    use_effect(move || {
        if missing {
            tracing::info!("No stored compatibility result; returning to entry page");
            on_missing.call(());
        }
    });

    let Some(result) = stored else {
        return rsx! {};
    };

    let name1 = display_name(&result.person1, t!("person-default-1"));
    let name2 = display_name(&result.person2, t!("person-default-2"));
    let tallies = tally_colors(result.categorized_hissatsus());
    let title = t!("compatibility-title");

    rsx! {
        section { class: "page page-result page-result--compatibility",
            h1 { "{title}" }
            p { class: "page-result__meta",
                "{name1} ({result.person1.birthdate} {result.person1.birthtime}) × {name2} ({result.person2.birthdate} {result.person2.birthtime})"
            }

            ResultImage { url: result.image_url.clone(), alt: title.clone() }

            section { class: "result-section",
                h2 { {t!("section-numbers-both")} }
                ToneLegend {}
                div { class: "person-numbers",
                    h3 { "{name1}" }
                    ToneNumbers { person: result.person1.clone() }
                }
                div { class: "person-numbers",
                    h3 { "{name2}" }
                    ToneNumbers { person: result.person2.clone() }
                }
            }

            HissatsuSection { title: t!("section-joint"), hissatsus: result.joint_hissatsus.clone() }
            HissatsuSection { title: t!("section-both-have"), hissatsus: result.both_have_hissatsus.clone() }
            HissatsuSection {
                title: t!("section-synergy", name = name1.clone()),
                hissatsus: result.person1_synergy_hissatsus.clone(),
            }
            HissatsuSection {
                title: t!("section-synergy", name = name2.clone()),
                hissatsus: result.person2_synergy_hissatsus.clone(),
            }

            ColorTallyList { tallies }

            if !result.person1.solo_hissatsus.is_empty() {
                HissatsuSection {
                    title: t!("section-person-hissatsus", name = name1.clone()),
                    hissatsus: result.person1.solo_hissatsus.clone(),
                }
            }
            if !result.person2.solo_hissatsus.is_empty() {
                HissatsuSection {
                    title: t!("section-person-hissatsus", name = name2.clone()),
                    hissatsus: result.person2.solo_hissatsus.clone(),
                }
            }
            ItemSection {
                title: t!("section-person-items", name = name1.clone()),
                items: result.person1.items.clone(),
            }
            ItemSection {
                title: t!("section-person-items", name = name2.clone()),
                items: result.person2.items.clone(),
            }

            ActionList { actions: result.actions.clone() }

            ExportPanel { target: ExportTarget::Compatibility(result.clone()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use dioxus::dioxus_core::{NoOpMutations, VirtualDom};

    use super::*;

    static MISSING_CALLS: AtomicUsize = AtomicUsize::new(0);

    #[component]
    fn EmptySession() -> Element {
        rsx! {
            CompatibilityPage {
                on_missing: move |_| {
                    MISSING_CALLS.fetch_add(1, Ordering::SeqCst);
                },
            }
        }
    }

    #[tokio::test]
    async fn empty_session_redirects_without_rendering() {
        let mut dom = VirtualDom::new(EmptySession);
        dom.rebuild_in_place();
        let _ = tokio::time::timeout(Duration::from_millis(200), dom.wait_for_work()).await;
        dom.render_immediate(&mut NoOpMutations);

        assert_eq!(MISSING_CALLS.load(Ordering::SeqCst), 1);
        let html = dioxus_ssr::render(&dom);
        assert!(!html.contains("<section"), "rendered {html}");
    }

    #[test]
    fn unnamed_people_use_defaults() {
        let anonymous = PersonResult::default();
        assert_eq!(display_name(&anonymous, "あなた".into()), "あなた");

        let blank = PersonResult {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(display_name(&blank, "相手".into()), "相手");

        let named = PersonResult {
            name: Some("花子".into()),
            ..Default::default()
        };
        assert_eq!(display_name(&named, "相手".into()), "花子");
    }
}
