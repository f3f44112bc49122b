use crate::i18n;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platform-supplied link builders, so `ui` does not need to know each
/// platform's `Route` enum.
///
/// Each closure receives the localized label and returns a `Link` that
/// already contains it.
///
/// ```ignore
/// use ui::components::app_navbar::{NavBuilder, register_nav};
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Brand, home link and language picker. A platform may provide a
/// `Signal<String>` language context; it is updated on every switch so the
/// routed subtree can remount with the new strings.
#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let lang_list = langs();
    let selected_lang = current_lang();
    let show_switcher = lang_list.len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => log::warn!("Language switch to {val} failed: {err}"),
        }
    };

    let home_link = NAV_BUILDER.get().map(|b| (b.home)(&t!("nav-home")));
    let tagline = t!("tagline");

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            // Hidden marker keeps a reactive dependency on the global language signal.
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "My Dungeon" }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(link) = home_link {
                    nav { class: "navbar__links", {link} }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{selected_lang}",
                            oninput: on_change,
                            for code in lang_list.iter() {
                                option { key: "{code}", value: "{code}", selected: *code == selected_lang, "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
