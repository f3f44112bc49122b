use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{CompatibilityPage, Home, ResultPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Entry {},
    #[route("/result")]
    SingleResult {},
    #[route("/compatibility-result")]
    Compatibility {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Entry {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder { home: nav_home });
    }

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "My Dungeon" }
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

#[component]
fn Entry() -> Element {
    let nav = navigator();
    rsx! {
        Home {
            on_single: move |_| {
                nav.push(Route::SingleResult {});
            },
            on_compatibility: move |_| {
                nav.push(Route::Compatibility {});
            },
        }
    }
}

#[component]
fn SingleResult() -> Element {
    let nav = navigator();
    rsx! {
        ResultPage {
            on_missing: move |_| {
                nav.replace(Route::Entry {});
            },
        }
    }
}

#[component]
fn Compatibility() -> Element {
    let nav = navigator();
    rsx! {
        CompatibilityPage {
            on_missing: move |_| {
                nav.replace(Route::Entry {});
            },
        }
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
