#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config, LogicalSize};
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{CompatibilityPage, Home, ResultPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
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
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

#[cfg(feature = "desktop")]
fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("My Dungeon – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(LogicalSize::new(1024.0, 860.0)),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
}

fn nav_home(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Entry {}, "{label}" })
}

#[component]
fn App() -> Element {
    // Initialize i18n once
    ui::i18n::init();

    // AppNavbar updates this via context on language selection.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder { home: nav_home });

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        // Keyed wrapper forces a full remount on language change.
        div {
            key: "{lang_code()}",
            Router::<Route> { }
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

/// A desktop-specific Router around the shared `Navbar` component
/// which allows us to use the desktop-specific `Route` enum.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        Outlet::<Route> {}
    }
}
