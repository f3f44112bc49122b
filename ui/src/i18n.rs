//! Localization for `dungeon-ui`.
//!
//! `i18n-embed` selects the language, `fluent` formats messages, `rust-embed`
//! bundles the `.ftl` files and `i18n-embed-fl` checks keys at compile time.
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   ja-JP/dungeon_ui.ftl   (fallback/reference)
//!   en-US/dungeon_ui.ftl
//! ```
//!
//! Usage in a component (after calling `i18n::init()` once at app start):
//! ```ignore
//! use crate::t;
//! let label = t!("nav-home");
//! ```
//!
//! Result content (ability names, section titles inside exports) is domain
//! text from the backend and is not translated here.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Translation macro routed through the shared loader.
///
/// ```ignore
/// t!("nav-home")
/// t!("result-title-named", name = "花子")
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain": the crate name as `fl!` resolves it, which is also the
/// FTL file name.
///
/// Fallback file path must be: `i18n/ja-JP/{DOMAIN}.ftl`
pub(crate) const DOMAIN: &str = "dungeon_ui";

/// Language shown when none of the requested ones is available.
pub const FALLBACK_LANGUAGE: &str = "ja-JP";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
pub(crate) struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .unwrap_or_else(|_| LanguageIdentifier::default());
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            log::warn!("Failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Language currently used for lookups.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
