//! Shared UI crate for My Dungeon: views, result presentation and the
//! export pipeline. Platform crates only add routing and window setup.

pub mod core;
pub mod export;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

#[cfg(test)]
mod tests;
