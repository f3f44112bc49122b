//! Platform glue: task spawning and blocking notifications.

use std::future::Future;

/// Run a future on the Dioxus scheduler without blocking the caller.
///
/// The task belongs to the calling component scope, so signal writes made
/// from it reach the runtime on every platform.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}

/// Modal notification for failures the user has to acknowledge.
pub fn notify_blocking(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
            return;
        }
    }

    log::error!("{message}");
}
