//! Blocking browser dialogs for the character list controller.

use roster::Prompter;

/// [`Prompter`] backed by `window.alert` / `window.confirm`.
///
/// Off the web there is no dialog surface: alerts are logged and every
/// confirmation is declined, so nothing destructive happens unattended.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
    fn alert(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::info!("alert: {message}");
        }
    }

    fn confirm(&self, question: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.confirm_with_message(question).ok())
                .unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("confirm unavailable, declining: {question}");
            false
        }
    }
}
