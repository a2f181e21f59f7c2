//! Browser-side settings and element keys.

use carvalue_core::models::settings::ControllerSettings;

/// Attribute tagging each observed card with its reveal key.
pub const REVEAL_KEY_ATTRIBUTE: &str = "data-reveal-key";

/// How long a downloaded report's object URL stays valid. Revoking right
/// after `click()` can cancel the download before the browser fetches it.
pub const OBJECT_URL_LIFETIME_MS: u32 = 40_000;

/// Settings for a page served from `origin`. The prediction endpoints are
/// resolved against it because fetch from wasm needs absolute URLs.
pub fn page_settings(origin: &str) -> ControllerSettings {
    ControllerSettings::with_base_url(origin)
}

/// Key of the `index`-th element matched by the reveal selector.
pub fn reveal_key(index: u32) -> String {
    format!("reveal-{index}")
}

/// Selector for the element carrying `key`.
pub fn reveal_selector(key: &str) -> String {
    format!("[{REVEAL_KEY_ATTRIBUTE}=\"{key}\"]")
}
