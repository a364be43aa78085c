//! Result locator construction.

use tracing::warn;
use url::Url;

use adgen_genai::ApiKey;

/// Query parameter carrying the key on download locators.
pub const KEY_PARAM: &str = "key";

/// Append the key to a result locator so it can be downloaded directly.
///
/// Locators that do not parse as absolute URLs get the parameter
/// concatenated instead.
pub fn with_credential(locator: &str, key: &ApiKey) -> String {
    match Url::parse(locator) {
        Ok(mut url) if !url.cannot_be_a_base() => {
            url.query_pairs_mut().append_pair(KEY_PARAM, key.expose());
            url.into()
        }
        Ok(_) | Err(_) => {
            warn!("Result locator is not a hierarchical URL, appending key verbatim");
            format!("{}&{}={}", locator, KEY_PARAM, key.expose())
        }
    }
}
