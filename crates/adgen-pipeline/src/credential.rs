//! Credential resolution and validation.

use tracing::{debug, warn};

use adgen_genai::{ApiKey, GenerativeBackend};

use crate::error::{PipelineError, RunResult};

/// Values that stand for "no key" when a setting was substituted blindly.
const PLACEHOLDERS: &[&str] = &["undefined", "null"];

/// Pick the key for one run.
///
/// The interactively supplied key wins when usable, otherwise the key from
/// the environment is used. Both are trimmed.
pub fn resolve_credential(
    interactive: Option<&str>,
    environment: Option<&str>,
) -> RunResult<ApiKey> {
    let key = usable(interactive)
        .or_else(|| usable(environment))
        .ok_or_else(PipelineError::empty_credential)?;

    debug!("Resolved API key with length {}", key.len());
    Ok(ApiKey::new(key))
}

/// Whether a key can be sent to the service at all.
pub fn is_usable(key: &ApiKey) -> bool {
    usable(Some(key.expose())).is_some()
}

fn usable(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| {
        !v.is_empty() && !PLACEHOLDERS.iter().any(|p| v.eq_ignore_ascii_case(p))
    })
}

/// Ask the service whether `key` works. Never fails; any error means `false`.
pub async fn validate_credential(backend: &dyn GenerativeBackend, key: &ApiKey) -> bool {
    if !is_usable(key) {
        return false;
    }

    match backend.check_credential(key).await {
        Ok(()) => true,
        Err(e) => {
            warn!("API key validation failed: {}", e);
            false
        }
    }
}
