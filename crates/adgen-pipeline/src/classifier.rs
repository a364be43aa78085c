//! Maps raw remote failures onto the pipeline error taxonomy.

use adgen_genai::GenAiError;

use crate::error::PipelineError;

/// Statuses the generation API uses when it refuses a key.
const REJECTION_STATUSES: &[u16] = &[400, 403];

const REJECTION_REASON: &str = "API_KEY_INVALID";

/// Lower-case markers checked against unstructured error text.
const REJECTION_MARKERS: &[&str] = &["api key not valid", "api_key_invalid", "400", "403"];

/// Classify a failed remote call.
///
/// Structured fields win; the message text is only searched when they do not
/// identify a rejected credential.
pub fn classify(error: &GenAiError) -> PipelineError {
    let message = raw_message(error);

    let status_rejects = error
        .status()
        .map(|status| REJECTION_STATUSES.contains(&status))
        .unwrap_or(false);
    let reason_rejects = error
        .reason()
        .map(|reason| reason.eq_ignore_ascii_case(REJECTION_REASON))
        .unwrap_or(false);

    if status_rejects || reason_rejects {
        return PipelineError::credential_rejected(message);
    }

    classify_message(&message)
}

/// Classify free-form error text.
pub fn classify_message(message: &str) -> PipelineError {
    let lowered = message.to_lowercase();
    if REJECTION_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        PipelineError::credential_rejected(message)
    } else {
        PipelineError::unclassified(message)
    }
}

fn raw_message(error: &GenAiError) -> String {
    match error {
        GenAiError::Api { message, .. } if !message.is_empty() => message.clone(),
        other => other.to_string(),
    }
}
