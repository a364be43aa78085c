//! Post-completion check that the video can actually be downloaded.

use tracing::{debug, warn};

use adgen_genai::GenerativeBackend;

use crate::error::{PipelineError, RunResult};

const FORBIDDEN: u16 = 403;

/// HEAD the final locator.
///
/// Only a 403 fails the run. Any other unexpected outcome is logged and the
/// run proceeds.
pub async fn verify_access(backend: &dyn GenerativeBackend, locator: &str) -> RunResult<()> {
    match backend.check_access(locator).await {
        Ok(FORBIDDEN) => Err(PipelineError::permission_denied()),
        Ok(status) if (200..400).contains(&status) => {
            debug!(status, "Video locator is reachable");
            Ok(())
        }
        Ok(status) => {
            warn!(status, "Could not verify video accessibility, proceeding anyway");
            Ok(())
        }
        Err(e) => {
            warn!("Could not verify video accessibility, proceeding anyway: {}", e);
            Ok(())
        }
    }
}
