//! Idempotent stream setup

use super::StreamTransport;
use crate::error::StreamError;

/// Make sure stream `name` exists, creating it bound to `subject_pattern` if needed.
///
/// An existing stream is left untouched. Lookup failures other than "not
/// found" are returned as-is.
pub async fn ensure_stream(
    transport: &dyn StreamTransport,
    name: &str,
    subject_pattern: &str,
) -> Result<(), StreamError> {
    match transport.lookup_stream(name).await {
        Ok(()) => {
            log::debug!("stream {} already exists", name);
            Ok(())
        }
        Err(StreamError::NotFound(_)) => {
            log::info!("creating stream {} for {}", name, subject_pattern);
            transport.create_stream(name, &[subject_pattern]).await
        }
        Err(e) => Err(e),
    }
}
