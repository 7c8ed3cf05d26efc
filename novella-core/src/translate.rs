//! Translation seam.
//!
//! Story and UI text is authored in one canonical language and machine
//! translated into the rest of the catalog at startup. The engine only needs
//! this one operation, so the seam is a single-method trait; the real
//! implementation lives in the `lingua` client crate and tests use
//! [`crate::testing::MockTranslator`].

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the translation service.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation service error: {0}")]
    Service(String),
}

/// A synchronous-in-spirit translation collaborator: one text in, one text
/// out. Calls happen once per target language during graph construction,
/// before the run loop starts.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}

#[async_trait]
impl Translate for lingua::Client {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        lingua::Client::translate(self, text, source, target)
            .await
            .map_err(|e| TranslateError::Service(e.to_string()))
    }
}
