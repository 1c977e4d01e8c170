use std::time::Duration;

/// Failures a classification backend may report.
///
/// The keyword classifier never produces any of these; they exist so callers
/// treat the call as fallible and a real inference backend can slot in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("classification timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("classification backend failed: {0}")]
    Backend(String),
    #[error("classification quota exhausted")]
    Quota,
    #[error("malformed classification response: {0}")]
    MalformedResponse(String),
}

impl ClassificationError {
    pub fn code(&self) -> &'static str {
        match self {
            ClassificationError::Timeout(_) => "classification_timeout",
            ClassificationError::Backend(_) => "classification_backend",
            ClassificationError::Quota => "classification_quota",
            ClassificationError::MalformedResponse(_) => "classification_malformed",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClassificationError::Timeout(_) | ClassificationError::Backend(_)
        )
    }
}
