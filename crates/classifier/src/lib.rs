//! Scam-risk classification.
//!
//! [`Classifier`] is the narrow seam the console talks to. The shipped
//! implementation, [`KeywordClassifier`], picks one of four canned payloads by
//! ordered keyword containment; a real inference backend can replace it
//! without touching the caller.

use async_trait::async_trait;
use protocol::{AnalysisInput, AnalysisResult};

pub mod catalog;
mod error;
mod keyword;
pub mod rules;

pub use error::ClassificationError;
pub use keyword::KeywordClassifier;
pub use rules::{match_scenario, RuleMatch, Scenario};

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Stable label of what fired, e.g. `pig_butchering`.
    pub label: String,
    pub matched_keyword: Option<String>,
    pub result: AnalysisResult,
}

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        input: &AnalysisInput,
    ) -> Result<Classification, ClassificationError>;

    fn name(&self) -> &str;
}
