use std::time::Duration;

use async_trait::async_trait;
use protocol::AnalysisInput;

use crate::catalog;
use crate::rules::match_scenario;
use crate::{Classification, ClassificationError, Classifier};

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    latency: Duration,
}

impl KeywordClassifier {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// No artificial delay; used by tests and the one-shot check command.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// The decision itself, without the simulated processing delay.
    pub fn classify_text(&self, text: &str) -> Classification {
        let matched = match_scenario(text);
        Classification {
            label: matched.scenario.slug().to_string(),
            matched_keyword: matched.keyword.map(str::to_string),
            result: catalog::payload(matched.scenario),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(
        &self,
        input: &AnalysisInput,
    ) -> Result<Classification, ClassificationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        // Images are accepted but not inspected.
        let classification = self.classify_text(&input.text);
        tracing::debug!(
            scenario = %classification.label,
            keyword = ?classification.matched_keyword,
            text_chars = input.text.chars().count(),
            images = input.images.len(),
            "keyword classification finished"
        );
        Ok(classification)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
