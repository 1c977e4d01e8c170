use protocol::control::{AnalysisReport, AnalyzeRequest, ShellEvent, ShellSnapshot};
use protocol::AnalysisInput;
use scam_classifier::{Classification, ClassificationError, Classifier};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{AnalysisConfig, ConsoleConfig, IntakeConfig};
use crate::error::ShellError;
use crate::intake::build_input;
use crate::poster::alert_preview;
use crate::state::{format_time, AppState, Effect, Transition};

pub(crate) const FAILURE_MESSAGE: &str = "分析过程中发生错误，请稍后重试";
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) backoff: Duration,
}

impl RetryPolicy {
    pub(crate) fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
        }
    }

    /// Delay before retry number `attempt + 1`; doubles every attempt.
    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Owns the shell state and drives classifications through it.
#[derive(Clone)]
pub(crate) struct AnalysisService {
    state: Arc<RwLock<AppState>>,
    classifier: Arc<dyn Classifier>,
    policy: RetryPolicy,
    intake: IntakeConfig,
    event_tx: broadcast::Sender<ShellEvent>,
}

impl AnalysisService {
    pub(crate) fn new(classifier: Arc<dyn Classifier>, config: &ConsoleConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(AppState::new(SystemTime::now()))),
            classifier,
            policy: RetryPolicy::from_config(&config.analysis),
            intake: config.intake.clone(),
            event_tx,
        }
    }

    pub(crate) async fn snapshot(&self) -> ShellSnapshot {
        self.state.read().await.snapshot()
    }

    pub(crate) async fn current_report(&self) -> Option<Arc<AnalysisReport>> {
        self.state.read().await.current_report()
    }

    pub(crate) fn intake(&self) -> &IntakeConfig {
        &self.intake
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) async fn analyze_request(
        &self,
        request: AnalyzeRequest,
    ) -> Result<AnalysisReport, ShellError> {
        let input = build_input(request, &self.intake)?;
        self.submit(input).await
    }

    /// Starts a classification and waits for it to resolve.
    ///
    /// The classification runs on its own task, so a caller that goes away
    /// mid-flight does not leave the shell stuck in `Analyzing`.
    pub(crate) async fn submit(&self, input: AnalysisInput) -> Result<AnalysisReport, ShellError> {
        let request_id = Uuid::new_v4().to_string();
        let effect = self
            .apply(Transition::SubmitRequested {
                request_id: request_id.clone(),
                input,
            })
            .await;
        let input = match effect {
            Effect::Classify { input, .. } => input,
            Effect::Reject(rejection) => return Err(rejection.into()),
            Effect::None => {
                return Err(ShellError::Internal(
                    "submit produced no classification".to_string(),
                ))
            }
        };
        info!(
            request_id = %request_id,
            classifier = self.classifier.name(),
            text_chars = input.text.chars().count(),
            images = input.images.len(),
            "analysis started"
        );
        let service = self.clone();
        tokio::spawn(async move { service.run(request_id, input).await })
            .await
            .map_err(|err| ShellError::Internal(err.to_string()))?
    }

    pub(crate) async fn reset(&self) -> Result<ShellSnapshot, ShellError> {
        if let Effect::Reject(rejection) = self.apply(Transition::Reset).await {
            return Err(rejection.into());
        }
        info!("shell reset");
        Ok(self.snapshot().await)
    }

    async fn run(
        &self,
        request_id: String,
        input: AnalysisInput,
    ) -> Result<AnalysisReport, ShellError> {
        let started = Instant::now();
        match classify_with_policy(self.classifier.as_ref(), &input, &self.policy).await {
            Ok(classification) => {
                let report = build_report(&request_id, classification, SystemTime::now());
                let effect = self
                    .apply(Transition::ResultReceived {
                        request_id: request_id.clone(),
                        report: report.clone(),
                    })
                    .await;
                if let Effect::Reject(rejection) = effect {
                    warn!(request_id = %request_id, "analysis result discarded");
                    return Err(rejection.into());
                }
                info!(
                    request_id = %request_id,
                    scenario = %report.scenario,
                    risk_score = report.result.risk_score,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "analysis finished"
                );
                Ok(report)
            }
            Err(err) => {
                let message = failure_message(&err);
                warn!(
                    request_id = %request_id,
                    code = err.code(),
                    error = %err,
                    "analysis failed"
                );
                let effect = self
                    .apply(Transition::ErrorReceived {
                        request_id: request_id.clone(),
                        message: message.clone(),
                    })
                    .await;
                if let Effect::Reject(_) = effect {
                    warn!(request_id = %request_id, "analysis error discarded");
                }
                Err(ShellError::Classification {
                    message,
                    source: err,
                })
            }
        }
    }

    async fn apply(&self, transition: Transition) -> Effect {
        let mut state = self.state.write().await;
        let step = state.reduce(transition, SystemTime::now());
        let changed = step.state.revision() != state.revision();
        *state = step.state;
        if changed {
            let _ = self.event_tx.send(ShellEvent::StateChanged {
                snapshot: state.snapshot(),
            });
        }
        step.effect
    }
}

/// Runs one classification with a per-attempt timeout, retrying transient
/// failures with exponential backoff.
pub(crate) async fn classify_with_policy(
    classifier: &dyn Classifier,
    input: &AnalysisInput,
    policy: &RetryPolicy,
) -> Result<Classification, ClassificationError> {
    let mut attempt = 0;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, classifier.classify(input)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClassificationError::Timeout(policy.timeout)),
        };
        match outcome {
            Ok(classification) => return Ok(classification),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay(attempt);
                attempt += 1;
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "classification failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

pub(crate) fn failure_message(err: &ClassificationError) -> String {
    format!("{FAILURE_MESSAGE} ({err})")
}

pub(crate) fn build_report(
    request_id: &str,
    classification: Classification,
    analyzed_at: SystemTime,
) -> AnalysisReport {
    let Classification {
        label,
        matched_keyword,
        result,
    } = classification;
    AnalysisReport {
        id: request_id.to_string(),
        scenario: label,
        matched_keyword,
        gauge: result.gauge(),
        alert_preview: alert_preview(&result),
        result,
        analyzed_at: format_time(analyzed_at),
    }
}
