use crate::{AnalysisResult, RiskGauge};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64, either bare or as a `data:<mime>;base64,` URL.
    pub data: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: String,
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
    pub result: AnalysisResult,
    pub gauge: RiskGauge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_preview: Option<String>,
    pub analyzed_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputSummary {
    pub text_chars: usize,
    pub images: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Idle,
    #[serde(rename_all = "camelCase")]
    Analyzing {
        request_id: String,
        started_at: String,
    },
    Result {
        report: AnalysisReport,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        request_id: String,
        message: String,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub revision: u64,
    pub updated_at: String,
    #[serde(flatten)]
    pub phase: PhaseSnapshot,
    #[serde(default)]
    pub last_input: Option<InputSummary>,
    #[serde(default)]
    pub notice: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellEvent {
    Snapshot { snapshot: ShellSnapshot },
    StateChanged { snapshot: ShellSnapshot },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresetInfo {
    pub name: String,
    pub label: String,
    pub text: String,
}

/// Stable error body returned by the console routes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl ErrorPayload {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: None,
        }
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }
}
