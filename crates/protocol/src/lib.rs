use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub mod control;

/// 单次分析允许附带的最大图片数量。
pub const MAX_IMAGES: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Dangerous,
    Critical,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Safe => "安全",
            RiskLevel::Suspicious => "可疑",
            RiskLevel::Dangerous => "高风险",
            RiskLevel::Critical => "极度危险",
        }
    }

    /// Gauge colour used by the result card and the poster.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Safe => "#22c55e",
            RiskLevel::Suspicious => "#eab308",
            RiskLevel::Dangerous => "#f97316",
            RiskLevel::Critical => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStrategy {
    #[serde(rename = "type")]
    pub kind: String,
    pub explanation: String,
    pub reply: String,
    pub expected_reaction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_conversation: Option<String>,
    pub scammer_motive: String,
    pub expected_outcome: String,
    pub red_flags: Vec<String>,
    pub psychological_tactics: Vec<String>,
    pub verification_strategies: Vec<VerificationStrategy>,
    pub actionable_advice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scam_alert_message: Option<String>,
}

impl AnalysisResult {
    pub fn gauge(&self) -> RiskGauge {
        let risk = self.risk_score.min(100);
        RiskGauge {
            risk,
            safety: 100 - risk,
            color: self.risk_level.color().to_string(),
        }
    }
}

/// Half-donut chart data: the risk share against the remaining safety share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskGauge {
    pub risk: u8,
    pub safety: u8,
    pub color: String,
}

/// An attached screenshot. The bytes are opaque to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageBlob {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisInput {
    pub text: String,
    pub images: Vec<ImageBlob>,
}

impl AnalysisInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            images: Vec::new(),
        }
    }

    /// Text emptiness is plain string emptiness; whitespace still counts as input.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            risk_score: 85,
            risk_level: RiskLevel::Dangerous,
            summary: "summary".to_string(),
            generated_conversation: None,
            scammer_motive: "motive".to_string(),
            expected_outcome: "outcome".to_string(),
            red_flags: vec!["flag".to_string()],
            psychological_tactics: vec!["tactic".to_string()],
            verification_strategies: vec![VerificationStrategy {
                kind: "背景核实".to_string(),
                explanation: "why".to_string(),
                reply: "reply".to_string(),
                expected_reaction: "reaction".to_string(),
            }],
            actionable_advice: "advice".to_string(),
            scam_alert_message: Some("alert".to_string()),
        }
    }

    #[test]
    fn analysis_result_uses_camel_case_keys() {
        let value = serde_json::to_value(sample_result()).expect("serialize");
        assert_eq!(value["riskScore"], 85);
        assert_eq!(value["riskLevel"], "DANGEROUS");
        assert_eq!(value["verificationStrategies"][0]["type"], "背景核实");
        assert_eq!(
            value["verificationStrategies"][0]["expectedReaction"],
            "reaction"
        );
        assert!(value.get("generatedConversation").is_none());
        assert_eq!(value["scamAlertMessage"], "alert");
    }

    #[test]
    fn missing_optionals_deserialize_as_none() {
        let mut value = serde_json::to_value(sample_result()).expect("serialize");
        value
            .as_object_mut()
            .expect("object")
            .remove("scamAlertMessage");
        let decoded: AnalysisResult = serde_json::from_value(value).expect("deserialize");
        assert_eq!(decoded.scam_alert_message, None);
        assert_eq!(decoded.generated_conversation, None);
    }

    #[test]
    fn gauge_splits_score() {
        let gauge = sample_result().gauge();
        assert_eq!(gauge.risk, 85);
        assert_eq!(gauge.safety, 15);
        assert_eq!(gauge.color, "#f97316");
    }

    #[test]
    fn whitespace_text_is_not_empty_input() {
        assert!(AnalysisInput::default().is_empty());
        assert!(!AnalysisInput::text(" ").is_empty());
        let images_only = AnalysisInput {
            text: String::new(),
            images: vec![ImageBlob::new("image/png", vec![1u8, 2, 3])],
        };
        assert!(!images_only.is_empty());
    }
}
