use protocol::AnalysisResult;
use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

const POSTER_RED_FLAGS: usize = 3;
const ALERT_PREVIEW_LINES: usize = 6;

/// Plain-text rendition of the shareable warning poster.
pub(crate) struct Poster<'a> {
    result: &'a AnalysisResult,
    generated_at: SystemTime,
}

impl<'a> Poster<'a> {
    pub(crate) fn new(result: &'a AnalysisResult, generated_at: SystemTime) -> Self {
        Self {
            result,
            generated_at,
        }
    }

    pub(crate) fn file_name(&self) -> String {
        format!("ScamGuard_Warning_{}.txt", unix_ms(self.generated_at))
    }

    pub(crate) fn render(&self) -> String {
        let result = self.result;
        let mut red_flags = String::new();
        for (index, flag) in result.red_flags.iter().take(POSTER_RED_FLAGS).enumerate() {
            let _ = writeln!(red_flags, "{}. {}", index + 1, flag);
        }
        format!(
            "高危诈骗预警\n\
             ScamGuard AI 智能反诈系统\n\
             \n\
             【风险分析报告】\n\
             {score}/100  {label}\n\
             \n\
             【AI 理智分析】\n\
             \"{motive}\"\n\
             \n\
             【即将发生的后果】\n\
             {outcome}\n\
             \n\
             【关键疑点】\n\
             {red_flags}\n\
             【专家建议】\n\
             立即停止转账！\n\
             \n\
             ScamGuard AI 智能生成\n\
             请立即截图保存并转发给当事人",
            score = result.risk_score,
            label = result.risk_level.label(),
            motive = result.scammer_motive,
            outcome = result.expected_outcome,
        )
    }
}

/// The first lines of the alert message, as shown on the result card.
pub(crate) fn alert_preview(result: &AnalysisResult) -> Option<String> {
    let alert = result.scam_alert_message.as_deref()?;
    let head: Vec<&str> = alert.split('\n').take(ALERT_PREVIEW_LINES).collect();
    Some(format!("{}...", head.join("\n")))
}

fn unix_ms(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
