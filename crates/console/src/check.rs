use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use protocol::control::{AnalyzeRequest, ImagePayload};
use scam_classifier::KeywordClassifier;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::cli::OutputFormat;
use crate::config::ConsoleConfig;
use crate::poster::Poster;
use crate::service::AnalysisService;

/// One-shot analysis for the `check` subcommand. Goes through the same intake
/// and state machine as the HTTP surface, without the simulated delay.
pub(crate) async fn run_check(
    config: &ConsoleConfig,
    text: String,
    images: &[PathBuf],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut payloads = Vec::with_capacity(images.len());
    for path in images {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?;
        payloads.push(ImagePayload {
            mime_type: mime_for_path(path).to_string(),
            data: STANDARD.encode(bytes),
        });
    }

    let service = AnalysisService::new(Arc::new(KeywordClassifier::instant()), config);
    let report = service
        .analyze_request(AnalyzeRequest {
            text,
            images: payloads,
        })
        .await
        .context("analysis failed")?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Poster => Poster::new(&report.result, SystemTime::now()).render(),
    };
    Ok(rendered)
}

fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
