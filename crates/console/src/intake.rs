use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use protocol::control::{AnalyzeRequest, ImagePayload};
use protocol::{AnalysisInput, ImageBlob};

use crate::config::IntakeConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum IntakeError {
    #[error("第 {index} 张图片不是有效的 base64 数据")]
    InvalidBase64 { index: usize },
    #[error("第 {index} 张图片超过大小上限（{limit} 字节）")]
    TooLarge { index: usize, limit: usize },
}

/// Turns a wire request into an [`AnalysisInput`].
///
/// Non-image attachments are skipped and anything past the image cap is
/// dropped, keeping the earliest attachments.
pub(crate) fn build_input(
    request: AnalyzeRequest,
    limits: &IntakeConfig,
) -> Result<AnalysisInput, IntakeError> {
    let images = collect_images(&request.images, limits)?;
    Ok(AnalysisInput {
        text: request.text,
        images,
    })
}

pub(crate) fn collect_images(
    payloads: &[ImagePayload],
    limits: &IntakeConfig,
) -> Result<Vec<ImageBlob>, IntakeError> {
    let mut images = Vec::new();
    for (position, payload) in payloads.iter().enumerate() {
        let index = position + 1;
        if !is_image_mime(&payload.mime_type) {
            tracing::debug!(
                index,
                mime_type = %payload.mime_type,
                "skipping non-image attachment"
            );
            continue;
        }
        if images.len() == limits.max_images {
            tracing::debug!(
                dropped = payloads.len() - position,
                max_images = limits.max_images,
                "image cap reached"
            );
            break;
        }
        let data = STANDARD
            .decode(strip_data_url(&payload.data))
            .map_err(|_| IntakeError::InvalidBase64 { index })?;
        if data.len() > limits.max_image_bytes {
            return Err(IntakeError::TooLarge {
                index,
                limit: limits.max_image_bytes,
            });
        }
        images.push(ImageBlob::new(payload.mime_type.trim(), data));
    }
    Ok(images)
}

pub(crate) fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

fn strip_data_url(data: &str) -> &str {
    let trimmed = data.trim();
    match trimmed.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, encoded)| encoded)
            .unwrap_or(rest),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime_type: &str, data: &str) -> ImagePayload {
        ImagePayload {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn decodes_plain_and_data_url_payloads() {
        let images = collect_images(
            &[
                image("image/png", "AAEC"),
                image("image/jpeg", "data:image/jpeg;base64,AwQF"),
            ],
            &IntakeConfig::default(),
        )
        .expect("images");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].data.as_ref(), &[0u8, 1, 2]);
        assert_eq!(images[1].data.as_ref(), &[3u8, 4, 5]);
        assert_eq!(images[1].mime_type, "image/jpeg");
    }

    #[test]
    fn skips_non_image_attachments() {
        let images = collect_images(
            &[image("text/plain", "AAEC"), image("IMAGE/PNG", "AAEC")],
            &IntakeConfig::default(),
        )
        .expect("images");
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn keeps_only_the_first_three_images() {
        let payloads: Vec<ImagePayload> = ["AA==", "AQ==", "Ag==", "Aw==", "not base64"]
            .iter()
            .map(|data| image("image/png", data))
            .collect();
        let images = collect_images(&payloads, &IntakeConfig::default()).expect("images");
        assert_eq!(images.len(), 3);
        assert_eq!(images[2].data.as_ref(), &[2u8]);
    }

    #[test]
    fn respects_a_lower_configured_cap() {
        let limits = IntakeConfig {
            max_images: 1,
            ..IntakeConfig::default()
        };
        let payloads = [image("image/png", "AA=="), image("image/png", "AQ==")];
        let images = collect_images(&payloads, &limits).expect("images");
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = collect_images(&[image("image/png", "@@@")], &IntakeConfig::default())
            .err()
            .expect("expected error");
        assert_eq!(err, IntakeError::InvalidBase64 { index: 1 });
    }

    #[test]
    fn rejects_oversize_images() {
        let limits = IntakeConfig {
            max_image_bytes: 2,
            ..IntakeConfig::default()
        };
        let err = collect_images(&[image("image/png", "AAEC")], &limits)
            .err()
            .expect("expected error");
        assert_eq!(err, IntakeError::TooLarge { index: 1, limit: 2 });
    }

    #[test]
    fn build_input_keeps_text_verbatim() {
        let input = build_input(
            AnalyzeRequest {
                text: "  ".to_string(),
                images: Vec::new(),
            },
            &IntakeConfig::default(),
        )
        .expect("input");
        assert_eq!(input.text, "  ");
        assert!(!input.is_empty());
    }
}
