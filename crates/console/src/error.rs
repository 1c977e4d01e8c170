use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use protocol::control::ErrorPayload;
use scam_classifier::ClassificationError;

use crate::intake::IntakeError;
use crate::state::Rejection;

/// Failures surfaced by the console to HTTP clients and the `check` command.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ShellError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("正在分析中，请等待当前分析完成")]
    Busy,
    #[error("{message}")]
    Classification {
        message: String,
        source: ClassificationError,
    },
    #[error("暂无分析结果")]
    NoResult,
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("request superseded before completion")]
    Stale,
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShellError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            ShellError::Validation(_) | ShellError::Intake(_) => "validation",
            ShellError::Busy => "busy",
            ShellError::Classification { source, .. } => source.code(),
            ShellError::NoResult => "no_result",
            ShellError::UnknownPreset(_) => "unknown_preset",
            ShellError::Stale => "stale",
            ShellError::Body { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "payload_too_large"
            }
            ShellError::Body { .. } => "invalid_body",
            ShellError::Internal(_) => "internal",
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ShellError::Validation(_) | ShellError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ShellError::Busy | ShellError::Stale => StatusCode::CONFLICT,
            ShellError::Classification { .. } => StatusCode::BAD_GATEWAY,
            ShellError::NoResult | ShellError::UnknownPreset(_) => StatusCode::NOT_FOUND,
            ShellError::Body { status, .. } => *status,
            ShellError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn payload(&self) -> ErrorPayload {
        let payload = ErrorPayload::new(self.code(), self.to_string());
        match self {
            ShellError::Classification { source, .. } => payload.retryable(source.is_retryable()),
            ShellError::Busy => payload.retryable(true),
            _ => payload,
        }
    }
}

impl From<Rejection> for ShellError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Validation(message) => ShellError::Validation(message),
            Rejection::Busy => ShellError::Busy,
            Rejection::Stale => ShellError::Stale,
        }
    }
}

impl From<JsonRejection> for ShellError {
    fn from(rejection: JsonRejection) -> Self {
        ShellError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ShellError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}
