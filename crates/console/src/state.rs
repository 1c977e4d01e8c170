//! Shell state machine.
//!
//! `AppState` is a plain value. Every change goes through [`AppState::reduce`],
//! which returns the next state together with the effect the caller must run.
//! Phases: `Idle -> Analyzing -> {Result, Failed}`, back to `Analyzing` on a new
//! submit, and to `Idle` on reset once no analysis is in flight.

mod snapshot;

pub(crate) use snapshot::format_time;

use protocol::control::{AnalysisReport, InputSummary};
use protocol::AnalysisInput;
use std::sync::Arc;
use std::time::SystemTime;

pub(crate) const EMPTY_INPUT_MESSAGE: &str = "请输入文字或上传图片进行分析";

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Phase {
    Idle,
    Analyzing {
        request_id: String,
        started_at: SystemTime,
    },
    Result {
        report: Arc<AnalysisReport>,
    },
    Failed {
        request_id: String,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppState {
    phase: Phase,
    last_input: Option<InputSummary>,
    notice: Option<String>,
    revision: u64,
    updated_at: SystemTime,
}

#[derive(Debug)]
pub(crate) enum Transition {
    SubmitRequested {
        request_id: String,
        input: AnalysisInput,
    },
    ResultReceived {
        request_id: String,
        report: AnalysisReport,
    },
    ErrorReceived {
        request_id: String,
        message: String,
    },
    Reset,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Effect {
    None,
    /// Run the classifier for this request and report back with
    /// `ResultReceived` or `ErrorReceived` carrying the same id.
    Classify {
        request_id: String,
        input: AnalysisInput,
    },
    Reject(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rejection {
    Validation(String),
    Busy,
    /// A result or error for a request that is no longer in flight.
    Stale,
}

#[derive(Debug)]
pub(crate) struct Step {
    pub(crate) state: AppState,
    pub(crate) effect: Effect,
}

impl AppState {
    pub(crate) fn new(now: SystemTime) -> Self {
        Self {
            phase: Phase::Idle,
            last_input: None,
            notice: None,
            revision: 0,
            updated_at: now,
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> &Phase {
        &self.phase
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    #[cfg(test)]
    pub(crate) fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    pub(crate) fn current_report(&self) -> Option<Arc<AnalysisReport>> {
        match &self.phase {
            Phase::Result { report } => Some(Arc::clone(report)),
            _ => None,
        }
    }

    pub(crate) fn reduce(&self, transition: Transition, now: SystemTime) -> Step {
        match transition {
            Transition::SubmitRequested { request_id, input } => {
                if self.is_analyzing() {
                    return self.unchanged(Effect::Reject(Rejection::Busy));
                }
                if input.is_empty() {
                    let state = self.advance(now, |next| {
                        next.notice = Some(EMPTY_INPUT_MESSAGE.to_string());
                    });
                    return Step {
                        state,
                        effect: Effect::Reject(Rejection::Validation(
                            EMPTY_INPUT_MESSAGE.to_string(),
                        )),
                    };
                }
                let summary = InputSummary {
                    text_chars: input.text.chars().count(),
                    images: input.images.len(),
                };
                let state = self.advance(now, |next| {
                    next.phase = Phase::Analyzing {
                        request_id: request_id.clone(),
                        started_at: now,
                    };
                    next.last_input = Some(summary);
                    next.notice = None;
                });
                Step {
                    state,
                    effect: Effect::Classify { request_id, input },
                }
            }
            Transition::ResultReceived { request_id, report } => {
                if !self.is_in_flight(&request_id) {
                    return self.unchanged(Effect::Reject(Rejection::Stale));
                }
                let state = self.advance(now, |next| {
                    next.phase = Phase::Result {
                        report: Arc::new(report),
                    };
                });
                Step {
                    state,
                    effect: Effect::None,
                }
            }
            Transition::ErrorReceived {
                request_id,
                message,
            } => {
                if !self.is_in_flight(&request_id) {
                    return self.unchanged(Effect::Reject(Rejection::Stale));
                }
                let state = self.advance(now, |next| {
                    next.phase = Phase::Failed {
                        request_id: request_id.clone(),
                        message: message.clone(),
                    };
                });
                Step {
                    state,
                    effect: Effect::None,
                }
            }
            Transition::Reset => {
                // An analysis cannot be cancelled; reset is refused until it resolves.
                if self.is_analyzing() {
                    return self.unchanged(Effect::Reject(Rejection::Busy));
                }
                let state = self.advance(now, |next| {
                    next.phase = Phase::Idle;
                    next.last_input = None;
                    next.notice = None;
                });
                Step {
                    state,
                    effect: Effect::None,
                }
            }
        }
    }

    fn is_in_flight(&self, id: &str) -> bool {
        matches!(&self.phase, Phase::Analyzing { request_id, .. } if request_id == id)
    }

    fn unchanged(&self, effect: Effect) -> Step {
        Step {
            state: self.clone(),
            effect,
        }
    }

    fn advance(&self, now: SystemTime, update: impl FnOnce(&mut AppState)) -> AppState {
        let mut next = self.clone();
        update(&mut next);
        next.revision = self.revision + 1;
        next.updated_at = now;
        next
    }
}
