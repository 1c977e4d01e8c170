use protocol::control::{PhaseSnapshot, ShellSnapshot};
use std::time::SystemTime;

use super::{AppState, Phase};

impl AppState {
    pub(crate) fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            revision: self.revision,
            updated_at: format_time(self.updated_at),
            phase: self.phase.snapshot(),
            last_input: self.last_input.clone(),
            notice: self.notice.clone(),
        }
    }
}

impl Phase {
    fn snapshot(&self) -> PhaseSnapshot {
        match self {
            Phase::Idle => PhaseSnapshot::Idle,
            Phase::Analyzing {
                request_id,
                started_at,
            } => PhaseSnapshot::Analyzing {
                request_id: request_id.clone(),
                started_at: format_time(*started_at),
            },
            Phase::Result { report } => PhaseSnapshot::Result {
                report: report.as_ref().clone(),
            },
            Phase::Failed {
                request_id,
                message,
            } => PhaseSnapshot::Failed {
                request_id: request_id.clone(),
                message: message.clone(),
            },
        }
    }
}

pub(crate) fn format_time(time: SystemTime) -> String {
    humantime::format_rfc3339_seconds(time).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Transition;
    use protocol::AnalysisInput;
    use std::time::Duration;

    #[test]
    fn idle_snapshot_starts_at_revision_zero() {
        let snapshot = AppState::new(SystemTime::UNIX_EPOCH).snapshot();
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.updated_at, "1970-01-01T00:00:00Z");
        assert_eq!(snapshot.phase, PhaseSnapshot::Idle);
        assert_eq!(snapshot.notice, None);
    }

    #[test]
    fn analyzing_snapshot_carries_request_id() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
        let step = AppState::new(SystemTime::UNIX_EPOCH).reduce(
            Transition::SubmitRequested {
                request_id: "req-9".to_string(),
                input: AnalysisInput::text("点赞"),
            },
            now,
        );
        let snapshot = step.state.snapshot();
        assert_eq!(
            snapshot.phase,
            PhaseSnapshot::Analyzing {
                request_id: "req-9".to_string(),
                started_at: "1970-01-01T00:01:00Z".to_string(),
            }
        );
        assert_eq!(snapshot.last_input.map(|input| input.text_chars), Some(2));
    }
}
