//! Azure Pipelines 호스트 연동.
//! 파이프라인 변수/태스크 입력은 환경변수로, 결과 보고와 마스킹은 logging command로 처리한다.

mod commands;
mod env;

pub use commands::{complete_command, escape_data, set_secret_command};
pub use env::{DerivedEnvInputSource, EnvSnapshot, TaskInputSource};

use std::sync::Arc;

use crate::application::input::env_var_name;
use crate::application::ports::CiHost;
use crate::domain::review::TaskOutcome;

/// 프로세스 환경 스냅샷 기반 CI 호스트.
pub struct AzurePipelinesHost {
    env: Arc<EnvSnapshot>,
}

impl AzurePipelinesHost {
    pub fn new(env: Arc<EnvSnapshot>) -> Self {
        Self { env }
    }
}

impl CiHost for AzurePipelinesHost {
    fn variable(&self, name: &str) -> Option<String> {
        // 에이전트는 `Build.Reason`을 `BUILD_REASON`으로 노출한다.
        self.env.get(&env_var_name(name))
    }

    fn set_secret(&self, value: &str) {
        if let Some(line) = set_secret_command(value) {
            println!("{line}");
        }
    }

    fn set_result(&self, outcome: &TaskOutcome) {
        println!("{}", complete_command(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_read_through_agent_env_names() {
        let host = AzurePipelinesHost::new(Arc::new(EnvSnapshot::from_pairs([
            ("BUILD_REASON", "PullRequest"),
            ("SYSTEM_PULLREQUEST_TARGETBRANCH", "refs/heads/main"),
        ])));

        assert_eq!(host.variable("Build.Reason").as_deref(), Some("PullRequest"));
        assert_eq!(
            host.variable("System.PullRequest.TargetBranch").as_deref(),
            Some("refs/heads/main")
        );
        assert_eq!(host.variable("System.AccessToken"), None);
    }
}
