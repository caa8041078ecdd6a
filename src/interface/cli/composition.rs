//! 애플리케이션 조립(composition root) 모듈.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::input::{InputResolver, InputSource, MapInputSource};
use crate::application::ports::CiHost;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::review_pr::ReviewPrUseCase;
use crate::infrastructure::adapters::{AzureServiceFactory, PipelineLogReporter};
use crate::infrastructure::pipeline::{
    AzurePipelinesHost, DerivedEnvInputSource, EnvSnapshot, TaskInputSource,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    inputs: InputResolver,
    host: AzurePipelinesHost,
    services: AzureServiceFactory,
    reporter: PipelineLogReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(EnvSnapshot::from_process(), HashMap::new())
    }
}

impl AppComposition {
    /// 입력 우선순위: 명시 입력(--input) → 태스크 입력 → 환경변수.
    pub fn new(env: EnvSnapshot, overrides: HashMap<String, String>) -> Self {
        let env = Arc::new(env);
        let layers: Vec<Box<dyn InputSource>> = vec![
            Box::new(MapInputSource::new("override", overrides)),
            Box::new(TaskInputSource::new(env.clone())),
            Box::new(DerivedEnvInputSource::new(env.clone())),
        ];
        Self {
            inputs: InputResolver::new(layers),
            host: AzurePipelinesHost::new(env),
            services: AzureServiceFactory,
            reporter: PipelineLogReporter::new(),
        }
    }

    pub fn host(&self) -> &dyn CiHost {
        &self.host
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            inputs: &self.inputs,
            host: &self.host,
        }
    }

    /// 리뷰 실행 유스케이스를 생성한다.
    pub fn review_usecase(&self) -> ReviewPrUseCase<'_> {
        ReviewPrUseCase {
            inputs: &self.inputs,
            host: &self.host,
            services: &self.services,
            reporter: &self.reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::{RunOptions, TaskResult};

    #[test]
    fn overrides_win_over_task_inputs() {
        let composition = AppComposition::new(
            EnvSnapshot::from_pairs([("INPUT_MODEL", "gpt-3.5-turbo"), ("INPUT_API_KEY", "k")]),
            HashMap::from([("model".to_string(), "gpt-4o".to_string())]),
        );
        let inspection = composition.inspect_config_usecase().inspect();
        assert_eq!(inspection.model.as_deref(), Some("gpt-4o"));
    }

    #[tokio::test]
    async fn non_pull_request_build_is_skipped() {
        let composition = AppComposition::new(
            EnvSnapshot::from_pairs([("BUILD_REASON", "Manual")]),
            HashMap::new(),
        );
        let outcome = composition
            .review_usecase()
            .execute(RunOptions::default())
            .await;
        assert_eq!(outcome.result, TaskResult::Skipped);
    }
}
