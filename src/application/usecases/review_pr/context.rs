//! 실행 설정(입력/파이프라인 변수) 확정 단계.

use std::path::PathBuf;

use url::Url;

use crate::application::config::{
    DEFAULT_MODEL, PullRequestContext, ReviewerMode, RunConfig, inputs, variables,
};
use crate::application::input::InputResolver;
use crate::application::ports::CiHost;
use crate::domain::error::TaskError;
use crate::domain::policy::target_branch_ref;

/// 태스크 입력을 읽어 실행 설정을 확정한다. 실패는 모두 설정 오류다.
pub(crate) fn resolve_run_config(
    resolver: &InputResolver,
    host: &dyn CiHost,
) -> Result<RunConfig, TaskError> {
    let api_key = resolver
        .get(inputs::API_KEY, true)
        .map_err(|_| TaskError::Configuration("No Api Key provided!".to_string()))?;

    let endpoint = resolver
        .get_optional(inputs::AI_ENDPOINT)
        .map(|raw| validate_endpoint(&raw))
        .transpose()?;

    let reviewer_mode = select_reviewer_mode(
        resolver.get_bool(inputs::USE_MANAGED_CREDENTIAL),
        endpoint,
    )?;

    let model = resolver
        .get_optional(inputs::MODEL)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let working_dir = resolver
        .get_optional(inputs::WORKING_DIR)
        .or_else(|| non_empty(host.variable(variables::DEFAULT_WORKING_DIRECTORY)))
        .unwrap_or_else(|| ".".to_string());

    Ok(RunConfig {
        api_key,
        reviewer_mode,
        model,
        working_dir: PathBuf::from(working_dir),
        support_self_signed_certificate: resolver
            .get_bool(inputs::SUPPORT_SELF_SIGNED_CERTIFICATE),
    })
}

/// 관리형 자격증명 모드는 엔드포인트가 필수이고, 그 외에는 엔드포인트 유무로 경로를 고른다.
pub(crate) fn select_reviewer_mode(
    use_managed_credential: bool,
    endpoint: Option<String>,
) -> Result<ReviewerMode, TaskError> {
    match (use_managed_credential, endpoint) {
        (true, Some(endpoint)) => Ok(ReviewerMode::ManagedStreaming { endpoint }),
        (true, None) => Err(TaskError::Configuration(
            "No AI endpoint provided for managed credential mode!".to_string(),
        )),
        (false, Some(endpoint)) => Ok(ReviewerMode::DirectEndpoint { endpoint }),
        (false, None) => Ok(ReviewerMode::OpenAiStreaming),
    }
}

fn validate_endpoint(raw: &str) -> Result<String, TaskError> {
    let url = Url::parse(raw)
        .map_err(|err| TaskError::Configuration(format!("invalid {}: {err}", inputs::AI_ENDPOINT)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TaskError::Configuration(format!(
            "invalid {}: unsupported scheme '{}'",
            inputs::AI_ENDPOINT,
            url.scheme()
        )));
    }
    Ok(raw.to_string())
}

/// 대상 브랜치를 `origin/<branch>` 형태로 해석한다.
pub(crate) fn resolve_target_branch(host: &dyn CiHost) -> Option<String> {
    let raw = non_empty(host.variable(variables::TARGET_BRANCH))
        .or_else(|| non_empty(host.variable(variables::TARGET_BRANCH_NAME)));
    target_branch_ref(raw.as_deref())
}

/// 코멘트 API 호출에 필요한 파이프라인 변수를 모은다.
pub(crate) fn resolve_pull_request_context(
    host: &dyn CiHost,
) -> Result<PullRequestContext, TaskError> {
    let require = |name: &str| {
        non_empty(host.variable(name)).ok_or_else(|| {
            TaskError::Configuration(format!("missing pipeline variable: {name}"))
        })
    };

    Ok(PullRequestContext {
        collection_uri: require(variables::COLLECTION_URI)?,
        project: require(variables::PROJECT)?,
        project_id: require(variables::PROJECT_ID)?,
        repository: require(variables::REPOSITORY_NAME)?,
        pull_request_id: require(variables::PULL_REQUEST_ID)?,
        access_token: non_empty(host.variable(variables::ACCESS_TOKEN)),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
