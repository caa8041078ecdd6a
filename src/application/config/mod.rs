//! 애플리케이션이 사용하는 실행 설정 스키마(순수 데이터).
//!
//! 주의: 환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 500;
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// 태스크 입력 이름.
pub mod inputs {
    pub const API_KEY: &str = "api_key";
    pub const AI_ENDPOINT: &str = "aoi_endpoint";
    pub const USE_MANAGED_CREDENTIAL: &str = "use_managed_credential";
    pub const MODEL: &str = "model";
    pub const WORKING_DIR: &str = "working_dir";
    pub const SUPPORT_SELF_SIGNED_CERTIFICATE: &str = "support_self_signed_certificate";
}

/// 파이프라인 변수 이름.
pub mod variables {
    pub const BUILD_REASON: &str = "Build.Reason";
    pub const DEFAULT_WORKING_DIRECTORY: &str = "System.DefaultWorkingDirectory";
    pub const TARGET_BRANCH: &str = "System.PullRequest.TargetBranch";
    pub const TARGET_BRANCH_NAME: &str = "System.PullRequest.TargetBranchName";
    pub const COLLECTION_URI: &str = "System.TeamFoundationCollectionUri";
    pub const PROJECT_ID: &str = "System.TeamProjectId";
    pub const PROJECT: &str = "System.TeamProject";
    pub const REPOSITORY_NAME: &str = "Build.Repository.Name";
    pub const PULL_REQUEST_ID: &str = "System.PullRequest.PullRequestId";
    pub const ACCESS_TOKEN: &str = "System.AccessToken";
}

/// 리뷰 요청을 보낼 경로. 실행 중에는 하나만 사용한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewerMode {
    /// `api-key` 헤더로 단일 JSON 응답을 받는 엔드포인트
    DirectEndpoint { endpoint: String },
    /// 공개 OpenAI API 스트리밍
    OpenAiStreaming,
    /// 관리형 자격증명(bearer)으로 호출하는 스트리밍 엔드포인트
    ManagedStreaming { endpoint: String },
}

impl ReviewerMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectEndpoint { .. } => "direct-endpoint",
            Self::OpenAiStreaming => "openai-streaming",
            Self::ManagedStreaming { .. } => "managed-streaming",
        }
    }
}

/// 실행 시작 시 한 번 확정되는 설정.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub reviewer_mode: ReviewerMode,
    pub model: String,
    pub working_dir: PathBuf,
    pub support_self_signed_certificate: bool,
}

/// 코멘트 API 호출에 필요한 Pull Request 식별 정보.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub collection_uri: String,
    pub project: String,
    pub project_id: String,
    pub repository: String,
    pub pull_request_id: String,
    pub access_token: Option<String>,
}
