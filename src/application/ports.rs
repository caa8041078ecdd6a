//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{PullRequestContext, RunConfig};
use crate::domain::comment::{CommentThread, ThreadComment};
use crate::domain::review::TaskOutcome;

/// 작업 디렉터리에 묶인 git 클라이언트 포트.
#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn add_config(&self, key: &str, value: &str) -> Result<()>;
    async fn fetch(&self) -> Result<()>;
    async fn diff(&self, args: &[&str]) -> Result<String>;
}

/// Pull Request 코멘트 스레드 저장소 포트.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list_threads(&self) -> Result<Vec<CommentThread>>;
    async fn list_comments(&self, thread_id: u64) -> Result<Vec<ThreadComment>>;
    async fn delete_comment(&self, thread_id: u64, comment_id: u64) -> Result<()>;
    /// 파일 경로에 묶인 새 스레드를 코멘트 하나와 함께 만든다.
    async fn create_thread(&self, file_path: &str, content: &str) -> Result<()>;
}

/// 지시문 + diff를 받아 리뷰 텍스트를 돌려주는 모델 호출 포트.
#[async_trait]
pub trait Reviewer: Send + Sync {
    fn name(&self) -> &'static str;
    async fn review(&self, instructions: &str, diff: &str) -> Result<String>;
}

/// 한 번의 실행 동안 HTTP 연결 설정을 공유하는 원격 서비스 묶음.
/// dry-run에는 PR 정보가 없으므로 코멘트 저장소도 없다.
pub struct RemoteServices {
    pub reviewer: Box<dyn Reviewer>,
    pub comment_store: Option<Box<dyn CommentStore>>,
}

/// 설정에 맞는 git/리뷰어/코멘트 저장소 구현체를 생성하는 팩토리 포트.
pub trait ServiceFactory: Send + Sync {
    fn version_control(&self, working_dir: &Path) -> Box<dyn VersionControl>;
    fn remote_services(
        &self,
        config: &RunConfig,
        pull_request: Option<&PullRequestContext>,
    ) -> Result<RemoteServices>;
}

/// CI 호스트(파이프라인 변수, 비밀값 마스킹, 결과 보고) 포트.
pub trait CiHost: Send + Sync {
    fn variable(&self, name: &str) -> Option<String>;
    fn set_secret(&self, value: &str);
    fn set_result(&self, outcome: &TaskOutcome);
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
