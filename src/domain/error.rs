//! 실행 중단 사유를 구분하는 도메인 오류.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("{0}")]
    Configuration(String),

    #[error("git {command} failed: {message}")]
    SourceControl { command: String, message: String },
}
