//! 리뷰 도메인 엔티티/값 객체.

/// 모델이 "지적 사항 없음"을 알릴 때 돌려주는 고정 문구.
pub const NO_FEEDBACK_SENTINEL: &str = "No feedback.";

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 코멘트 삭제/게시 없이 리뷰 결과만 출력
    pub dry_run: bool,
}

/// 파일 단위 리뷰 요청.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub target_branch: String,
    pub file_path: String,
    pub diff: String,
}

/// 모델 응답을 게시 여부로 정규화한 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewVerdict {
    NoFeedback,
    Publish(String),
}

impl ReviewVerdict {
    /// 빈 응답이나 sentinel(앞뒤 공백 무시)은 게시하지 않는다.
    pub fn from_response(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == NO_FEEDBACK_SENTINEL {
            Self::NoFeedback
        } else {
            Self::Publish(text.to_string())
        }
    }
}

/// CI 호스트에 보고할 최종 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    Succeeded,
    Skipped,
    Failed,
}

impl TaskResult {
    /// `##vso[task.complete result=...]` 값.
    pub fn code(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Skipped => "Skipped",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub result: TaskResult,
    pub message: String,
}

impl TaskOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            result: TaskResult::Succeeded,
            message: message.into(),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            result: TaskResult::Skipped,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: TaskResult::Failed,
            message: message.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.result == TaskResult::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_published_even_with_surrounding_whitespace() {
        assert_eq!(ReviewVerdict::from_response("No feedback."), ReviewVerdict::NoFeedback);
        assert_eq!(
            ReviewVerdict::from_response("  \nNo feedback.\n  "),
            ReviewVerdict::NoFeedback
        );
    }

    #[test]
    fn empty_response_is_not_published() {
        assert_eq!(ReviewVerdict::from_response(""), ReviewVerdict::NoFeedback);
        assert_eq!(ReviewVerdict::from_response(" \t\n"), ReviewVerdict::NoFeedback);
    }

    #[test]
    fn other_text_is_published_verbatim() {
        let text = "### Major\n- null check missing\n";
        assert_eq!(
            ReviewVerdict::from_response(text),
            ReviewVerdict::Publish(text.to_string())
        );
        // sentinel 변형은 게시 대상이다.
        assert!(matches!(
            ReviewVerdict::from_response("No feedback"),
            ReviewVerdict::Publish(_)
        ));
    }
}
