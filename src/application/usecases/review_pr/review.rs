//! 파일 단위 리뷰 실행 및 게시 판단 단계.

use anyhow::{Context, Result};

use crate::application::ports::{CommentStore, Reporter, Reviewer, VersionControl};
use crate::domain::policy::REVIEW_INSTRUCTIONS;
use crate::domain::review::{ReviewRequest, ReviewVerdict};

/// 게시 대상 저장소. dry-run에서는 없다.
pub(crate) enum Publisher<'a> {
    Store(&'a dyn CommentStore),
    DryRun,
}

/// 한 파일의 diff를 리뷰하고, 지적 사항이 있으면 파일 스레드로 게시한다.
pub(crate) async fn review_file(
    reporter: &dyn Reporter,
    vcs: &dyn VersionControl,
    reviewer: &dyn Reviewer,
    publisher: &Publisher<'_>,
    target_branch: &str,
    file_path: &str,
) -> Result<ReviewVerdict> {
    reporter.status("Review", &format!("start reviewing {file_path} ..."));

    let result = review_file_inner(reporter, vcs, reviewer, publisher, target_branch, file_path).await;
    if let Err(err) = &result {
        // 상태 코드/응답 본문은 오류 체인에 포함되어 있다.
        tracing::error!(file = file_path, reviewer = reviewer.name(), "review failed: {err:#}");
    }
    result.with_context(|| format!("failed to review {file_path}"))
}

async fn review_file_inner(
    reporter: &dyn Reporter,
    vcs: &dyn VersionControl,
    reviewer: &dyn Reviewer,
    publisher: &Publisher<'_>,
    target_branch: &str,
    file_path: &str,
) -> Result<ReviewVerdict> {
    let diff = vcs.diff(&[target_branch, "--", file_path]).await?;
    let request = ReviewRequest {
        target_branch: target_branch.to_string(),
        file_path: file_path.to_string(),
        diff,
    };
    tracing::debug!(
        file = %request.file_path,
        target = %request.target_branch,
        diff_bytes = request.diff.len(),
        "sending diff to {}",
        reviewer.name()
    );

    let response = reviewer.review(REVIEW_INSTRUCTIONS, &request.diff).await?;
    let verdict = ReviewVerdict::from_response(&response);

    match (&verdict, publisher) {
        (ReviewVerdict::NoFeedback, _) => {
            reporter.status("Review", &format!("{file_path}: no feedback"));
        }
        (ReviewVerdict::Publish(text), Publisher::Store(store)) => {
            store
                .create_thread(&request.file_path, text)
                .await
                .context("failed to add review comment")?;
            reporter.status("Review", &format!("{file_path}: new comment added"));
        }
        (ReviewVerdict::Publish(text), Publisher::DryRun) => {
            reporter.raw(&format!("--- {file_path} ---"));
            reporter.raw(text);
        }
    }

    reporter.status("Review", &format!("review of {file_path} completed"));
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::review_pr::tests::{
        FakeCommentStore, FakeReviewer, FakeVcs, SilentReporter,
    };

    #[tokio::test]
    async fn sentinel_response_is_never_published() {
        let vcs = FakeVcs::new("", "@@ -1 +1 @@\n-a\n+b\n");
        let reviewer = FakeReviewer::answering(" No feedback. \n");
        let store = FakeCommentStore::default();

        let verdict = review_file(
            &SilentReporter,
            &vcs,
            &reviewer,
            &Publisher::Store(&store),
            "origin/main",
            "src/a.rs",
        )
        .await
        .expect("review");

        assert_eq!(verdict, ReviewVerdict::NoFeedback);
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn feedback_is_published_once_for_the_file() {
        let vcs = FakeVcs::new("", "@@ -1 +1 @@\n-a\n+b\n");
        let reviewer = FakeReviewer::answering("### Major\n- b is wrong");
        let store = FakeCommentStore::default();

        review_file(
            &SilentReporter,
            &vcs,
            &reviewer,
            &Publisher::Store(&store),
            "origin/main",
            "src/a.rs",
        )
        .await
        .expect("review");

        assert_eq!(
            store.created(),
            vec![("src/a.rs".to_string(), "### Major\n- b is wrong".to_string())]
        );
        assert_eq!(vcs.calls(), vec!["diff origin/main -- src/a.rs"]);
        assert_eq!(reviewer.received_diffs(), vec!["@@ -1 +1 @@\n-a\n+b\n"]);
    }

    #[tokio::test]
    async fn dry_run_does_not_publish() {
        let vcs = FakeVcs::new("", "+x");
        let reviewer = FakeReviewer::answering("### Minor\n- naming");

        let verdict = review_file(
            &SilentReporter,
            &vcs,
            &reviewer,
            &Publisher::DryRun,
            "origin/main",
            "x.rs",
        )
        .await
        .expect("review");

        assert!(matches!(verdict, ReviewVerdict::Publish(_)));
    }

    #[tokio::test]
    async fn reviewer_failure_is_propagated() {
        let vcs = FakeVcs::new("", "+x");
        let reviewer = FakeReviewer::failing("endpoint: request failed (500): boom");
        let store = FakeCommentStore::default();

        let err = review_file(
            &SilentReporter,
            &vcs,
            &reviewer,
            &Publisher::Store(&store),
            "origin/main",
            "x.rs",
        )
        .await
        .expect_err("must fail");

        let msg = format!("{err:#}");
        assert!(msg.contains("failed to review x.rs"));
        assert!(msg.contains("(500): boom"));
        assert!(store.created().is_empty());
    }
}
