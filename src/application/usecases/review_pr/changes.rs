//! 대상 브랜치 대비 변경 파일 목록 계산 단계.

use anyhow::{Context, Result};

use crate::application::ports::VersionControl;
use crate::domain::policy::filter_changed_files;

/// 추가/수정된 텍스트 파일 경로를 diff 순서대로 반환한다.
pub(crate) async fn changed_files(
    vcs: &dyn VersionControl,
    target_branch: &str,
) -> Result<Vec<String>> {
    let result = async {
        // 출력 파싱을 결정적으로 유지한다.
        vcs.add_config("core.pager", "cat").await?;
        vcs.add_config("core.quotepath", "false").await?;
        vcs.fetch().await?;
        vcs.diff(&[target_branch, "--name-only", "--diff-filter=AM"])
            .await
    }
    .await;

    let name_only = match result {
        Ok(output) => output,
        Err(err) => {
            tracing::error!(target_branch, "failed to compute changed files: {err:#}");
            return Err(err).context("failed to compute changed files");
        }
    };

    let files = filter_changed_files(&name_only);
    tracing::info!(
        count = files.len(),
        "changed files (excluding binary files):\n{}",
        files.join("\n")
    );
    Ok(files)
}
