//! Pull Request 리뷰 태스크 전체 오케스트레이션 유스케이스.

mod changes;
mod context;
mod purge;
mod review;

use anyhow::{Context, Result};

use crate::application::config::variables;
use crate::application::input::InputResolver;
use crate::application::ports::{CiHost, Reporter, ServiceFactory};
use crate::domain::policy::automation_identity;
use crate::domain::review::{RunOptions, TaskOutcome};

pub(crate) use context::{resolve_pull_request_context, resolve_run_config, resolve_target_branch};

pub(crate) use purge::purge_own_comments;

use changes::changed_files;
use review::{Publisher, review_file};

const PULL_REQUEST_BUILD_REASON: &str = "PullRequest";

/// 트리거 확인부터 변경 파일 리뷰, 코멘트 게시까지 전체 흐름을 조율한다.
pub struct ReviewPrUseCase<'a> {
    pub inputs: &'a InputResolver,
    pub host: &'a dyn CiHost,
    pub services: &'a dyn ServiceFactory,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ReviewPrUseCase<'a> {
    /// 태스크 진입점. 모든 실패는 `Failed` 결과로 변환된다.
    pub async fn execute(&self, options: RunOptions) -> TaskOutcome {
        match self.run(&options).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("task failed: {err:#}");
                TaskOutcome::failed(format!("{err:#}"))
            }
        }
    }

    async fn run(&self, options: &RunOptions) -> Result<TaskOutcome> {
        self.reporter.section("Session");
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "post-comment"
            },
        );

        let build_reason = self.host.variable(variables::BUILD_REASON);
        if build_reason.as_deref() != Some(PULL_REQUEST_BUILD_REASON) {
            return Ok(TaskOutcome::skipped(
                "This task should be run only when the build is triggered from a Pull Request.",
            ));
        }

        self.reporter.section("Inputs");
        let config = match resolve_run_config(self.inputs, self.host) {
            Ok(config) => config,
            Err(err) => return Ok(TaskOutcome::failed(err.to_string())),
        };
        self.host.set_secret(&config.api_key);
        self.reporter.kv("Reviewer", config.reviewer_mode.label());
        self.reporter.kv("Model", &config.model);
        self.reporter
            .kv("Working Dir", &config.working_dir.display().to_string());

        let Some(target_branch) = resolve_target_branch(self.host) else {
            return Ok(TaskOutcome::failed("No target branch found!"));
        };
        self.reporter.kv("Target", &target_branch);

        // 코멘트 API를 쓰지 않는 dry-run에는 PR 변수가 필요 없다.
        let pull_request = if options.dry_run {
            None
        } else {
            let pull_request = resolve_pull_request_context(self.host)?;
            if let Some(token) = &pull_request.access_token {
                self.host.set_secret(token);
            }
            Some(pull_request)
        };
        let remote = self
            .services
            .remote_services(&config, pull_request.as_ref())
            .context("failed to initialize remote services")?;

        let vcs = self.services.version_control(&config.working_dir);

        self.reporter.section("Changed Files");
        let files = changed_files(vcs.as_ref(), &target_branch).await?;
        if files.is_empty() {
            return Ok(TaskOutcome::succeeded("No changed files found!"));
        }
        for file in &files {
            self.reporter.raw(file);
        }

        let publisher = match (&pull_request, remote.comment_store.as_deref()) {
            (Some(pull_request), Some(store)) => {
                self.reporter.section("Cleanup");
                let identity =
                    automation_identity(&pull_request.project, &pull_request.collection_uri);
                self.reporter.kv("Identity", &identity);
                purge_own_comments(self.reporter, store, &identity).await?;
                Publisher::Store(store)
            }
            _ => Publisher::DryRun,
        };

        self.reporter.section("Review");
        // 한 파일이라도 실패하면 전체 실행을 중단한다.
        for file in &files {
            review_file(
                self.reporter,
                vcs.as_ref(),
                remote.reviewer.as_ref(),
                &publisher,
                &target_branch,
                file,
            )
            .await?;
        }

        Ok(TaskOutcome::succeeded("Pull Request reviewed."))
    }
}
