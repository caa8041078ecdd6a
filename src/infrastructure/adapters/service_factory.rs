//! git/리뷰어/코멘트 저장소 팩토리 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;

use crate::application::config::{PullRequestContext, RunConfig};
use crate::application::ports::{CommentStore, RemoteServices, ServiceFactory, VersionControl};
use crate::infrastructure::azure_devops::AzureDevOpsClient;
use crate::infrastructure::git::GitCli;
use crate::infrastructure::reviewers::{build_http_client, reviewer_for};

/// 한 실행에서 HTTP 클라이언트 하나를 리뷰어와 코멘트 저장소가 공유한다.
#[derive(Debug, Default)]
pub struct AzureServiceFactory;

impl ServiceFactory for AzureServiceFactory {
    fn version_control(&self, working_dir: &Path) -> Box<dyn VersionControl> {
        Box::new(GitCli::initialize(working_dir))
    }

    fn remote_services(
        &self,
        config: &RunConfig,
        pull_request: Option<&PullRequestContext>,
    ) -> Result<RemoteServices> {
        let client = build_http_client(config.support_self_signed_certificate)?;
        if config.support_self_signed_certificate {
            tracing::warn!("TLS certificate verification is disabled");
        }
        Ok(RemoteServices {
            reviewer: reviewer_for(client.clone(), config),
            comment_store: pull_request.map(|pr| {
                Box::new(AzureDevOpsClient::new(client, pr)) as Box<dyn CommentStore>
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::config::ReviewerMode;

    #[test]
    fn remote_services_follow_reviewer_mode() {
        let config = RunConfig {
            api_key: "k".to_string(),
            reviewer_mode: ReviewerMode::DirectEndpoint {
                endpoint: "https://aoai.example/chat".to_string(),
            },
            model: "gpt-3.5-turbo".to_string(),
            working_dir: PathBuf::from("."),
            support_self_signed_certificate: true,
        };
        let pull_request = PullRequestContext {
            collection_uri: "https://dev.azure.com/org/".to_string(),
            project: "Proj".to_string(),
            project_id: "pid".to_string(),
            repository: "repo".to_string(),
            pull_request_id: "1".to_string(),
            access_token: None,
        };

        let services = AzureServiceFactory
            .remote_services(&config, Some(&pull_request))
            .expect("services");
        assert_eq!(services.reviewer.name(), "direct-endpoint");
        assert!(services.comment_store.is_some());

        let dry_run = AzureServiceFactory
            .remote_services(&config, None)
            .expect("dry-run services");
        assert!(dry_run.comment_store.is_none());
    }
}
