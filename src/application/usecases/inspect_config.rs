//! 적용될 실행 설정을 확인하는 유스케이스.

use anyhow::Result;
use serde::Serialize;

use crate::application::config::{ReviewerMode, inputs};
use crate::application::input::InputResolver;
use crate::application::ports::CiHost;
use crate::application::usecases::review_pr::{
    resolve_pull_request_context, resolve_run_config, resolve_target_branch,
};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub inputs: Vec<InputInspection>,
    pub reviewer: Option<ReviewerMode>,
    pub model: Option<String>,
    pub working_dir: Option<String>,
    pub support_self_signed_certificate: Option<bool>,
    pub target_branch: Option<String>,
    pub pull_request: Option<PullRequestInspection>,
    pub errors: Vec<String>,
}

/// 입력별 출처. 값 자체는 비밀일 수 있어 노출하지 않는다.
#[derive(Debug, Clone, Serialize)]
pub struct InputInspection {
    pub name: String,
    pub source: Option<String>,
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PullRequestInspection {
    pub collection_uri: String,
    pub project: String,
    pub repository: String,
    pub pull_request_id: String,
    pub access_token_resolved: bool,
}

/// 현재 환경에서 해석된 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub inputs: &'a InputResolver,
    pub host: &'a dyn CiHost,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn inspect(&self) -> ConfigInspection {
        let mut errors = Vec::new();

        let input_rows = [
            inputs::API_KEY,
            inputs::AI_ENDPOINT,
            inputs::USE_MANAGED_CREDENTIAL,
            inputs::MODEL,
            inputs::WORKING_DIR,
            inputs::SUPPORT_SELF_SIGNED_CERTIFICATE,
        ]
        .into_iter()
        .map(|name| {
            let resolved = self.inputs.resolve(name);
            InputInspection {
                name: name.to_string(),
                source: resolved.as_ref().map(|r| r.source.clone()),
                resolved: resolved.is_some(),
            }
        })
        .collect();

        let config = resolve_run_config(self.inputs, self.host)
            .map_err(|err| errors.push(err.to_string()))
            .ok();

        let pull_request = resolve_pull_request_context(self.host)
            .map_err(|err| errors.push(err.to_string()))
            .ok()
            .map(|pr| PullRequestInspection {
                collection_uri: pr.collection_uri,
                project: pr.project,
                repository: pr.repository,
                pull_request_id: pr.pull_request_id,
                access_token_resolved: pr.access_token.is_some(),
            });

        let target_branch = resolve_target_branch(self.host);
        if target_branch.is_none() {
            errors.push("No target branch found!".to_string());
        }

        ConfigInspection {
            inputs: input_rows,
            reviewer: config.as_ref().map(|c| c.reviewer_mode.clone()),
            model: config.as_ref().map(|c| c.model.clone()),
            working_dir: config
                .as_ref()
                .map(|c| c.working_dir.display().to_string()),
            support_self_signed_certificate: config
                .as_ref()
                .map(|c| c.support_self_signed_certificate),
            target_branch,
            pull_request,
            errors,
        }
    }

    pub fn execute(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.inspect())?)
    }
}
