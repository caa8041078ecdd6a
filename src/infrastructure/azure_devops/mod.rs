//! Azure DevOps Pull Request 스레드 API 연동 구현.

mod models;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, Response};

use crate::application::config::PullRequestContext;
use crate::application::ports::CommentStore;
use crate::domain::comment::{CommentThread, ThreadComment};

use models::{CommentResponse, ListResponse, ThreadResponse, new_file_thread};

const API_VERSION: &str = "5.1";

/// 경로 세그먼트에서 그대로 둘 수 있는 unreserved 문자만 남긴다.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub struct AzureDevOpsClient {
    client: Client,
    base: String,
    token: Option<String>,
}

impl AzureDevOpsClient {
    /// 실행 동안 공유하는 HTTP 클라이언트와 PR 식별 정보로 생성한다.
    pub fn new(client: Client, pull_request: &PullRequestContext) -> Self {
        Self {
            client,
            base: pull_request_base(pull_request),
            token: pull_request.access_token.clone(),
        }
    }

    fn threads_endpoint(&self) -> String {
        format!("{}/threads?api-version={API_VERSION}", self.base)
    }

    fn comments_endpoint(&self, thread_id: u64) -> String {
        format!(
            "{}/threads/{thread_id}/comments?api-version={API_VERSION}",
            self.base
        )
    }

    fn comment_endpoint(&self, thread_id: u64, comment_id: u64) -> String {
        format!(
            "{}/threads/{thread_id}/comments/{comment_id}?api-version={API_VERSION}",
            self.base
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }
}

/// `{collection}{projectId}/_apis/git/repositories/{repo}/pullRequests/{id}`
fn pull_request_base(pull_request: &PullRequestContext) -> String {
    let collection = if pull_request.collection_uri.ends_with('/') {
        pull_request.collection_uri.clone()
    } else {
        format!("{}/", pull_request.collection_uri)
    };
    format!(
        "{collection}{}/_apis/git/repositories/{}/pullRequests/{}",
        pull_request.project_id,
        utf8_percent_encode(&pull_request.repository, PATH_SEGMENT),
        pull_request.pull_request_id
    )
}

async fn read_body(response: Response, action: &str) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("azure-devops: failed to read {action} response body"))?;
    if !status.is_success() {
        bail!("azure-devops: {action} failed ({status}): {body}");
    }
    Ok(body)
}

#[async_trait]
impl CommentStore for AzureDevOpsClient {
    async fn list_threads(&self) -> Result<Vec<CommentThread>> {
        let resp = self
            .request(Method::GET, self.threads_endpoint())
            .send()
            .await
            .context("azure-devops: failed to list threads")?;
        let body = read_body(resp, "list threads").await?;

        let threads: ListResponse<ThreadResponse> =
            serde_json::from_str(&body).context("azure-devops: invalid threads JSON")?;
        Ok(threads.value.into_iter().map(Into::into).collect())
    }

    async fn list_comments(&self, thread_id: u64) -> Result<Vec<ThreadComment>> {
        let resp = self
            .request(Method::GET, self.comments_endpoint(thread_id))
            .send()
            .await
            .with_context(|| format!("azure-devops: failed to list comments of thread {thread_id}"))?;
        let body = read_body(resp, "list comments").await?;

        let comments: ListResponse<CommentResponse> =
            serde_json::from_str(&body).context("azure-devops: invalid comments JSON")?;
        Ok(comments.value.into_iter().map(Into::into).collect())
    }

    async fn delete_comment(&self, thread_id: u64, comment_id: u64) -> Result<()> {
        let resp = self
            .request(Method::DELETE, self.comment_endpoint(thread_id, comment_id))
            .send()
            .await
            .with_context(|| {
                format!("azure-devops: failed to delete comment {comment_id} in thread {thread_id}")
            })?;
        read_body(resp, "delete comment").await?;
        Ok(())
    }

    async fn create_thread(&self, file_path: &str, content: &str) -> Result<()> {
        let resp = self
            .request(Method::POST, self.threads_endpoint())
            .json(&new_file_thread(file_path, content))
            .send()
            .await
            .context("azure-devops: failed to create thread")?;
        read_body(resp, "create thread").await?;
        Ok(())
    }
}
