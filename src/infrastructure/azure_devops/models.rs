//! Azure DevOps Pull Request 스레드 REST 응답/요청 모델.

use serde::{Deserialize, Serialize};

use crate::domain::comment::{CommentThread, ThreadComment};

#[derive(Debug, Deserialize)]
pub(super) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ThreadResponse {
    pub id: u64,
    #[serde(default)]
    pub thread_context: Option<ThreadContextResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ThreadContextResponse {
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentResponse {
    pub id: u64,
    #[serde(default)]
    pub author: Option<IdentityResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdentityResponse {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<ThreadResponse> for CommentThread {
    fn from(thread: ThreadResponse) -> Self {
        // threadContext가 있으면 파일 스레드다. filePath가 비어 있어도 마찬가지.
        Self {
            id: thread.id,
            file_path: thread
                .thread_context
                .map(|ctx| ctx.file_path.unwrap_or_default()),
        }
    }
}

impl From<CommentResponse> for ThreadComment {
    fn from(comment: CommentResponse) -> Self {
        Self {
            id: comment.id,
            author: comment
                .author
                .and_then(|a| a.display_name)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewThreadRequest<'a> {
    pub comments: Vec<NewCommentRequest<'a>>,
    pub status: u8,
    pub thread_context: NewThreadContext<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewCommentRequest<'a> {
    pub parent_comment_id: u64,
    pub content: &'a str,
    pub comment_type: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewThreadContext<'a> {
    pub file_path: &'a str,
}

/// 활성(status=1) 스레드에 텍스트(commentType=1) 최상위 코멘트 하나.
pub(super) fn new_file_thread<'a>(file_path: &'a str, content: &'a str) -> NewThreadRequest<'a> {
    NewThreadRequest {
        comments: vec![NewCommentRequest {
            parent_comment_id: 0,
            content,
            comment_type: 1,
        }],
        status: 1,
        thread_context: NewThreadContext { file_path },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_context_null_and_missing_are_general_threads() {
        let listing: ListResponse<ThreadResponse> = serde_json::from_str(
            r#"{"value":[
                {"id":1,"threadContext":null},
                {"id":2},
                {"id":3,"threadContext":{"filePath":"/src/a.ts"}},
                {"id":4,"threadContext":{}}
            ],"count":4}"#,
        )
        .expect("threads json");

        let threads: Vec<CommentThread> = listing.value.into_iter().map(Into::into).collect();
        assert!(!threads[0].is_file_scoped());
        assert!(!threads[1].is_file_scoped());
        assert_eq!(threads[2].file_path.as_deref(), Some("/src/a.ts"));
        assert!(threads[3].is_file_scoped());
    }

    #[test]
    fn comment_without_author_has_empty_name() {
        let listing: ListResponse<CommentResponse> = serde_json::from_str(
            r#"{"value":[{"id":1},{"id":2,"author":{"displayName":"Build Service"}}]}"#,
        )
        .expect("comments json");
        let comments: Vec<ThreadComment> = listing.value.into_iter().map(Into::into).collect();
        assert_eq!(comments[0].author, "");
        assert_eq!(comments[1].author, "Build Service");
    }

    #[test]
    fn new_thread_body_shape() {
        let body = serde_json::to_value(new_file_thread("src/a.ts", "looks off")).expect("json");
        assert_eq!(
            body,
            serde_json::json!({
                "comments": [{"parentCommentId": 0, "content": "looks off", "commentType": 1}],
                "status": 1,
                "threadContext": {"filePath": "src/a.ts"}
            })
        );
    }
}
