//! 이전 실행이 남긴 코멘트 삭제 단계.

use anyhow::{Context, Result};

use crate::application::ports::{CommentStore, Reporter};

/// 파일 스레드에서 `identity`가 작성한 코멘트를 하나씩 삭제하고 삭제 수를 반환한다.
/// 다른 작성자의 코멘트는 같은 스레드에 있어도 남긴다.
pub(crate) async fn purge_own_comments(
    reporter: &dyn Reporter,
    store: &dyn CommentStore,
    identity: &str,
) -> Result<usize> {
    reporter.status("Comments", "deleting comments added by the previous run");

    let threads = store
        .list_threads()
        .await
        .context("failed to list pull request threads")?;

    let mut deleted = 0;
    for thread in threads.iter().filter(|t| t.is_file_scoped()) {
        let comments = store
            .list_comments(thread.id)
            .await
            .with_context(|| format!("failed to list comments of thread {}", thread.id))?;

        for comment in comments.iter().filter(|c| c.author == identity) {
            store
                .delete_comment(thread.id, comment.id)
                .await
                .with_context(|| {
                    format!("failed to delete comment {} of thread {}", comment.id, thread.id)
                })?;
            tracing::debug!(thread = thread.id, comment = comment.id, "comment deleted");
            deleted += 1;
        }
    }

    reporter.status("Comments", &format!("existing comments deleted ({deleted})"));
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::review_pr::tests::{FakeCommentStore, SilentReporter};
    use crate::domain::comment::{CommentThread, ThreadComment};

    const IDENTITY: &str = "Shop Build Service (ExampleOrg)";

    fn comment(id: u64, author: &str) -> ThreadComment {
        ThreadComment {
            id,
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn only_own_comments_are_deleted() {
        let store = FakeCommentStore::default();
        store.add_thread(
            CommentThread {
                id: 7,
                file_path: Some("/src/lib.rs".into()),
            },
            vec![comment(1, "X"), comment(2, IDENTITY)],
        );

        let deleted = purge_own_comments(&SilentReporter, &store, IDENTITY)
            .await
            .expect("purge");

        assert_eq!(deleted, 1);
        assert_eq!(store.deletes(), vec![(7, 2)]);
    }

    #[tokio::test]
    async fn threads_without_context_are_not_touched() {
        let store = FakeCommentStore::default();
        store.add_thread(
            CommentThread {
                id: 1,
                file_path: None,
            },
            vec![comment(5, IDENTITY)],
        );

        purge_own_comments(&SilentReporter, &store, IDENTITY)
            .await
            .expect("purge");

        assert!(store.comment_listings().is_empty());
        assert!(store.deletes().is_empty());
    }

    #[tokio::test]
    async fn second_purge_deletes_nothing() {
        let store = FakeCommentStore::default();
        store.add_thread(
            CommentThread {
                id: 3,
                file_path: Some("/a.rs".into()),
            },
            vec![comment(10, IDENTITY), comment(11, IDENTITY), comment(12, "Y")],
        );

        let first = purge_own_comments(&SilentReporter, &store, IDENTITY)
            .await
            .expect("first purge");
        let second = purge_own_comments(&SilentReporter, &store, IDENTITY)
            .await
            .expect("second purge");

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(store.deletes(), vec![(3, 10), (3, 11)]);
    }
}
