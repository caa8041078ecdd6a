//! Pull Request 코멘트 스레드 엔티티.

/// 원격 코멘트 스레드. `file_path`가 없으면 파일과 무관한 일반 토론 스레드다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub id: u64,
    pub file_path: Option<String>,
}

impl CommentThread {
    pub fn is_file_scoped(&self) -> bool {
        self.file_path.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadComment {
    pub id: u64,
    pub author: String,
}
