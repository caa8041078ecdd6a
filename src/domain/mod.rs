//! Domain layer
//! 리뷰 판정, 코멘트 스레드, 변경 파일 필터링 규칙을 외부 의존성 없이 표현한다.

pub mod binary_extensions;
pub mod comment;
pub mod error;
pub mod policy;
pub mod review;
