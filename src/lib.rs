//! prsentry library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
