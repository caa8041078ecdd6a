//! Infrastructure layer
//! 외부 시스템(API/CLI/파이프라인 에이전트)과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod azure_devops;
pub mod git;
pub mod pipeline;
pub mod reviewers;
