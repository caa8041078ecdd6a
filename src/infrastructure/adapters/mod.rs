//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod reporter;
mod service_factory;

pub use reporter::PipelineLogReporter;
pub use service_factory::AzureServiceFactory;
