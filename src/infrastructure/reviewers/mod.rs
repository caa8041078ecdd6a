//! LLM 리뷰어 구현체.

mod direct;
mod http;
mod streaming;

pub use direct::DirectEndpointReviewer;
pub use http::build_http_client;
pub use streaming::StreamingChatReviewer;

use reqwest::Client;

use crate::application::config::{ReviewerMode, RunConfig};
use crate::application::ports::Reviewer;

/// 실행 설정의 모드에 맞는 리뷰어를 만든다.
pub fn reviewer_for(client: Client, config: &RunConfig) -> Box<dyn Reviewer> {
    match &config.reviewer_mode {
        ReviewerMode::DirectEndpoint { endpoint } => Box::new(DirectEndpointReviewer::new(
            client,
            endpoint.clone(),
            config.api_key.clone(),
        )),
        ReviewerMode::OpenAiStreaming => Box::new(StreamingChatReviewer::openai(
            client,
            config.api_key.clone(),
            config.model.clone(),
        )),
        ReviewerMode::ManagedStreaming { endpoint } => Box::new(StreamingChatReviewer::managed(
            client,
            endpoint.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )),
    }
}
