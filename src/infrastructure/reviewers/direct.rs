//! `api-key` 헤더 방식의 단일 응답 엔드포인트 리뷰어.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::application::config::MAX_TOKENS;
use crate::application::ports::Reviewer;
use crate::domain::policy::combined_prompt;

use super::http::send_json;

pub struct DirectEndpointReviewer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DirectEndpointReviewer {
    pub fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl Reviewer for DirectEndpointReviewer {
    fn name(&self) -> &'static str {
        "direct-endpoint"
    }

    async fn review(&self, instructions: &str, diff: &str) -> Result<String> {
        // 지시문과 diff를 한 user 메시지로 보낸다. 모델은 배포에 묶여 있다.
        let payload = json!({
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": combined_prompt(instructions, diff) }
            ]
        });
        let request = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&payload);

        let value = send_json(self.name(), "request chat completion", request).await?;
        Ok(first_message_content(&value))
    }
}

/// `choices[0].message.content`. 없으면 빈 문자열.
fn first_message_content(value: &Value) -> String {
    value
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
