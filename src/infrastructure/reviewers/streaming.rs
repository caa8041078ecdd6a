//! Chat Completions 스트리밍(SSE) 리뷰어.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::{Value, json};

use crate::application::config::{MAX_TOKENS, OPENAI_API_BASE};
use crate::application::ports::Reviewer;

use super::http::send_checked;

pub struct StreamingChatReviewer {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    name: &'static str,
}

impl StreamingChatReviewer {
    /// 공개 OpenAI API.
    pub fn openai(client: Client, api_key: String, model: String) -> Self {
        Self::with_base(client, OPENAI_API_BASE, api_key, model)
    }

    /// `<base>/chat/completions`로 보내는 OpenAI 호환 서버.
    pub fn with_base(client: Client, base: &str, api_key: String, model: String) -> Self {
        Self {
            client,
            url: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key,
            model,
            name: "openai-streaming",
        }
    }

    /// 관리형 자격증명 엔드포인트. URL은 주어진 그대로 쓴다.
    pub fn managed(client: Client, endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client,
            url: endpoint,
            api_key,
            model,
            name: "managed-streaming",
        }
    }

    fn payload(&self, instructions: &str, diff: &str) -> Value {
        json!({
            "model": self.model,
            "stream": true,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "system", "content": instructions },
                { "role": "user", "content": diff }
            ]
        })
    }
}

#[async_trait]
impl Reviewer for StreamingChatReviewer {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn review(&self, instructions: &str, diff: &str) -> Result<String> {
        let request = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(instructions, diff));
        let response = send_checked(self.name, "request chat completion", request).await?;

        let mut stream = response.bytes_stream();
        let mut acc = SseAccumulator::default();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.with_context(|| format!("{}: failed to read event stream", self.name))?;
            if acc.push(&chunk).with_context(|| format!("{}: invalid event stream", self.name))? {
                break;
            }
        }
        acc.finish()
            .with_context(|| format!("{}: invalid event stream", self.name))?;

        tracing::debug!(reviewer = self.name, chars = acc.text().len(), "stream finished");
        Ok(acc.into_text())
    }
}

/// 바이트 청크를 줄 단위로 모아 `data:` 이벤트의 delta 텍스트를 이어 붙인다.
/// JSON이 아닌 이벤트나 이벤트가 하나도 없는 본문은 오류다.
#[derive(Debug, Default)]
pub(crate) struct SseAccumulator {
    pending: Vec<u8>,
    text: String,
    events: usize,
    done: bool,
}

impl SseAccumulator {
    /// 청크를 넣는다. `[DONE]`을 만나면 true.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Result<bool> {
        if self.done {
            return Ok(true);
        }
        self.pending.extend_from_slice(chunk);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.handle_line(&String::from_utf8_lossy(&line))?;
            if self.done {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// 개행 없이 끝난 마지막 줄을 처리하고, 이벤트가 있었는지 확인한다.
    pub(crate) fn finish(&mut self) -> Result<()> {
        if !self.done && !self.pending.is_empty() {
            let line = String::from_utf8_lossy(&std::mem::take(&mut self.pending)).to_string();
            self.handle_line(&line)?;
        }
        if self.events == 0 {
            bail!("response ended without any data event");
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(data) = line.strip_prefix("data:") else {
            return Ok(());
        };
        let data = data.trim();
        if data.is_empty() {
            return Ok(());
        }
        self.events += 1;
        if data == "[DONE]" {
            self.done = true;
            return Ok(());
        }

        let event: Value = serde_json::from_str(data)
            .with_context(|| format!("malformed stream event: {data}"))?;
        let choices = event.get("choices").and_then(Value::as_array);
        for choice in choices.into_iter().flatten() {
            if let Some(content) = choice
                .get("delta")
                .and_then(|d| d.get("content"))
                .and_then(Value::as_str)
            {
                self.text.push_str(content);
            }
        }
        Ok(())
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }
}
