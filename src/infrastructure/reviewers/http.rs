//! 리뷰어 HTTP 호출 공용 유틸리티.

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

/// 실행 동안 공유할 HTTP 클라이언트를 만든다.
/// 자체 서명 인증서 허용 시 인증서 검증을 끈다.
pub fn build_http_client(tolerate_self_signed: bool) -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(tolerate_self_signed)
        .build()
        .context("failed to build HTTP client")
}

/// 요청을 보내고 2xx가 아니면 상태/본문을 담은 오류로 바꾼다.
pub async fn send_checked(who: &str, action: &str, request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{who}: failed to {action}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{who}: {action} failed ({status}): {body}");
    }
    Ok(response)
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(who: &str, action: &str, request: RequestBuilder) -> Result<Value> {
    let response = send_checked(who, action, request).await?;
    let body = response
        .text()
        .await
        .with_context(|| format!("{who}: failed to read {action} response body"))?;

    serde_json::from_str(&body).with_context(|| format!("{who}: invalid JSON response while {action}"))
}
