//! `##vso[...]` logging command 포맷.

use crate::domain::review::TaskOutcome;

/// 메시지 본문 이스케이프(`%`, CR, LF).
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn complete_command(outcome: &TaskOutcome) -> String {
    format!(
        "##vso[task.complete result={};]{}",
        outcome.result.code(),
        escape_data(&outcome.message)
    )
}

/// 빈 값은 마스킹할 필요가 없다.
pub fn set_secret_command(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(format!("##vso[task.setsecret]{}", escape_data(value)))
}
