//! 파이프라인 로그 리포터 포트 구현 어댑터.

use crate::application::ports::Reporter;

/// Azure Pipelines 로그 뷰어 서식(`##[section]`)을 쓰는 리포터.
#[derive(Debug, Default)]
pub struct PipelineLogReporter;

impl PipelineLogReporter {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn section_line(name: &str) -> String {
    format!("##[section]{name}")
}

pub(crate) fn kv_line(key: &str, value: &str) -> String {
    format!("{:<12}: {}", key, value)
}

pub(crate) fn status_line(scope: &str, message: &str) -> String {
    format!("[{:<12}] {}", scope, message)
}

impl Reporter for PipelineLogReporter {
    fn section(&self, name: &str) {
        println!("{}", section_line(name));
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{}", kv_line(key, value));
    }

    fn status(&self, scope: &str, message: &str) {
        println!("{}", status_line(scope, message));
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_aligned() {
        assert_eq!(section_line("Review"), "##[section]Review");
        assert_eq!(kv_line("Model", "gpt-4o"), "Model       : gpt-4o");
        assert_eq!(status_line("Cleanup", "done"), "[Cleanup     ] done");
    }
}
