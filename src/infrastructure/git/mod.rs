//! git CLI 실행기.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::VersionControl;
use crate::domain::error::TaskError;

/// 작업 디렉터리에 묶인 `git` 프로세스 클라이언트.
pub struct GitCli {
    base_dir: PathBuf,
    binary: String,
}

impl GitCli {
    pub fn initialize(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            binary: "git".to_string(),
        }
    }

    #[cfg(test)]
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.first().copied().unwrap_or_default().to_string();
        tracing::debug!(dir = %self.base_dir.display(), "git {}", args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&self.base_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| TaskError::SourceControl {
                command: command.clone(),
                message: format!("failed to spawn {} in {}: {err}", self.binary, self.base_dir.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TaskError::SourceControl {
                command,
                message: format!(
                    "({}) {}",
                    output.status,
                    if stderr.is_empty() {
                        "no stderr output"
                    } else {
                        stderr.as_str()
                    }
                ),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn add_config(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--local", key, value]).await.map(|_| ())
    }

    async fn fetch(&self) -> Result<()> {
        self.run(&["fetch"]).await.map(|_| ())
    }

    async fn diff(&self, args: &[&str]) -> Result<String> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("diff");
        full.extend_from_slice(args);
        self.run(&full).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_binds_directory() {
        let git = GitCli::initialize(Path::new("/path/to/dir"));
        assert_eq!(git.base_dir(), Path::new("/path/to/dir"));
    }

    #[tokio::test]
    async fn missing_directory_is_a_source_control_error() {
        let git = GitCli::initialize(Path::new("/definitely/not/a/checkout/prsentry"));
        let err = git.fetch().await.expect_err("must fail");
        let task_err = err.downcast_ref::<TaskError>().expect("typed error");
        assert!(matches!(task_err, TaskError::SourceControl { command, .. } if command == "fetch"));
    }
}
