//! CLI 명령 파싱 모듈.

use std::collections::HashMap;

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "prsentry")]
#[command(about = "LLM review of Azure DevOps pull requests, run as a pipeline task")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print review results to the log, do not delete or post comments
    #[arg(long)]
    dry_run: bool,

    /// Override a task input (repeatable), e.g. --input model=gpt-4o
    #[arg(long = "input", value_name = "NAME=VALUE", value_parser = parse_input_override)]
    inputs: Vec<(String, String)>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show resolved inputs, reviewer mode and pull request context
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    Run(RunOptions),
}

/// 파싱 결과: 실행할 동작 + 명시 입력 계층.
#[derive(Debug)]
pub struct CliInvocation {
    pub action: CliAction,
    pub overrides: HashMap<String, String>,
}

fn parse_input_override(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(format!("expected NAME=VALUE, got `{raw}`"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("input name is empty in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

impl Cli {
    pub fn parse_invocation() -> Result<CliInvocation, String> {
        let cli = Cli::parse();
        if cli.command.is_some() && cli.dry_run {
            return Err("--dry-run has no effect with `config`".to_string());
        }
        Ok(cli.into_invocation())
    }

    fn into_invocation(self) -> CliInvocation {
        let action = match self.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            None => CliAction::Run(RunOptions {
                dry_run: self.dry_run,
            }),
        };
        CliInvocation {
            action,
            overrides: self.inputs.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> CliInvocation {
        Cli::try_parse_from(args).expect("parse").into_invocation()
    }

    #[test]
    fn default_is_a_posting_run() {
        let inv = invocation(&["prsentry"]);
        assert!(matches!(inv.action, CliAction::Run(RunOptions { dry_run: false })));
        assert!(inv.overrides.is_empty());
    }

    #[test]
    fn dry_run_and_overrides() {
        let inv = invocation(&[
            "prsentry",
            "--dry-run",
            "--input",
            "model=gpt-4o",
            "--input",
            "aoi_endpoint=https://x.example/chat?a=b",
        ]);
        assert!(matches!(inv.action, CliAction::Run(RunOptions { dry_run: true })));
        assert_eq!(inv.overrides.get("model").map(String::as_str), Some("gpt-4o"));
        assert_eq!(
            inv.overrides.get("aoi_endpoint").map(String::as_str),
            Some("https://x.example/chat?a=b")
        );
    }

    #[test]
    fn config_subcommand() {
        assert!(matches!(
            invocation(&["prsentry", "config"]).action,
            CliAction::InspectConfig
        ));
    }

    #[test]
    fn malformed_override_is_rejected() {
        assert!(Cli::try_parse_from(["prsentry", "--input", "model"]).is_err());
        assert!(parse_input_override("=x").is_err());
    }
}
