//! `prsentry` 바이너리 진입점.

use prsentry::infrastructure::pipeline::EnvSnapshot;
use prsentry::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = match Cli::parse_invocation() {
        Ok(invocation) => invocation,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::new(EnvSnapshot::from_process(), invocation.overrides);

    match invocation.action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Run(options) => {
            let outcome = composition.review_usecase().execute(options).await;
            composition.host().set_result(&outcome);
            if outcome.is_failed() {
                std::process::exit(1);
            }
        }
    }
}
