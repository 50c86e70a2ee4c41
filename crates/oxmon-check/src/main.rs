use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use oxmon_check::config::{CheckConfig, CliArgs};
use oxmon_check::decide::USAGE_EXIT_CODE;
use oxmon_check::error::CheckError;
use oxmon_check::expr::SexprEvaluator;
use oxmon_check::runner::{report, CheckRunner, Phase};
use oxmon_graphite::GraphiteClient;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = match CliArgs::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => USAGE_EXIT_CODE,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let directive = if cli.verbose { "oxmon=debug" } else { "oxmon=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let code = run(&cli);
    tracing::debug!(phase = %Phase::Reported, exit_code = code, "Check reported");
    std::process::exit(code);
}

#[allow(clippy::print_stdout)]
fn run(cli: &CliArgs) -> i32 {
    let outcome = CheckConfig::resolve(cli).and_then(|config| {
        let fetcher = GraphiteClient::new(Duration::from_secs(config.timeout_secs))
            .map_err(|e| CheckError::Config(e.to_string()))?;
        CheckRunner::new(SexprEvaluator, Arc::new(fetcher)).run(&config)
    });

    let (line, code) = report(outcome);
    println!("{line}");
    code
}
