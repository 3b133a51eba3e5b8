use std::io::Write;

use clap::Parser;
use listchallenges_exporter::cli::{log_filter, Cli};
use listchallenges_exporter::{ExportService, ExporterError};
use tower::Service;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // ログは stderr、結果の JSON は stdout
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.debug))
        .with_writer(std::io::stderr)
        .init();
    debug!("Debug mode enabled");

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ExporterError> {
    let request = cli.into_request()?;
    let mut service = ExportService::new();

    // 中断時は future ごと drop され、Browser の drop で子プロセスが kill される
    let challenge = tokio::select! {
        result = service.call(request) => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping browser");
            return Err(ExporterError::Interrupted);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, &challenge)?;
    writeln!(out)?;
    Ok(())
}
