use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fedscan::{content, matcher, sheet, workspace::Workspace};

#[derive(Parser)]
#[command(
    name = "fedscan",
    about = "Maps FedRAMP moderate baseline controls to the ComplianceAsCode rules that reference them",
    version
)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    ///
    /// Logging stays off unless this flag or RUST_LOG is set; the report on
    /// stdout is unaffected either way.
    #[arg(long, env = "FEDSCAN_LOG")]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());
    run().await
}

/// Install the subscriber only when logging was explicitly enabled.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        },
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

/// One linear pass: fetch → parse → clone → match. The workspace owns every
/// downloaded artifact and is removed when `run` returns, on success or on
/// error.
async fn run() -> Result<()> {
    let workspace = Workspace::create()?;

    let sheet_path = sheet::fetch_sheet(workspace.path()).await?;
    let controls = sheet::moderate_controls(&sheet_path)?;
    let content_path = content::clone_content(workspace.path()).await?;
    matcher::print_rules_for_controls(&controls, &content_path)?;

    Ok(())
}
