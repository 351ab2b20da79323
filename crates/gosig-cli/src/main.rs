mod config;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gosig_engine::Aggregator;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gosig", about = "Extract Go function signatures from source roots")]
struct Cli {
    /// Workspace list; each entry's `src` directory is walked
    #[arg(long, env = "GOPATH")]
    gopath: Option<String>,

    /// Go installation; its `src` directory is walked after the workspaces
    #[arg(long, env = "GOROOT")]
    goroot: Option<PathBuf>,

    /// Do not ask `go env GOROOT` when --goroot and GOROOT are unset
    #[arg(long)]
    no_go_env: bool,

    /// TOML file with `search_paths` and `runtime_root` (overrides --gopath/--goroot)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every signature, not just the per-root count
    #[arg(long)]
    list: bool,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "list")]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gosig=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let roots = config::resolve(
        cli.config.as_deref(),
        cli.gopath.as_deref(),
        cli.goroot,
        !cli.no_go_env,
    )?;
    let aggregator = Aggregator::new(roots);
    tracing::debug!(roots = ?aggregator.config().roots(), "resolved source roots");

    let reports = aggregator.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report::to_json(&reports))?);
    } else {
        report::print_text(&reports, cli.list);
    }
    Ok(())
}
