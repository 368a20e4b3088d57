mod demos;
mod diagnostics;
mod repl;

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;
use streamchat_core::{ChatError, ConnectionConfig};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server base URL (overrides SERVER_URL)
    #[arg(short, long)]
    server_url: Option<String>,

    /// Project dtag used as the URL path segment (overrides PROJECT_DTAG)
    #[arg(short, long)]
    project: Option<String>,

    /// Model name sent with each request; the server ignores it
    #[arg(short, long)]
    model: Option<String>,

    /// Chat interactively instead of running the canned examples
    #[arg(short, long)]
    interactive: bool,

    /// Idle timeout in seconds while connecting and reading the stream
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

fn init_logging() {
    // Logs go to stderr so they never interleave with the rendered reply.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args, base: ConnectionConfig) -> ConnectionConfig {
    let mut config = base.with_timeout(Duration::from_secs(args.timeout));
    if let Some(url) = &args.server_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(project) = &args.project {
        config = config.with_project(project.as_str());
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    config
}

async fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), ChatError> {
    let config = build_config(args, ConnectionConfig::from_env());
    info!(?config, interactive = args.interactive, "starting");

    diagnostics::print_header(out, &config)?;
    if config.uses_placeholder_project() {
        diagnostics::print_placeholder_warning(out)?;
    }

    let mut session = streamchat_openai::connect(&config)?;
    if args.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        repl::run_interactive(&mut session, stdin, out).await
    } else {
        demos::run_examples(&session, out).await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let mut stdout = io::stdout();
    match run(&args, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            if let Err(write_err) = diagnostics::print_failure(&mut stdout, &e) {
                error!(error = %write_err, "could not print failure report");
            }
            ExitCode::FAILURE
        }
    }
}
