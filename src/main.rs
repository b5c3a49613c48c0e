//! respsim CLI - Fake HTTP Response Simulator
//!
//! Usage:
//!   respsim [OPTIONS] get URL [--param KEY=VALUE]... [--header KEY=VALUE]...
//!   respsim [OPTIONS] post URL [--body JSON] [--header KEY=VALUE]...
//!
//! Examples:
//!   respsim get /users --param page=2
//!   respsim post /orders --body '{"qty": 3}' --error 503
//!   respsim --config respsim.yaml --latency slow get /health

use clap::{Parser, Subcommand};
use respsim::cli::{load_config, run, Invocation};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "respsim")]
#[command(author, version, about = "Fake HTTP Response Simulator", long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, global = true, env = "RESPSIM_CONFIG")]
    config: Option<String>,

    /// Latency profile (default, instant, fast, slow, mobile)
    #[arg(long, global = true)]
    latency: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a GET request
    Get {
        url: String,

        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Request header (repeatable)
        #[arg(short = 'H', long = "header", value_name = "KEY=VALUE")]
        headers: Vec<String>,

        /// Return a simulated error with this status
        #[arg(long, value_name = "STATUS")]
        error: Option<u16>,
    },
    /// Simulate a POST request
    Post {
        url: String,

        /// Request body as a JSON object
        #[arg(short, long)]
        body: Option<String>,

        /// Request header (repeatable)
        #[arg(short = 'H', long = "header", value_name = "KEY=VALUE")]
        headers: Vec<String>,

        /// Return a simulated error with this status
        #[arg(long, value_name = "STATUS")]
        error: Option<u16>,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("respsim=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(cli.config.as_deref(), cli.latency.as_deref())?;

    let invocation = match cli.command {
        Commands::Get {
            url,
            params,
            headers,
            error,
        } => Invocation::get(url, &params, &headers, error)?,
        Commands::Post {
            url,
            body,
            headers,
            error,
        } => Invocation::post(url, body.as_deref(), &headers, error)?,
    };

    let response = run(&config, invocation)?;
    let rendered = serde_json::to_string_pretty(&response)?;
    println!("{}", rendered);

    Ok(())
}
