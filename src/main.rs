use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use murmur::tools::{self, Dispatcher, ToolContext};
use murmur::Config;

/// Murmur - tool dispatch core for a local voice assistant
#[derive(Parser)]
#[command(name = "murmur", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered tools and their parameters
    Tools,
    /// Dump the JSON schema export fed to the model
    Schema,
    /// Dispatch a single tool call and print the result
    Call {
        /// Tool name (e.g. "find_files")
        tool: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,murmur=info",
        1 => "info,murmur=debug",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let registry = Arc::new(tools::builtin_registry());

    match cli.command {
        Command::Tools => {
            print!("{}", tools::render_prompt(&registry));
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&tools::schemas_json(&registry))?);
        }
        Command::Call { tool, args } => {
            let args: serde_json::Value = serde_json::from_str(&args)?;
            let ctx = Arc::new(ToolContext::new(&config)?);
            let dispatcher = Dispatcher::new(registry, ctx);
            println!("{}", dispatcher.execute(&tool, &args).await);
        }
    }
    Ok(())
}
