mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "toolgen")]
#[command(about = "Convert GraphQL APIs into LLM function catalogs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schema (SDL) file into a function catalog
    Schema {
        /// Path to the SDL file
        path: PathBuf,

        #[command(flatten)]
        convert: commands::ConvertArgs,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Convert a file of pre-written operations into a function catalog
    Operations {
        /// Path to the operations document
        path: PathBuf,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Introspect a remote endpoint and convert its schema
    Introspect {
        /// GraphQL endpoint URL
        url: String,

        /// HTTP headers to send (can be specified multiple times)
        /// Format: "Header-Name: Header-Value"
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Print the fetched schema as SDL instead of converting it
        #[arg(long)]
        sdl: bool,

        #[command(flatten)]
        convert: commands::ConvertArgs,

        #[command(flatten)]
        output: commands::OutputArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Schema {
            path,
            convert,
            output,
        } => commands::schema::run(path, convert, output),
        Commands::Operations { path, output } => commands::operations::run(path, output),
        Commands::Introspect {
            url,
            headers,
            timeout,
            sdl,
            convert,
            output,
        } => commands::introspect::run(url, headers, timeout, sdl, convert, output).await,
    }
}

/// Initialize tracing/logging based on the RUST_LOG env var.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}
