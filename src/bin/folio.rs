//! Folio CLI - turn a PDF into a searchable vector index
//!
//! # Examples
//!
//! ```bash
//! # Preview how a PDF is chunked
//! folio ingest --path data/manual.pdf
//!
//! # Build and persist the index
//! export OPENAI_API_KEY='sk-...'
//! folio build-index --path data/manual.pdf --persist-dir ./storage
//!
//! # Query it
//! folio search "how do I reset the device" -k 3
//! ```

use clap::Parser;
use folio::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "folio=info" } else { "folio=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries command output, logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    match std::env::var("FOLIO_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.compact().init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
