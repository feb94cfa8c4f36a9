//! Search command - query a persisted index

use crate::cli::output::{colors, print_output, truncate_chars, PREVIEW_CHARS};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Natural-language query
    pub query: String,

    /// Directory the index was persisted to
    #[arg(long)]
    pub persist_dir: Option<PathBuf>,

    /// Maximum number of results
    #[arg(short = 'k', long = "top-k")]
    pub k: Option<usize>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = services.store(args.persist_dir.as_deref());

    let response = services
        .search
        .search(&store, &args.query, args.k)
        .await
        .map_err(|e| -> Box<dyn std::error::Error> {
            if e.is_not_found() {
                format!(
                    "{e}. Run 'folio build-index --persist-dir {}' first.",
                    store.persist_dir().display()
                )
                .into()
            } else {
                e.into()
            }
        })?;

    print_output(&response, format, print_human)?;

    Ok(())
}

fn print_human(response: &SearchResponse) {
    if response.results.is_empty() {
        println!("No results found for '{}'", colors::label(&response.query));
        return;
    }

    println!(
        "Found {} result(s):\n",
        colors::number(&response.count.to_string())
    );

    for result in &response.results {
        println!(
            "[{}] {} page {} {}",
            colors::rank(&result.rank.to_string()),
            colors::chunk_id(&result.chunk_id),
            result.page,
            colors::score(&format!("(score: {:.3})", result.score))
        );
        println!("    {}", colors::dim(&truncate_chars(&result.text, PREVIEW_CHARS)));
        println!();
    }
}
