use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{format_pairs, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::filter::{ListParams, ListingConfig, Pagination, Status};
use crate::types::Collection;

#[derive(Subcommand)]
pub enum FilterCommands {
    #[command(about = "Show the where clause and query string for a listing request")]
    Preview {
        #[arg(help = "Collection slug")]
        collection: String,
        #[arg(long, short, help = "Free-text search")]
        query: Option<String>,
        #[arg(long, help = "Category id")]
        category: Option<String>,
        #[arg(long, help = "Status to exclude (OPEN, IN_PROGRESS, CLOSED)")]
        status: Option<String>,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },
}

pub async fn handle(cmd: FilterCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FilterCommands::Preview { collection, query, category, status, page, limit } => {
            let collection: Collection = collection.parse().map_err(anyhow::Error::msg)?;
            let listing = ListingConfig::for_collection(collection)
                .ok_or_else(|| anyhow::anyhow!("{} has no listing", collection))?;

            let status = status
                .map(|s| s.parse::<Status>())
                .transpose()
                .map_err(anyhow::Error::msg)?;

            let filter = listing.build_filter(&ListParams { query, category, status });
            let pagination = Pagination::from_params(page.as_deref(), limit.as_deref(), &config::config().filter);

            let mut pairs = filter.to_query_pairs();
            pairs.push(("page".to_string(), pagination.page.to_string()));
            pairs.push(("limit".to_string(), pagination.limit.to_string()));

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    &format!("Listing query for {}", collection),
                    Some(json!({
                        "where": filter.to_where(),
                        "page": pagination.page,
                        "limit": pagination.limit,
                    })),
                ),
                OutputFormat::Text => {
                    println!("{}", format_pairs(&pairs));
                    Ok(())
                }
            }
        }
    }
}
