use std::env;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use synapse::aggregator;
use synapse::clients::SearchQuery;
use synapse::config::{self, Config};
use synapse::logger::setup_logger;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config: Arc<Config> = Arc::new(config::read_config());

    let location = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("Calgary"));
    info!("searching listings for {location}");

    let query = SearchQuery {
        location,
        per_page: config.records_per_page,
        ..SearchQuery::default()
    };

    let page = aggregator::collect_all(&config, &query).await?;
    info!("{} region-eligible listings after scoring", page.meta.total);

    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
