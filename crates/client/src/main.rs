//! SRMA pipeline inspector
//!
//! Small CLI over the client library: lists reviews from the configured
//! SRMA Engine and prints each review's derived pipeline position.

use srma_client::Store;
use srma_common::models::ReviewFilter;
use srma_common::phase::{derive_phase, PHASES};
use srma_common::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::load()?;
    info!(
        base_url = %config.api.base_url,
        "starting srma client v{}",
        srma_common::VERSION
    );

    let store = Store::open(&config)?;
    let page = store
        .list_reviews(&ReviewFilter {
            limit: Some(50),
            ..Default::default()
        })
        .await?;

    println!("{} review(s), showing {}", page.total, page.reviews.len());
    for review in &page.reviews {
        let plan = derive_phase(review.status);
        println!("\n{}  [{:?}]", review.title, review.status);
        for (def, status) in PHASES.iter().zip(plan.statuses.iter()) {
            let marker = if def.number == plan.active_phase {
                ">"
            } else {
                " "
            };
            println!("  {} {:>2}. {:<28} {:?}", marker, def.number, def.name, status);
        }
    }

    Ok(())
}
