//! Print the status of an item
//!
//! ```sh
//! export CHROME_WEBSTORE_CLIENT_ID=... CHROME_WEBSTORE_CLIENT_SECRET=... CHROME_WEBSTORE_REFRESH_TOKEN=...
//! cargo run -p cws-api-client --example status -- <publisher-id> <item-id>
//! ```

use cws_api_client::{CwsClient, ItemName, Projection};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(publisher_id), Some(item_id)) = (args.next(), args.next()) else {
        eprintln!("usage: status <publisher-id> <item-id>");
        std::process::exit(2);
    };

    let client = CwsClient::from_env()?;
    let item = ItemName::new(publisher_id, item_id);

    let status = client
        .publishers()
        .items()
        .fetch_status(&item)
        .projection(Projection::Published)
        .timeout(Duration::from_secs(10))
        .send()
        .await?;

    println!("{}", status.name);
    if let Some(published) = status.published_item_revision_status {
        println!(
            "published: {} ({})",
            published.state,
            published.current_version().unwrap_or("unknown version")
        );
    }
    if let Some(submitted) = status.submitted_item_revision_status {
        println!("submitted: {}", submitted.state);
    }

    Ok(())
}
