//! `cws publish`

use crate::commands::api_error;
use crate::context::Context;
use cws_api_client::PublishType;
use cws_cli::output::{or_dash, print_json, Status};
use cws_core::Result;
use tracing::info;

/// Options collected from the command line
#[derive(Debug, Default)]
pub struct Options {
    pub publish_type: Option<PublishType>,
    pub deploy_percentage: Option<u8>,
    pub skip_review: bool,
}

/// Submit the current draft for publication
pub async fn run(ctx: &Context, options: Options) -> Result<()> {
    let item = ctx.item_name()?;
    let client = ctx.client()?;

    let mut call = client.publishers().items().publish(&item);
    if let Some(publish_type) = options.publish_type {
        call = call.publish_type(publish_type);
    }
    if let Some(percentage) = options.deploy_percentage {
        call = call.deploy_percentage(percentage);
    }
    if options.skip_review {
        call = call.skip_review(true);
    }

    info!(item = %item, ?options, "Publishing item");
    let response = call.send().await.map_err(api_error)?;

    if ctx.json() {
        return print_json(&response);
    }

    Status::success(&format!("Submitted {}", or_dash(&response.item_id)));
    Status::field("Name", or_dash(&response.name));
    Status::field("State", response.state);
    Ok(())
}
