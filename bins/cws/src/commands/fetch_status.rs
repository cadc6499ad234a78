//! `cws fetch-status`

use crate::commands::api_error;
use crate::context::Context;
use cws_api_client::types::ItemRevisionStatus;
use cws_api_client::{ItemStatus, Projection};
use cws_cli::output::{format_flag, or_dash, print_json, Status};
use cws_core::Result;

/// Fetch and print the status of the item
pub async fn run(ctx: &Context, projection: Option<Projection>) -> Result<()> {
    let item = ctx.item_name()?;
    let client = ctx.client()?;

    let mut call = client.publishers().items().fetch_status(&item);
    if let Some(projection) = projection {
        call = call.projection(projection);
    }
    let status = call.send().await.map_err(api_error)?;

    if ctx.json() {
        return print_json(&status);
    }

    print_status(&status);
    Ok(())
}

fn print_status(status: &ItemStatus) {
    Status::header(&format!("Item {}", or_dash(&status.item_id)));
    Status::field("Name", or_dash(&status.name));
    print_revision("Published", status.published_item_revision_status.as_ref());
    print_revision("Submitted", status.submitted_item_revision_status.as_ref());

    let upload_state = status
        .last_async_upload_state
        .as_ref()
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    Status::field("Last upload", upload_state);
    Status::field("Taken down", format_flag(status.taken_down));
    Status::field("Warned", format_flag(status.warned));

    if status.taken_down {
        Status::warning("The item has been taken down");
    }
}

fn print_revision(label: &str, revision: Option<&ItemRevisionStatus>) {
    let Some(revision) = revision else {
        Status::field(label, "-");
        return;
    };

    Status::field(label, &revision.state);
    for channel in &revision.distribution_channels {
        Status::field(
            &format!("  {}", or_dash(&channel.crx_version)),
            format!("{}% of users", channel.deploy_percentage),
        );
    }
}
