//! `cws set-published-deploy-percentage`

use crate::commands::api_error;
use crate::context::Context;
use cws_cli::output::{print_json, Status};
use cws_core::Result;

/// Roll the published version out to `percentage` percent of users
pub async fn run(ctx: &Context, percentage: u8) -> Result<()> {
    let item = ctx.item_name()?;
    let client = ctx.client()?;

    let response = client
        .publishers()
        .items()
        .set_published_deploy_percentage(&item)
        .deploy_percentage(percentage)
        .send()
        .await
        .map_err(api_error)?;

    if ctx.json() {
        return print_json(&response);
    }

    Status::success(&format!(
        "Deploy percentage of {} set to {percentage}%",
        item.item_id()
    ));
    if let Some(ref code) = response.status_code {
        Status::field("Status", code);
    }
    for detail in &response.status_detail {
        Status::info(detail);
    }
    Ok(())
}
