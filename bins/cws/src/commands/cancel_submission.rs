//! `cws cancel-submission`

use crate::commands::api_error;
use crate::context::Context;
use cws_cli::output::{print_json, Status};
use cws_core::Result;

pub async fn run(ctx: &Context) -> Result<()> {
    let item = ctx.item_name()?;
    let client = ctx.client()?;

    let response = client
        .publishers()
        .items()
        .cancel_submission(&item)
        .send()
        .await
        .map_err(api_error)?;

    if ctx.json() {
        return print_json(&response);
    }

    Status::success(&format!("Cancelled the pending submission of {}", item.item_id()));
    if let Some(ref code) = response.status_code {
        Status::field("Status", code);
    }
    for detail in &response.status_detail {
        Status::info(detail);
    }
    Ok(())
}
