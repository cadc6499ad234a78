//! `cws upload`

use crate::commands::api_error;
use crate::context::Context;
use cws_api_client::{UploadResponse, UploadState};
use cws_cli::output::{format_duration, format_size, or_dash, print_json, Status};
use cws_cli::progress::{finish_error, finish_success, interactive_spinner};
use cws_core::{Error, ErrorCode, ResultExt};
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Upload the package at `file`
pub async fn run(ctx: &Context, file: &Path, media_type: &str) -> cws_core::Result<()> {
    let item = ctx.item_name()?;
    let client = ctx.client()?;

    let data = match tokio::fs::read(file).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::file_not_found(file)),
        Err(e) => return Err(e).context(format!("Reading {}", file.display())),
    };
    info!(file = %file.display(), bytes = data.len(), media_type, "Uploading package");

    let spinner = if ctx.json() {
        None
    } else {
        interactive_spinner(&format!(
            "Uploading {} ({})",
            file.display(),
            format_size(data.len() as u64)
        ))
    };

    let started = Instant::now();
    let result = client
        .media()
        .upload(&item)
        .media(data, media_type)
        .send()
        .await;
    let elapsed = started.elapsed();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            if let Some(ref pb) = spinner {
                finish_error(pb, "Upload failed");
            }
            return Err(api_error(e));
        }
    };

    if let Some(ref pb) = spinner {
        if is_rejected(&response) {
            finish_error(pb, "Package rejected");
        } else {
            finish_success(pb, "Upload complete");
        }
    }

    if ctx.json() {
        print_json(&response)?;
    } else {
        print_upload(file, &response, elapsed);
    }

    if is_rejected(&response) {
        return Err(Error::new(
            ErrorCode::ApiError,
            format!("The store rejected the package ({})", rejection_reasons(&response)),
        ));
    }
    Ok(())
}

fn is_rejected(response: &UploadResponse) -> bool {
    response.upload_state == UploadState::Failed
}

fn rejection_reasons(response: &UploadResponse) -> String {
    let reasons: Vec<&str> = response
        .item_error
        .iter()
        .map(|e| e.error_code.as_str())
        .collect();
    or_dash(&reasons.join(", ")).to_string()
}

fn print_upload(file: &Path, response: &UploadResponse, elapsed: Duration) {
    match response.upload_state {
        UploadState::Failed => Status::error("Upload failed"),
        UploadState::InProgress => Status::info("The package is still being processed"),
        _ => Status::success(&format!(
            "Uploaded {} in {}",
            file.display(),
            format_duration(elapsed)
        )),
    }
    Status::field("Name", or_dash(&response.name));
    Status::field("Item ID", or_dash(&response.item_id));
    Status::field("Upload state", &response.upload_state);
    Status::field("Version", or_dash(&response.crx_version));
    for error in &response.item_error {
        Status::error(&format!("{}: {}", error.error_code, error.error_detail));
    }
}
