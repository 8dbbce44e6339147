// Prints the demo service's OpenAPI document.
// Usage: cargo run --bin openapi_export > openapi.json

use anyhow::{Context, Result};
use api_conventions::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to render OpenAPI document")?;
    println!("{}", json);
    Ok(())
}
