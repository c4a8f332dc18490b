use anyhow::Result;
use std::path::Path;

use crate::context::CliContext;
use crate::types::OutputFormat;

pub async fn handle(ctx: &CliContext, file: &Path) -> Result<()> {
    let config = ctx.client.check_document(file).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "valid": true,
                "type": config.identity().to_string(),
                "properties": config.properties.len(),
            })
        ),
        OutputFormat::Plain => println!(
            "{}: valid ({} properties)",
            config.identity(),
            config.properties.len()
        ),
    }
    Ok(())
}
