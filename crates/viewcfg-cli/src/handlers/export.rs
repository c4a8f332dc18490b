use anyhow::{Context, Result};
use std::path::Path;

use crate::context::CliContext;

pub async fn handle(ctx: &CliContext, type_name: &str, output: &Path) -> Result<()> {
    let ty = ctx.resolve_type(type_name)?;
    let config = ctx.client.get_or_create_config(&ty).await;
    ctx.client
        .export_config(&config, output)
        .await
        .with_context(|| format!("Failed to export {}", ty.identity))?;

    println!("Exported {} to {}", ty.identity, output.display());
    Ok(())
}
