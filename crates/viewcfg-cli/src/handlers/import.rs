use anyhow::Result;
use std::path::Path;

use crate::context::CliContext;

pub async fn handle(ctx: &CliContext, file: &Path) -> Result<()> {
    let config = ctx.client.import_config(file).await?;
    let config = config.read();

    println!(
        "Imported {} ({} properties)",
        config.identity(),
        config.properties.len()
    );
    if !ctx.client.options().auto_save {
        eprintln!("Note: auto-save is off, the document was not written to the folder");
    }
    Ok(())
}
