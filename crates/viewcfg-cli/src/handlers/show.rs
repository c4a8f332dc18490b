use anyhow::Result;
use viewcfg_types::DisplayMode;

use crate::context::CliContext;
use crate::presentation::{render_config, render_mode};
use crate::types::OutputFormat;

pub async fn handle(ctx: &CliContext, type_name: &str, mode: Option<DisplayMode>) -> Result<()> {
    let ty = ctx.resolve_type(type_name)?;
    let shared = ctx.client.get_or_create_config(&ty).await;
    let config = shared.read().clone();

    match (ctx.format, mode) {
        (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&config)?),
        (OutputFormat::Json, Some(mode)) => {
            let visible: Vec<_> = config
                .visible_properties(mode)
                .into_iter()
                .map(|p| {
                    serde_json::json!({
                        "path": p.property_path,
                        "display_name": p.display_name,
                        "order": p.settings_for(mode).order,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&visible)?);
        }
        (OutputFormat::Plain, None) => print!("{}", render_config(&config)),
        (OutputFormat::Plain, Some(mode)) => print!("{}", render_mode(&config, mode)),
    }
    Ok(())
}
