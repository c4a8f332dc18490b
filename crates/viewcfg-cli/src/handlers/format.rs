use anyhow::{Context, Result};

use crate::context::CliContext;
use crate::types::OutputFormat;

pub async fn handle(ctx: &CliContext, type_name: &str, property: &str, input: &str) -> Result<()> {
    let ty = ctx.resolve_type(type_name)?;
    let shared = ctx.client.get_or_create_config(&ty).await;
    let type_config = shared
        .read()
        .property(property)
        .map(|p| p.type_config.clone())
        .with_context(|| format!("{} has no property '{}'", ty.identity, property))?;

    let value = ctx.client.parse(input, &type_config)?;
    let text = ctx.client.format(&value, &type_config);

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "property": property,
                "display_type": type_config.display_type.as_str(),
                "text": text,
            })
        ),
        OutputFormat::Plain => println!("{}", text),
    }
    Ok(())
}
