use anyhow::Result;

use crate::context::CliContext;
use crate::presentation::render_config;
use crate::types::OutputFormat;

pub fn handle(ctx: &CliContext, type_name: &str) -> Result<()> {
    let ty = ctx.resolve_type(type_name)?;
    let config = ctx.client.default_config(&ty);

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Plain => print!("{}", render_config(&config)),
    }
    Ok(())
}
