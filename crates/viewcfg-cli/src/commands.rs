use anyhow::Result;
use viewcfg_sdk::{LogConfig, init_logging};

use super::args::{Cli, Commands};
use super::context::CliContext;
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    // Logs go to stderr; a second init in the same process is not an error
    let _ = init_logging(LogConfig::from_env().with_default_level(cli.log_level.to_string()));

    let ctx = CliContext::from_cli(&cli)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Defaults { type_name } => handlers::defaults::handle(&ctx, &type_name),
            Commands::Show { type_name, mode } => {
                handlers::show::handle(&ctx, &type_name, mode.map(Into::into)).await
            }
            Commands::Export { type_name, output } => {
                handlers::export::handle(&ctx, &type_name, &output).await
            }
            Commands::Import { file } => handlers::import::handle(&ctx, &file).await,
            Commands::Validate { file } => handlers::validate::handle(&ctx, &file).await,
            Commands::Format {
                type_name,
                property,
                value,
            } => handlers::format::handle(&ctx, &type_name, &property, &value).await,
        }
    })
}
