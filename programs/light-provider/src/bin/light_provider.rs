use clap::Parser;
use light_provider::{
    cli::{Commands, ProviderCli},
    config::ProviderConfig,
    observability::init_subscriber,
};
use tendermint_light_client_provider::Provider;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ProviderCli::parse();
    let config = ProviderConfig::load(&cli.config)?;

    init_subscriber(config.log_level())?;

    let provider = config.build_provider()?;
    info!(
        chain_id = provider.chain_id(),
        rpc_url = %config.rpc_url,
        "Provider initialized"
    );

    let output = match cli.command {
        Commands::SignedHeader(args) => {
            serde_json::to_string_pretty(&provider.signed_header(args.height).await?)?
        }
        Commands::ValidatorSet(args) => {
            serde_json::to_string_pretty(&provider.validator_set(args.height).await?)?
        }
    };

    println!("{output}");

    Ok(())
}
