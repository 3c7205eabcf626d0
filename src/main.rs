use anyhow::anyhow;
use clap::{Parser, Subcommand};
use cnft_minter::{
    collection::verify_collection_mint,
    config::load_env_file,
    funding::{airdrop_sol_if_needed, transfer_sol_if_needed, FundingOutcome},
    keys::get_or_create_keypair,
    priority_fee::PriorityFeeClient,
    run_mint_flow, ClusterConfig, EnvFile, MinterConfig, RpcClient, ShyftClient, Signer,
};
use solana_sdk::{commitment_config::CommitmentConfig, native_token::lamports_to_sol};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Opts {
    /// Env file that settings are read from and generated secrets are written to.
    #[clap(long, global = true, default_value = ".env")]
    pub env_file: PathBuf,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a collection and merkle tree, then mint a batch of compressed NFTs.
    Mint {
        /// Number of cNFTs to mint, overrides MINT_COUNT.
        #[clap(long)]
        mint_count: Option<usize>,
    },
    /// Create (or load) a wallet keypair and fund it on devnet.
    Fund {
        /// Env variable holding the wallet's secret key.
        #[clap(long)]
        wallet: String,
        /// Env variable holding a second wallet that tops up `wallet` with SOL.
        #[clap(long)]
        from: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // progress goes to stderr, the report to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    match opts.command {
        Some(Command::Fund { wallet, from }) => fund(&opts.env_file, &wallet, from.as_deref()).await,
        Some(Command::Mint { mint_count }) => mint(&opts.env_file, mint_count).await,
        None => mint(&opts.env_file, None).await,
    }
}

async fn mint(env_file: &Path, mint_count: Option<usize>) -> anyhow::Result<()> {
    let mut config = MinterConfig::from_env_file(env_file)?;
    if let Some(mint_count) = mint_count {
        config = config.with_mint_count(mint_count)?;
    }

    if let Some(collection) = config.collection {
        let rpc_client =
            RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
        verify_collection_mint(&rpc_client, &collection).await?;
    }

    let shyft = ShyftClient::new(&config.api_key, config.network);
    let report = run_mint_flow(&shyft, &config, Some(&EnvFile::new(env_file))).await?;

    println!("{}", report);
    for mint in &report.cnft_mints {
        println!("{}", config.network.explorer_account_url(mint));
    }
    Ok(())
}

async fn fund(env_file: &Path, wallet: &str, from: Option<&str>) -> anyhow::Result<()> {
    load_env_file(env_file);
    let lookup = |name: &str| std::env::var(name).ok();
    let cluster = ClusterConfig::from_lookup(lookup)?;
    let env_file = EnvFile::new(env_file);

    let rpc_client =
        RpcClient::new_with_commitment(cluster.rpc_url.clone(), CommitmentConfig::confirmed());
    let fees = cluster.priority_fee_url.as_ref().map(PriorityFeeClient::new);

    let wallet = get_or_create_keypair(wallet, lookup, &env_file).await?;
    report_funding(airdrop_sol_if_needed(&rpc_client, &wallet.pubkey()).await?);

    if let Some(from) = from {
        if from.is_empty() {
            return Err(anyhow!("--from needs an env variable name"));
        }
        let sender = get_or_create_keypair(from, lookup, &env_file).await?;
        report_funding(airdrop_sol_if_needed(&rpc_client, &sender.pubkey()).await?);
        report_funding(
            transfer_sol_if_needed(&rpc_client, &sender, &wallet.pubkey(), fees.as_ref()).await?,
        );
    }
    Ok(())
}

fn report_funding(outcome: FundingOutcome) {
    match outcome {
        FundingOutcome::Skipped { balance } => {
            println!("Balance {} SOL is sufficient", lamports_to_sol(balance))
        }
        FundingOutcome::Funded {
            signature,
            new_balance,
        } => println!(
            "Funded ({}), new balance is {} SOL",
            signature,
            lamports_to_sol(new_balance)
        ),
        FundingOutcome::Failed { reason } => println!("Funding skipped: {}", reason),
    }
}
