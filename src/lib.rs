//! # cNFT Minter
//! Mint a collection NFT and a batch of compressed NFTs on Solana through the
//! [Shyft](https://shyft.to) hosted API, relay the transactions, and report the results.
//!
//! ## Basic Usage
//!
//! ```ignore
//!    //load config from the environment (and .env)
//!    let config = MinterConfig::from_env_file(Path::new(".env"))?;
//!
//!    //create shyft client and run the mint sequence
//!    let shyft = ShyftClient::new(&config.api_key, config.network);
//!    let report = run_mint_flow(&shyft, &config, Some(&EnvFile::default())).await?;
//! ```
//!
mod client;
pub use client::*;

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod funding;
pub mod keys;
pub mod mint_flow;
pub mod models;
pub mod priority_fee;

pub use {
    config::{ClusterConfig, MinterConfig, Network},
    keys::EnvFile,
    mint_flow::{run_mint_flow, MintReport},
    // allows users to specify rpc config
    solana_client::nonblocking::rpc_client::RpcClient,
    // allows users to use pubkeys, keypairs, and signer
    solana_sdk::{
        pubkey::Pubkey,
        signer::{keypair::Keypair, Signer},
    },
};
