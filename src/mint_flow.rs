//! The mint sequence: collection NFT, merkle tree, then a batch of compressed NFTs.
//!
//! Every step waits for the previous one and feeds its output (metadata URI, collection
//! mint, tree address) into the next request unchanged. The first error ends the run.
//! Nothing already created on chain is rolled back.
use solana_sdk::pubkey::Pubkey;
use std::fmt;

use crate::{
    client::MintingService,
    config::{MinterConfig, Network},
    constants::{
        COLLECTION_NFT_VAR, MERKLE_TREE_CANOPY_DEPTH, MERKLE_TREE_MAX_BUFFER_SIZE,
        MERKLE_TREE_MAX_DEPTH, RELAY_COMMITMENT,
    },
    error::Error,
    keys::EnvFile,
    models::*,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CollectionOutcome {
    pub mint: Pubkey,
    /// `None` when an existing collection was reused.
    pub metadata_uri: Option<String>,
    pub signature: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MerkleTreeOutcome {
    pub address: Pubkey,
    pub signature: String,
}

/// Everything a run created, in the order it was created.
#[derive(Clone, Debug, PartialEq)]
pub struct MintReport {
    pub network: Network,
    pub payer_balance: f64,
    pub collection: CollectionOutcome,
    pub merkle_tree: MerkleTreeOutcome,
    pub cnft_metadata_uri: String,
    pub cnft_mints: Vec<Pubkey>,
    pub mint_signatures: Vec<String>,
}

impl fmt::Display for MintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let network = self.network;

        writeln!(f, "Payer current balance: {} SOL", self.payer_balance)?;
        if let Some(uri) = &self.collection.metadata_uri {
            writeln!(f, "Collection URI: {}", uri)?;
        }
        if let Some(signature) = &self.collection.signature {
            writeln!(
                f,
                "Collection's signature: {}",
                network.explorer_tx_url(signature)
            )?;
        }
        writeln!(f, "Collection mint address: {}", self.collection.mint)?;
        writeln!(
            f,
            "Merkle Tree's signature: {}",
            network.explorer_tx_url(&self.merkle_tree.signature)
        )?;
        writeln!(f, "Merkle tree address: {}", self.merkle_tree.address)?;
        writeln!(f, "cNFT's metadata URL: {}", self.cnft_metadata_uri)?;
        for (i, mint) in self.cnft_mints.iter().enumerate() {
            writeln!(f, "cNFT Mint address {}: {}", i + 1, mint)?;
        }
        for signature in &self.mint_signatures {
            writeln!(f, "cNFT's signature: {}", network.explorer_tx_url(signature))?;
        }
        Ok(())
    }
}

/// Runs the whole sequence against `service`.
///
/// When `config.collection` is set that collection is reused; otherwise a new one is
/// created and, if `env_file` is given, its mint is appended there as `COLLECTION_NFT`
/// so the next run picks it up.
pub async fn run_mint_flow<S>(
    service: &S,
    config: &MinterConfig,
    env_file: Option<&EnvFile>,
) -> MinterResult<MintReport>
where
    S: MintingService + ?Sized,
{
    let payer_balance = service.get_balance(&config.payer).await?;
    tracing::debug!(
        payer = %config.payer,
        balance = payer_balance,
        "fetched payer balance"
    );

    let collection = match config.collection {
        Some(mint) => {
            tracing::info!(%mint, "using existing collection");
            CollectionOutcome {
                mint,
                metadata_uri: None,
                signature: None,
            }
        }
        None => {
            let collection = create_collection(service, config).await?;
            if let Some(env_file) = env_file {
                if let Err(e) = env_file
                    .append_var(COLLECTION_NFT_VAR, &collection.mint.to_string())
                    .await
                {
                    tracing::warn!(
                        error = %e,
                        path = %env_file.path().display(),
                        "failed to save collection mint to env file"
                    );
                }
            }
            collection
        }
    };

    let merkle_tree = create_merkle_tree(service, config).await?;

    tracing::info!("Creating cNFT metadata...");
    let cnft_metadata_uri = service
        .create_metadata(&metadata_request(config, &config.profile.cnft_image))
        .await?;
    tracing::debug!(uri = %cnft_metadata_uri, "created cNFT metadata");

    tracing::info!("Minting cNFTs...");
    let mut cnft_mints = Vec::with_capacity(config.mint_count);
    let mut encoded_transactions = Vec::with_capacity(config.mint_count);
    for i in 0..config.mint_count {
        let minted = service
            .mint_compressed_nft(&MintCompressedNftRequest {
                network: config.network,
                creator_wallet: config.payer,
                merkle_tree: merkle_tree.address,
                metadata_uri: cnft_metadata_uri.clone(),
                collection_address: collection.mint,
                is_mutable: true,
                receiver: config.receiver,
                fee_payer: config.payer,
            })
            .await?;

        tracing::debug!(
            index = i + 1,
            mint = %minted.mint,
            "built cNFT mint transaction"
        );
        cnft_mints.push(minted.mint);
        encoded_transactions.push(minted.encoded_transaction);
    }

    tracing::info!("Signing cNFTs mint transaction...");
    let mint_signatures = relay(service, config, encoded_transactions).await?;
    tracing::debug!(signatures = ?mint_signatures, "relayed cNFT mint transactions");

    Ok(MintReport {
        network: config.network,
        payer_balance,
        collection,
        merkle_tree,
        cnft_metadata_uri,
        cnft_mints,
        mint_signatures,
    })
}

async fn create_collection<S>(service: &S, config: &MinterConfig) -> MinterResult<CollectionOutcome>
where
    S: MintingService + ?Sized,
{
    tracing::info!("Creating Collection URI...");
    let metadata_uri = service
        .create_metadata(&metadata_request(config, &config.profile.collection_image))
        .await?;
    tracing::debug!(uri = %metadata_uri, "created collection metadata");

    tracing::info!("Creating collection...");
    let created = service
        .create_nft_from_metadata(&CreateNftFromMetadataRequest {
            network: config.network,
            metadata_uri: metadata_uri.clone(),
            receiver: config.receiver,
            fee_payer: config.payer,
        })
        .await?;

    tracing::info!("Signing collection transaction...");
    let signature = first_signature(relay(service, config, vec![created.encoded_transaction]).await?)?;
    tracing::debug!(%signature, mint = %created.mint, "relayed collection transaction");

    Ok(CollectionOutcome {
        mint: created.mint,
        metadata_uri: Some(metadata_uri),
        signature: Some(signature),
    })
}

async fn create_merkle_tree<S>(service: &S, config: &MinterConfig) -> MinterResult<MerkleTreeOutcome>
where
    S: MintingService + ?Sized,
{
    tracing::info!("Creating merkle tree...");
    let tree = service
        .create_merkle_tree(&CreateMerkleTreeRequest {
            network: config.network,
            wallet_address: config.payer,
            max_depth_size_pair: MaxDepthSizePair {
                max_depth: MERKLE_TREE_MAX_DEPTH,
                max_buffer_size: MERKLE_TREE_MAX_BUFFER_SIZE,
            },
            canopy_depth: MERKLE_TREE_CANOPY_DEPTH,
            fee_payer: config.payer,
        })
        .await?;

    tracing::info!("Signing merkle tree transaction...");
    let signature = first_signature(relay(service, config, vec![tree.encoded_transaction]).await?)?;
    tracing::debug!(%signature, tree = %tree.tree, "relayed merkle tree transaction");

    Ok(MerkleTreeOutcome {
        address: tree.tree,
        signature,
    })
}

fn metadata_request(config: &MinterConfig, image: &str) -> CreateMetadataRequest {
    let profile = &config.profile;
    CreateMetadataRequest {
        creator: config.payer,
        name: profile.name.clone(),
        symbol: profile.symbol.clone(),
        description: profile.description.clone(),
        external_url: profile.external_url.clone(),
        image: image.to_string(),
        attributes: vec![Attribute {
            trait_type: "collection".to_string(),
            value: profile.name.clone(),
        }],
    }
}

/// Checks every transaction is paid by the configured payer, then relays them in one call.
async fn relay<S>(
    service: &S,
    config: &MinterConfig,
    encoded_transactions: Vec<EncodedTransaction>,
) -> MinterResult<Vec<String>>
where
    S: MintingService + ?Sized,
{
    for transaction in &encoded_transactions {
        transaction.ensure_fee_payer(&config.payer)?;
    }

    let relayed = service
        .sign_many(&SignManyRequest {
            network: config.network,
            encoded_transactions,
            commitment: RELAY_COMMITMENT.to_string(),
        })
        .await?;

    if relayed.is_empty() {
        return Err(Error::EmptyRelayResponse);
    }

    Ok(relayed
        .into_iter()
        .map(|transaction| transaction.signature)
        .collect())
}

fn first_signature(signatures: Vec<String>) -> MinterResult<String> {
    signatures
        .into_iter()
        .next()
        .ok_or(Error::EmptyRelayResponse)
}
