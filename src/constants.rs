use lazy_static::lazy_static;
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};

/// Base URL of the Shyft Solana API.
pub const SHYFT_API_ENDPOINT: &str = "https://api.shyft.to/sol/v1";
/// Header that carries the Shyft API key.
pub const SHYFT_API_KEY_HEADER: &str = "x-api-key";

pub const SOLSCAN_TX_PREFIX: &str = "https://solscan.io/tx";
pub const SOLSCAN_ACCOUNT_PREFIX: &str = "https://solscan.io/account";

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

// environment variable names
pub const SHYFT_API_KEY_VAR: &str = "SHYFT_API_KEY";
pub const RECEIVER_WALLET_VAR: &str = "RECEIVER_WALLET_ADDRESS";
pub const PAYER_WALLET_VAR: &str = "PAYER_WALLET_ADDRESS";
pub const HELIUS_URL_VAR: &str = "HELIUS_URL";
pub const COLLECTION_NFT_VAR: &str = "COLLECTION_NFT";
pub const NETWORK_VAR: &str = "SOLANA_NETWORK";
pub const RPC_URL_VAR: &str = "SOLANA_RPC_URL";
pub const MINT_COUNT_VAR: &str = "MINT_COUNT";

/// Env file that generated keypairs and collection mints are appended to.
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const DEFAULT_MINT_COUNT: usize = 2;

/// Merkle tree sizing for the compressed NFT batch. A depth of 3 holds 8 leaves.
pub const MERKLE_TREE_MAX_DEPTH: u32 = 3;
pub const MERKLE_TREE_MAX_BUFFER_SIZE: u32 = 8;
pub const MERKLE_TREE_CANOPY_DEPTH: u32 = 0;
/// Leaves in one tree, so the most cNFTs a single run can mint.
pub const MAX_MINT_COUNT: usize = 1 << MERKLE_TREE_MAX_DEPTH;

/// Commitment requested from the transaction relayer.
pub const RELAY_COMMITMENT: &str = "confirmed";

/// Airdrop only when the wallet holds less than this.
pub const AIRDROP_THRESHOLD_LAMPORTS: u64 = LAMPORTS_PER_SOL;
pub const AIRDROP_AMOUNT_LAMPORTS: u64 = 2 * LAMPORTS_PER_SOL;
/// Transfer only when the receiver holds less than this.
pub const TRANSFER_THRESHOLD_LAMPORTS: u64 = LAMPORTS_PER_SOL / 2;
pub const TRANSFER_AMOUNT_LAMPORTS: u64 = LAMPORTS_PER_SOL;

// nft artwork and metadata
pub const NFT_NAME: &str = "Noviciado OG Pass";
pub const NFT_SYMBOL: &str = "NOP";
pub const NFT_DESCRIPTION: &str =
    "This pass is the first one to be delivered to 420 members of the club.";
pub const NFT_EXTERNAL_URL: &str = "https://twitter.com/El_Noviciado";
pub const COLLECTION_IMAGE_URL: &str =
    "https://bafkreidattjvuxzbi7dasz5iyzs5i2wj6b3ckvcr5w7li7bj5s7mvol674.ipfs.nftstorage.link/";
pub const CNFT_IMAGE_URL: &str =
    "https://nftstorage.link/ipfs/bafkreiccybwv72sz5n7muomxjyaaidv55c567s275ahw3msq4jjvlzfc64";

lazy_static! {
    /// Owner program every collection mint account must belong to.
    pub static ref TOKEN_PROGRAM_ID: Pubkey = spl_token::id();
}
