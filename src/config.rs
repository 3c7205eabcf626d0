use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::{fmt, path::Path, str::FromStr};

use crate::{constants::*, error::Error, models::MinterResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Network {
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC endpoint of the cluster.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Devnet => DEVNET_RPC_URL,
            Self::Testnet => TESTNET_RPC_URL,
            Self::MainnetBeta => MAINNET_RPC_URL,
        }
    }

    /// Query string solscan needs to show a non-mainnet cluster. Empty on mainnet.
    pub fn explorer_cluster_query(&self) -> &'static str {
        match self {
            Self::Devnet => "?cluster=devnet",
            Self::Testnet => "?cluster=testnet",
            Self::MainnetBeta => "",
        }
    }

    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "{}/{}{}",
            SOLSCAN_TX_PREFIX,
            signature,
            self.explorer_cluster_query()
        )
    }

    pub fn explorer_account_url(&self, address: &Pubkey) -> String {
        format!(
            "{}/{}{}",
            SOLSCAN_ACCOUNT_PREFIX,
            address,
            self.explorer_cluster_query()
        )
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::Devnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet" | "mainnet-beta" => Ok(Self::MainnetBeta),
            other => Err(format!("unknown network {:?}", other)),
        }
    }
}

/// Name, artwork and description shared by the collection NFT and the compressed NFTs.
#[derive(Clone, Debug, PartialEq)]
pub struct NftProfile {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub external_url: String,
    pub collection_image: String,
    pub cnft_image: String,
}

impl Default for NftProfile {
    fn default() -> Self {
        Self {
            name: NFT_NAME.to_string(),
            symbol: NFT_SYMBOL.to_string(),
            description: NFT_DESCRIPTION.to_string(),
            external_url: NFT_EXTERNAL_URL.to_string(),
            collection_image: COLLECTION_IMAGE_URL.to_string(),
            cnft_image: CNFT_IMAGE_URL.to_string(),
        }
    }
}

/// Cluster and RPC settings, needed by every command.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterConfig {
    pub network: Network,
    pub rpc_url: String,
    pub priority_fee_url: Option<String>,
}

impl ClusterConfig {
    pub fn from_lookup<F>(lookup: F) -> MinterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        let network = match get(NETWORK_VAR) {
            Some(network) => network.parse().map_err(|reason| Error::InvalidConfig {
                name: NETWORK_VAR,
                reason,
            })?,
            None => Network::default(),
        };

        Ok(Self {
            network,
            rpc_url: get(RPC_URL_VAR).unwrap_or_else(|| network.rpc_url().to_string()),
            priority_fee_url: get(HELIUS_URL_VAR),
        })
    }
}

/// Settings for a mint run. Built once at startup and shared read-only afterwards.
#[derive(Clone, Debug)]
pub struct MinterConfig {
    pub api_key: String,
    pub receiver: Pubkey,
    pub payer: Pubkey,
    pub network: Network,
    pub rpc_url: String,
    pub priority_fee_url: Option<String>,
    /// Collection mint to reuse instead of creating a new one.
    pub collection: Option<Pubkey>,
    pub mint_count: usize,
    pub profile: NftProfile,
}

impl MinterConfig {
    /// Loads `env_file` into the process environment (if it exists, without overriding
    /// variables that are already set) and then reads the environment.
    pub fn from_env_file(env_file: &Path) -> MinterResult<Self> {
        load_env_file(env_file);
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> MinterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        let api_key = get(SHYFT_API_KEY_VAR);
        let receiver = get(RECEIVER_WALLET_VAR);
        let payer = get(PAYER_WALLET_VAR);

        let missing: Vec<&'static str> = [
            (SHYFT_API_KEY_VAR, api_key.is_none()),
            (RECEIVER_WALLET_VAR, receiver.is_none()),
            (PAYER_WALLET_VAR, payer.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then(|| name))
        .collect();

        let (api_key, receiver, payer) = match (api_key, receiver, payer) {
            (Some(api_key), Some(receiver), Some(payer)) => (api_key, receiver, payer),
            _ => return Err(Error::MissingConfig(missing)),
        };

        let ClusterConfig {
            network,
            rpc_url,
            priority_fee_url,
        } = ClusterConfig::from_lookup(&lookup)?;

        let collection = get(COLLECTION_NFT_VAR)
            .map(|collection| parse_pubkey(COLLECTION_NFT_VAR, &collection))
            .transpose()?;

        let mint_count = match get(MINT_COUNT_VAR) {
            Some(count) => parse_mint_count(&count)?,
            None => DEFAULT_MINT_COUNT,
        };

        Ok(Self {
            api_key,
            receiver: parse_pubkey(RECEIVER_WALLET_VAR, &receiver)?,
            payer: parse_pubkey(PAYER_WALLET_VAR, &payer)?,
            network,
            rpc_url,
            priority_fee_url,
            collection,
            mint_count,
            profile: NftProfile::default(),
        })
    }

    pub fn with_mint_count(mut self, mint_count: usize) -> MinterResult<Self> {
        self.mint_count = check_mint_count(mint_count)?;
        Ok(self)
    }
}

/// Loads a dotenv file into the process environment. A missing file is not an error.
pub fn load_env_file(env_file: &Path) {
    match dotenv::from_path(env_file) {
        Ok(()) => tracing::debug!("loaded environment from {}", env_file.display()),
        Err(e) => tracing::debug!("no environment loaded from {}: {}", env_file.display(), e),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_pubkey(name: &'static str, value: &str) -> MinterResult<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| Error::InvalidConfig {
        name,
        reason: e.to_string(),
    })
}

fn parse_mint_count(value: &str) -> MinterResult<usize> {
    let count = value
        .trim()
        .parse::<usize>()
        .map_err(|e| Error::InvalidConfig {
            name: MINT_COUNT_VAR,
            reason: e.to_string(),
        })?;
    check_mint_count(count)
}

/// The whole batch goes into one merkle tree, so it must fit its leaves.
fn check_mint_count(count: usize) -> MinterResult<usize> {
    let reason = if count == 0 {
        "must mint at least one cNFT".to_string()
    } else if count > MAX_MINT_COUNT {
        format!(
            "{} cNFTs do not fit a merkle tree of depth {} ({} leaves)",
            count, MERKLE_TREE_MAX_DEPTH, MAX_MINT_COUNT
        )
    } else {
        return Ok(count);
    };

    Err(Error::InvalidConfig {
        name: MINT_COUNT_VAR,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const REQUIRED: [&str; 3] = [SHYFT_API_KEY_VAR, RECEIVER_WALLET_VAR, PAYER_WALLET_VAR];

    fn full_env() -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert(SHYFT_API_KEY_VAR, "api-key".to_string());
        vars.insert(RECEIVER_WALLET_VAR, Pubkey::new_unique().to_string());
        vars.insert(PAYER_WALLET_VAR, Pubkey::new_unique().to_string());
        vars
    }

    fn load(vars: &HashMap<&'static str, String>) -> MinterResult<MinterConfig> {
        MinterConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn every_missing_subset_is_named() {
        for mask in 1u8..8 {
            let mut vars = full_env();
            let mut expected = Vec::new();
            for (bit, name) in REQUIRED.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    vars.remove(name);
                    expected.push(*name);
                }
            }

            match load(&vars) {
                Err(Error::MissingConfig(missing)) => assert_eq!(missing, expected),
                other => panic!("mask {:03b}: unexpected {:?}", mask, other),
            }
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = full_env();
        vars.insert(SHYFT_API_KEY_VAR, "  ".to_string());

        assert!(matches!(
            load(&vars),
            Err(Error::MissingConfig(missing)) if missing == vec![SHYFT_API_KEY_VAR]
        ));
    }

    #[test]
    fn defaults_apply() {
        let config = load(&full_env()).unwrap();

        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.rpc_url, DEVNET_RPC_URL);
        assert_eq!(config.mint_count, DEFAULT_MINT_COUNT);
        assert_eq!(config.collection, None);
        assert_eq!(config.priority_fee_url, None);
    }

    #[test]
    fn optional_overrides() {
        let collection = Pubkey::new_unique();
        let mut vars = full_env();
        vars.insert(NETWORK_VAR, "mainnet-beta".to_string());
        vars.insert(COLLECTION_NFT_VAR, collection.to_string());
        vars.insert(MINT_COUNT_VAR, "5".to_string());
        vars.insert(HELIUS_URL_VAR, "https://fees.example".to_string());

        let config = load(&vars).unwrap();

        assert_eq!(config.network, Network::MainnetBeta);
        assert_eq!(config.rpc_url, MAINNET_RPC_URL);
        assert_eq!(config.collection, Some(collection));
        assert_eq!(config.mint_count, 5);
        assert_eq!(config.priority_fee_url.as_deref(), Some("https://fees.example"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let mut vars = full_env();
        vars.insert(PAYER_WALLET_VAR, "not-a-pubkey".to_string());
        assert!(matches!(
            load(&vars),
            Err(Error::InvalidConfig { name, .. }) if name == PAYER_WALLET_VAR
        ));

        let mut vars = full_env();
        vars.insert(MINT_COUNT_VAR, "0".to_string());
        assert!(matches!(
            load(&vars),
            Err(Error::InvalidConfig { name, .. }) if name == MINT_COUNT_VAR
        ));
    }

    #[test]
    fn mint_count_is_bounded_by_tree_capacity() {
        let mut vars = full_env();
        vars.insert(MINT_COUNT_VAR, MAX_MINT_COUNT.to_string());
        let config = load(&vars).unwrap();
        assert_eq!(config.mint_count, 8);

        vars.insert(MINT_COUNT_VAR, (MAX_MINT_COUNT + 1).to_string());
        assert!(matches!(
            load(&vars),
            Err(Error::InvalidConfig { name, .. }) if name == MINT_COUNT_VAR
        ));

        let config = load(&full_env()).unwrap();
        assert!(matches!(
            config.clone().with_mint_count(9),
            Err(Error::InvalidConfig { name, .. }) if name == MINT_COUNT_VAR
        ));
        assert!(config.clone().with_mint_count(0).is_err());
        assert_eq!(config.with_mint_count(8).unwrap().mint_count, 8);
    }

    #[test]
    fn explorer_links() {
        assert_eq!(
            Network::Devnet.explorer_tx_url("abc"),
            "https://solscan.io/tx/abc?cluster=devnet"
        );
        assert_eq!(
            Network::MainnetBeta.explorer_tx_url("abc"),
            "https://solscan.io/tx/abc"
        );
    }
}
