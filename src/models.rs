use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};

pub mod pubkey_string;

use crate::{config::Network, error::Error};

pub type MinterResult<T> = Result<T, Error>;

/// Envelope every Shyft response is wrapped in.
#[derive(Clone, Debug, Deserialize)]
pub struct ShyftResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub result: Option<T>,
}

impl<T> ShyftResponse<T> {
    /// Unwraps `result`, turning an unsuccessful or empty envelope into [`Error::ShyftApiError`].
    pub fn into_result(self) -> MinterResult<T> {
        match (self.success, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(Error::ShyftApiError(format!(
                "response has no result: {}",
                self.message
            ))),
            (false, _) => Err(Error::ShyftApiError(self.message)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateMetadataRequest {
    #[serde(with = "pubkey_string")]
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub external_url: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataResponse {
    #[serde(default)]
    pub cid: Option<String>,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateNftFromMetadataRequest {
    pub network: Network,
    pub metadata_uri: String,
    #[serde(with = "pubkey_string")]
    pub receiver: Pubkey,
    #[serde(with = "pubkey_string")]
    pub fee_payer: Pubkey,
}

/// Unsigned transaction plus the mint it creates, returned by the NFT and cNFT endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct MintTransactionResponse {
    pub encoded_transaction: EncodedTransaction,
    #[serde(with = "pubkey_string")]
    pub mint: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MaxDepthSizePair {
    pub max_depth: u32,
    pub max_buffer_size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateMerkleTreeRequest {
    pub network: Network,
    #[serde(with = "pubkey_string")]
    pub wallet_address: Pubkey,
    pub max_depth_size_pair: MaxDepthSizePair,
    pub canopy_depth: u32,
    #[serde(with = "pubkey_string")]
    pub fee_payer: Pubkey,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MerkleTreeResponse {
    pub encoded_transaction: EncodedTransaction,
    #[serde(with = "pubkey_string")]
    pub tree: Pubkey,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MintCompressedNftRequest {
    pub network: Network,
    #[serde(with = "pubkey_string")]
    pub creator_wallet: Pubkey,
    #[serde(with = "pubkey_string")]
    pub merkle_tree: Pubkey,
    pub metadata_uri: String,
    #[serde(with = "pubkey_string")]
    pub collection_address: Pubkey,
    pub is_mutable: bool,
    #[serde(with = "pubkey_string")]
    pub receiver: Pubkey,
    #[serde(with = "pubkey_string")]
    pub fee_payer: Pubkey,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignManyRequest {
    pub network: Network,
    pub encoded_transactions: Vec<EncodedTransaction>,
    pub commitment: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RelayedTransaction {
    #[serde(default)]
    pub id: Option<String>,
    pub signature: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Base64 wire encoding of a bincode-serialized [`Transaction`], as produced by the minting API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedTransaction(pub String);

impl EncodedTransaction {
    pub fn encode(transaction: &Transaction) -> MinterResult<Self> {
        let bytes = bincode::serialize(transaction)
            .map_err(|e| Error::TransactionDecodeError(e.to_string()))?;
        Ok(Self(base64::encode(bytes)))
    }

    pub fn decode(&self) -> MinterResult<Transaction> {
        let bytes =
            base64::decode(&self.0).map_err(|e| Error::TransactionDecodeError(e.to_string()))?;
        bincode::deserialize(&bytes).map_err(|e| Error::TransactionDecodeError(e.to_string()))
    }

    /// First account key of the message, which pays the fee.
    pub fn fee_payer(&self) -> MinterResult<Option<Pubkey>> {
        let transaction = self.decode()?;
        Ok(transaction.message.account_keys.first().copied())
    }

    /// Fails with [`Error::UnexpectedFeePayer`] unless `expected` pays for this transaction.
    pub fn ensure_fee_payer(&self, expected: &Pubkey) -> MinterResult<()> {
        match self.fee_payer()? {
            Some(found) if found == *expected => Ok(()),
            found => Err(Error::UnexpectedFeePayer {
                expected: *expected,
                found,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solana_sdk::system_instruction;

    #[test]
    fn failed_envelope_reports_message() {
        let response: ShyftResponse<MetadataResponse> = serde_json::from_value(json!({
            "success": false,
            "message": "Invalid api key",
            "result": null,
        }))
        .unwrap();

        match response.into_result() {
            Err(Error::ShyftApiError(message)) => assert_eq!(message, "Invalid api key"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn fee_payer_is_first_account_key() {
        let payer = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let instruction = system_instruction::transfer(&payer, &other, 1);
        let transaction = Transaction::new_with_payer(&[instruction], Some(&payer));
        let encoded = EncodedTransaction::encode(&transaction).unwrap();

        assert_eq!(encoded.fee_payer().unwrap(), Some(payer));
        assert!(encoded.ensure_fee_payer(&payer).is_ok());
        assert!(matches!(
            encoded.ensure_fee_payer(&other),
            Err(Error::UnexpectedFeePayer { found: Some(found), .. }) if found == payer
        ));
    }

    #[test]
    fn garbage_transaction_fails_to_decode() {
        let encoded = EncodedTransaction("not base64!".to_string());
        assert!(matches!(
            encoded.decode(),
            Err(Error::TransactionDecodeError(_))
        ));
    }

    #[test]
    fn merkle_tree_request_uses_api_field_names() {
        let wallet = Pubkey::new_unique();
        let request = CreateMerkleTreeRequest {
            network: Network::Devnet,
            wallet_address: wallet,
            max_depth_size_pair: MaxDepthSizePair {
                max_depth: 3,
                max_buffer_size: 8,
            },
            canopy_depth: 0,
            fee_payer: wallet,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "network": "devnet",
                "wallet_address": wallet.to_string(),
                "max_depth_size_pair": { "max_depth": 3, "max_buffer_size": 8 },
                "canopy_depth": 0,
                "fee_payer": wallet.to_string(),
            })
        );
    }
}
