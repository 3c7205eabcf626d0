use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;

mod create_merkle_tree;
mod create_metadata;
mod create_nft_from_metadata;
mod get_balance;
mod mint_compressed_nft;
mod sign_many;

use crate::{
    config::Network,
    constants::{SHYFT_API_ENDPOINT, SHYFT_API_KEY_HEADER},
    error::Error,
    models::*,
};

/// Calls the mint sequence needs from a hosted minting service.
#[async_trait]
pub trait MintingService {
    /// Wallet balance in SOL.
    async fn get_balance(&self, wallet: &Pubkey) -> MinterResult<f64>;

    /// Uploads off-chain metadata and returns its URI.
    async fn create_metadata(&self, request: &CreateMetadataRequest) -> MinterResult<String>;

    async fn create_nft_from_metadata(
        &self,
        request: &CreateNftFromMetadataRequest,
    ) -> MinterResult<MintTransactionResponse>;

    async fn create_merkle_tree(
        &self,
        request: &CreateMerkleTreeRequest,
    ) -> MinterResult<MerkleTreeResponse>;

    async fn mint_compressed_nft(
        &self,
        request: &MintCompressedNftRequest,
    ) -> MinterResult<MintTransactionResponse>;

    /// Signs and submits every transaction in the request, returning one entry per transaction.
    async fn sign_many(&self, request: &SignManyRequest) -> MinterResult<Vec<RelayedTransaction>>;
}

/// Client for the [Shyft](https://docs.shyft.to) Solana API.
pub struct ShyftClient {
    api_key: String,
    network: Network,
    endpoint: String,
    http_client: reqwest::Client,
}

impl ShyftClient {
    pub fn new(api_key: &str, network: Network) -> Self {
        Self::new_with_endpoint(api_key, network, SHYFT_API_ENDPOINT)
    }

    pub fn new_with_endpoint(api_key: &str, network: Network, endpoint: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            network,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(self.url(path))
            .header(SHYFT_API_KEY_HEADER, &self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(self.url(path))
            .header(SHYFT_API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/json")
    }

    /// Sends the request and unwraps the `{success, message, result}` envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> MinterResult<T> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            // gateways answer with html, keep it as a plain string
            let text = response.text().await?;
            return Err(Error::ShyftServerError {
                status: status.as_u16(),
                message: serde_json::from_str(&text).unwrap_or(Value::String(text)),
            });
        }

        response.json::<ShyftResponse<T>>().await?.into_result()
    }
}

#[async_trait]
impl MintingService for ShyftClient {
    async fn get_balance(&self, wallet: &Pubkey) -> MinterResult<f64> {
        ShyftClient::get_balance(self, wallet).await
    }

    async fn create_metadata(&self, request: &CreateMetadataRequest) -> MinterResult<String> {
        ShyftClient::create_metadata(self, request)
            .await
            .map(|metadata| metadata.uri)
    }

    async fn create_nft_from_metadata(
        &self,
        request: &CreateNftFromMetadataRequest,
    ) -> MinterResult<MintTransactionResponse> {
        ShyftClient::create_nft_from_metadata(self, request).await
    }

    async fn create_merkle_tree(
        &self,
        request: &CreateMerkleTreeRequest,
    ) -> MinterResult<MerkleTreeResponse> {
        ShyftClient::create_merkle_tree(self, request).await
    }

    async fn mint_compressed_nft(
        &self,
        request: &MintCompressedNftRequest,
    ) -> MinterResult<MintTransactionResponse> {
        ShyftClient::mint_compressed_nft(self, request).await
    }

    async fn sign_many(&self, request: &SignManyRequest) -> MinterResult<Vec<RelayedTransaction>> {
        ShyftClient::sign_many(self, request).await
    }
}
