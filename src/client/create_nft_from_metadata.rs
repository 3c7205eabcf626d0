use super::ShyftClient;
use crate::models::{CreateNftFromMetadataRequest, MintTransactionResponse, MinterResult};

impl ShyftClient {
    /// Builds the unsigned transaction that mints a regular NFT from an existing metadata URI.
    /// The returned transaction still has to be relayed with [`ShyftClient::sign_many`].
    pub async fn create_nft_from_metadata(
        &self,
        request: &CreateNftFromMetadataRequest,
    ) -> MinterResult<MintTransactionResponse> {
        self.send(self.post("nft/create_from_metadata").json(request))
            .await
    }
}
