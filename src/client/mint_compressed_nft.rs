use super::ShyftClient;
use crate::models::{MintCompressedNftRequest, MintTransactionResponse, MinterResult};

impl ShyftClient {
    /// Builds the unsigned transaction that mints one compressed NFT into `request.merkle_tree`,
    /// verified as part of `request.collection_address`.
    pub async fn mint_compressed_nft(
        &self,
        request: &MintCompressedNftRequest,
    ) -> MinterResult<MintTransactionResponse> {
        self.send(self.post("nft/compressed/mint").json(request))
            .await
    }
}
