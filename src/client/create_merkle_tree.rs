use super::ShyftClient;
use crate::models::{CreateMerkleTreeRequest, MerkleTreeResponse, MinterResult};

impl ShyftClient {
    /// Builds the unsigned transaction that allocates a concurrent merkle tree for compressed NFTs.
    /// * `request` - max depth / buffer size pair and canopy depth of the tree.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tree = shyft
    ///     .create_merkle_tree(&CreateMerkleTreeRequest {
    ///         network: Network::Devnet,
    ///         wallet_address: payer,
    ///         max_depth_size_pair: MaxDepthSizePair { max_depth: 3, max_buffer_size: 8 },
    ///         canopy_depth: 0,
    ///         fee_payer: payer,
    ///     })
    ///     .await?;
    /// println!("Merkle tree address: {}", tree.tree);
    /// ```
    pub async fn create_merkle_tree(
        &self,
        request: &CreateMerkleTreeRequest,
    ) -> MinterResult<MerkleTreeResponse> {
        self.send(self.post("nft/compressed/create_tree").json(request))
            .await
    }
}
