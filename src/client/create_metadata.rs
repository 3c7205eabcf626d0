use super::ShyftClient;
use crate::models::{CreateMetadataRequest, MetadataResponse, MinterResult};

impl ShyftClient {
    /// Uploads NFT metadata JSON to Shyft's storage and returns where it lives.
    /// * `request` - creator, name, symbol, artwork and attributes of the NFT.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let metadata = shyft
    ///     .create_metadata(&CreateMetadataRequest {
    ///         creator: payer,
    ///         name: "Noviciado OG Pass".to_string(),
    ///         symbol: "NOP".to_string(),
    ///         description: String::new(),
    ///         external_url: String::new(),
    ///         image: image_url,
    ///         attributes: vec![],
    ///     })
    ///     .await?;
    /// println!("URI URL: {}", metadata.uri);
    /// ```
    pub async fn create_metadata(
        &self,
        request: &CreateMetadataRequest,
    ) -> MinterResult<MetadataResponse> {
        self.send(self.post("metadata/create").json(request)).await
    }
}
