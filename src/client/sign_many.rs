use super::ShyftClient;
use crate::models::{MinterResult, RelayedTransaction, SignManyRequest};

impl ShyftClient {
    /// Hands encoded transactions to Shyft's transaction relayer, which signs them with the
    /// fee payer registered for the API key and submits them to the network.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let relayed = shyft
    ///     .sign_many(&SignManyRequest {
    ///         network: Network::Devnet,
    ///         encoded_transactions: vec![collection.encoded_transaction],
    ///         commitment: "confirmed".to_string(),
    ///     })
    ///     .await?;
    /// println!("signature: {}", relayed[0].signature);
    /// ```
    pub async fn sign_many(
        &self,
        request: &SignManyRequest,
    ) -> MinterResult<Vec<RelayedTransaction>> {
        self.send(self.post("txn_relayer/sign_many").json(request))
            .await
    }
}
