use solana_sdk::pubkey::Pubkey;

use super::ShyftClient;
use crate::models::{BalanceResponse, MinterResult};

impl ShyftClient {
    /// Returns the SOL balance of `wallet` on the client's network.
    ///
    /// # Example
    ///
    /// ```ignore
    /// # use cnft_minter::{Network, ShyftClient};
    /// # let shyft = ShyftClient::new("api-key", Network::Devnet);
    /// let balance = shyft.get_balance(&payer).await?;
    /// println!("Payer current balance: {} SOL", balance);
    /// ```
    pub async fn get_balance(&self, wallet: &Pubkey) -> MinterResult<f64> {
        let request = self.get("wallet/balance").query(&[
            ("network", self.network.as_str().to_string()),
            ("wallet", wallet.to_string()),
        ]);

        self.send::<BalanceResponse>(request)
            .await
            .map(|response| response.balance)
    }
}
