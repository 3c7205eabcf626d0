use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, instruction::Instruction, pubkey::Pubkey,
};

use crate::{error::Error, models::MinterResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Min,
    Low,
    Medium,
    High,
    VeryHigh,
    UnsafeMax,
}

impl Default for PriorityLevel {
    fn default() -> Self {
        Self::High
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriorityFeeEstimate {
    priority_fee_estimate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<PriorityFeeEstimate>,
    error: Option<RpcErrorObject>,
}

/// Client for a `getPriorityFeeEstimate` JSON-RPC endpoint (Helius).
pub struct PriorityFeeClient {
    url: String,
    level: PriorityLevel,
    http_client: reqwest::Client,
}

impl PriorityFeeClient {
    pub fn new<U: ToString>(url: U) -> Self {
        Self {
            url: url.to_string(),
            level: PriorityLevel::default(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_level(mut self, level: PriorityLevel) -> Self {
        self.level = level;
        self
    }

    /// Estimated compute unit price, in micro-lamports, for a transaction touching `account_keys`.
    pub async fn get_priority_fee_estimate(&self, account_keys: &[Pubkey]) -> MinterResult<u64> {
        let response = self
            .http_client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&build_request(account_keys, self.level))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::PriorityFeeRpcError {
                code: response.status().as_u16() as i64,
                message: response.text().await?,
            });
        }

        let fee = parse_response(response.json::<Value>().await?)?;
        tracing::info!("Transaction Priority Fees: {} micro-lamports", fee);
        Ok(fee)
    }

    /// `SetComputeUnitPrice` instruction priced at the current estimate.
    pub async fn compute_unit_price_instruction(
        &self,
        account_keys: &[Pubkey],
    ) -> MinterResult<Instruction> {
        let fee = self.get_priority_fee_estimate(account_keys).await?;
        Ok(ComputeBudgetInstruction::set_compute_unit_price(fee))
    }
}

pub fn build_request(account_keys: &[Pubkey], level: PriorityLevel) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": "1",
        "method": "getPriorityFeeEstimate",
        "params": [{
            "accountKeys": account_keys.iter().map(Pubkey::to_string).collect::<Vec<_>>(),
            "options": { "priority_level": level },
        }],
    })
}

/// Extracts the estimate, rounded up to whole micro-lamports. A zero estimate is treated as missing.
pub fn parse_response(response: Value) -> MinterResult<u64> {
    let response: RpcResponse = serde_json::from_value(response)?;

    if let Some(RpcErrorObject { code, message }) = response.error {
        return Err(Error::PriorityFeeRpcError { code, message });
    }

    match response.result.and_then(|result| result.priority_fee_estimate) {
        Some(estimate) if estimate > 0.0 => Ok(estimate.ceil() as u64),
        _ => Err(Error::MissingPriorityFee),
    }
}
