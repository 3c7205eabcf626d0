//! Devnet wallet funding straight through a Solana RPC node.
//!
//! Funding is best effort: once the current balance is known, failures while
//! airdropping or transferring are logged and reported as [`FundingOutcome::Failed`]
//! rather than returned as errors, so callers can carry on.
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::Signature,
    signer::{keypair::Keypair, Signer},
    system_instruction, system_program,
    transaction::Transaction,
};
use std::time::Duration;

use crate::{
    constants::{
        AIRDROP_AMOUNT_LAMPORTS, AIRDROP_THRESHOLD_LAMPORTS, TRANSFER_AMOUNT_LAMPORTS,
        TRANSFER_THRESHOLD_LAMPORTS,
    },
    error::Error,
    models::MinterResult,
    priority_fee::PriorityFeeClient,
};

const CONFIRMATION_RETRIES: usize = 30;
const CONFIRMATION_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq)]
pub enum FundingOutcome {
    /// Balance was already at or above the threshold.
    Skipped { balance: u64 },
    Funded {
        signature: Signature,
        new_balance: u64,
    },
    Failed { reason: String },
}

pub fn needs_airdrop(balance: u64) -> bool {
    balance < AIRDROP_THRESHOLD_LAMPORTS
}

pub fn needs_transfer(balance: u64) -> bool {
    balance < TRANSFER_THRESHOLD_LAMPORTS
}

/// Requests a 2 SOL airdrop when `pubkey` holds less than 1 SOL.
pub async fn airdrop_sol_if_needed(
    rpc_client: &RpcClient,
    pubkey: &Pubkey,
) -> MinterResult<FundingOutcome> {
    let balance = rpc_client.get_balance(pubkey).await?;
    tracing::debug!(balance = lamports_to_sol(balance), "current balance");

    if !needs_airdrop(balance) {
        return Ok(FundingOutcome::Skipped { balance });
    }

    tracing::info!("Airdropping {} SOL...", lamports_to_sol(AIRDROP_AMOUNT_LAMPORTS));
    match airdrop(rpc_client, pubkey).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::warn!(error = %e, %pubkey, "airdrop unsuccessful, likely rate-limited");
            Ok(FundingOutcome::Failed {
                reason: e.to_string(),
            })
        }
    }
}

async fn airdrop(rpc_client: &RpcClient, pubkey: &Pubkey) -> MinterResult<FundingOutcome> {
    let signature = rpc_client
        .request_airdrop(pubkey, AIRDROP_AMOUNT_LAMPORTS)
        .await?;
    wait_for_confirmation(rpc_client, &signature).await?;

    let new_balance = rpc_client.get_balance(pubkey).await?;
    tracing::debug!(balance = lamports_to_sol(new_balance), "new balance");

    Ok(FundingOutcome::Funded {
        signature,
        new_balance,
    })
}

/// Sends 1 SOL from `sender` when `receiver` holds less than 0.5 SOL.
/// With a fee client, the transfer is prefixed with a compute unit price instruction.
pub async fn transfer_sol_if_needed(
    rpc_client: &RpcClient,
    sender: &Keypair,
    receiver: &Pubkey,
    fees: Option<&PriorityFeeClient>,
) -> MinterResult<FundingOutcome> {
    let balance = rpc_client.get_balance(receiver).await?;
    tracing::debug!(balance = lamports_to_sol(balance), "current balance");

    if !needs_transfer(balance) {
        return Ok(FundingOutcome::Skipped { balance });
    }

    match transfer(rpc_client, sender, receiver, fees).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::warn!(error = %e, %receiver, "SOL transfer unsuccessful");
            Ok(FundingOutcome::Failed {
                reason: e.to_string(),
            })
        }
    }
}

async fn transfer(
    rpc_client: &RpcClient,
    sender: &Keypair,
    receiver: &Pubkey,
    fees: Option<&PriorityFeeClient>,
) -> MinterResult<FundingOutcome> {
    let sender_pubkey = sender.pubkey();
    let instructions = transfer_instructions(&sender_pubkey, receiver, fees).await?;

    let recent_blockhash = rpc_client.get_latest_blockhash().await?;
    let txn = Transaction::new_signed_with_payer(
        &instructions,
        Some(&sender_pubkey),
        &[sender],
        recent_blockhash,
    );
    let signature = rpc_client.send_and_confirm_transaction(&txn).await?;

    let new_balance = rpc_client.get_balance(receiver).await?;
    tracing::debug!(balance = lamports_to_sol(new_balance), "new balance");

    Ok(FundingOutcome::Funded {
        signature,
        new_balance,
    })
}

/// The 1 SOL transfer, preceded by a `SetComputeUnitPrice` instruction when `fees` is given.
pub async fn transfer_instructions(
    sender: &Pubkey,
    receiver: &Pubkey,
    fees: Option<&PriorityFeeClient>,
) -> MinterResult<Vec<Instruction>> {
    let mut instructions = Vec::with_capacity(2);

    match fees {
        Some(fees) => {
            instructions.push(
                fees.compute_unit_price_instruction(&[system_program::id()])
                    .await?,
            );
        }
        None => tracing::warn!("no priority fee endpoint configured, sending without priority fee"),
    }

    instructions.push(system_instruction::transfer(
        sender,
        receiver,
        TRANSFER_AMOUNT_LAMPORTS,
    ));
    Ok(instructions)
}

async fn wait_for_confirmation(rpc_client: &RpcClient, signature: &Signature) -> MinterResult<()> {
    for _ in 0..CONFIRMATION_RETRIES {
        let confirmed = rpc_client
            .confirm_transaction_with_commitment(signature, CommitmentConfig::confirmed())
            .await?
            .value;
        if confirmed {
            return Ok(());
        }
        tokio::time::sleep(CONFIRMATION_INTERVAL).await;
    }

    Err(Error::UnconfirmedTransaction(signature.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::native_token::LAMPORTS_PER_SOL;

    #[test]
    fn airdrop_threshold_is_one_sol() {
        assert!(needs_airdrop(0));
        assert!(needs_airdrop(LAMPORTS_PER_SOL - 1));
        assert!(!needs_airdrop(LAMPORTS_PER_SOL));
        assert!(!needs_airdrop(5 * LAMPORTS_PER_SOL));
    }

    #[test]
    fn transfer_threshold_is_half_a_sol() {
        assert!(needs_transfer(LAMPORTS_PER_SOL / 2 - 1));
        assert!(!needs_transfer(LAMPORTS_PER_SOL / 2));
        assert!(!needs_transfer(LAMPORTS_PER_SOL));
    }
}
