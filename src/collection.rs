use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::Mint;

use crate::{constants::TOKEN_PROGRAM_ID, error::Error, models::MinterResult};

/// Checks that `mint` is an initialized SPL token mint shaped like an NFT
/// (zero decimals, supply of one) before it is reused as a collection.
pub async fn verify_collection_mint(rpc_client: &RpcClient, mint: &Pubkey) -> MinterResult<Mint> {
    let account = rpc_client.get_account(mint).await?;

    if account.owner != *TOKEN_PROGRAM_ID {
        return Err(Error::InvalidCollection {
            mint: *mint,
            reason: format!("account is owned by {}, not the token program", account.owner),
        });
    }

    let mint_state = Mint::unpack(&account.data).map_err(|e| Error::InvalidCollection {
        mint: *mint,
        reason: e.to_string(),
    })?;

    if mint_state.decimals != 0 || mint_state.supply != 1 {
        return Err(Error::InvalidCollection {
            mint: *mint,
            reason: format!(
                "expected an NFT mint, found decimals {} and supply {}",
                mint_state.decimals, mint_state.supply
            ),
        });
    }

    tracing::debug!("collection mint {} verified", mint);
    Ok(mint_state)
}
