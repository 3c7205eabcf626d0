use cnft_minter::{
    error::Error,
    funding::{transfer_instructions, transfer_sol_if_needed, FundingOutcome},
    priority_fee::{PriorityFeeClient, PriorityLevel},
    Keypair, Pubkey, RpcClient,
};
use serde_json::json;
use solana_client::rpc_request::RpcRequest;
use solana_sdk::{
    compute_budget::{self, ComputeBudgetInstruction},
    native_token::LAMPORTS_PER_SOL,
    system_program,
};
use std::collections::HashMap;
use test_utilities::HttpServer;

extern crate test_utilities;

fn fee_server(estimate: f64) -> HttpServer {
    HttpServer::json(
        200,
        json!({
            "jsonrpc": "2.0",
            "id": "1",
            "result": { "priorityFeeEstimate": estimate },
        }),
    )
}

fn mock_rpc_with_balance(lamports: u64) -> RpcClient {
    let mut mocks = HashMap::new();
    mocks.insert(
        RpcRequest::GetBalance,
        test_utilities::balance_response(lamports),
    );
    RpcClient::new_mock_with_mocks("https://api.devnet.solana.com".to_string(), mocks)
}

#[tokio::test]
async fn test_estimate_is_requested_and_rounded_up() {
    let server = fee_server(1200.4);
    let fees = PriorityFeeClient::new(&server.url).with_level(PriorityLevel::VeryHigh);
    let account = Pubkey::new_unique();

    let fee = fees
        .get_priority_fee_estimate(&[account])
        .await
        .expect("failed to get priority fee estimate");
    assert_eq!(fee, 1201);

    let body = server.single_request().json();
    assert_eq!(body["method"], "getPriorityFeeEstimate");
    assert_eq!(body["params"][0]["accountKeys"][0], account.to_string());
    assert_eq!(body["params"][0]["options"]["priority_level"], "VERY_HIGH");
}

#[tokio::test]
async fn test_http_error_status_is_an_rpc_error() {
    let server = HttpServer::text(500, "text/plain", "internal error");
    let fees = PriorityFeeClient::new(&server.url);

    let err = fees
        .get_priority_fee_estimate(&[system_program::id()])
        .await
        .expect_err("500 accepted");

    assert!(matches!(
        err,
        Error::PriorityFeeRpcError { code: 500, message } if message == "internal error"
    ));
}

#[tokio::test]
async fn test_transfer_starts_with_compute_unit_price() {
    let server = fee_server(5000.0);
    let fees = PriorityFeeClient::new(&server.url);
    let sender = Pubkey::new_unique();
    let receiver = Pubkey::new_unique();

    let instructions = transfer_instructions(&sender, &receiver, Some(&fees))
        .await
        .expect("failed to build transfer");

    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].program_id, compute_budget::id());
    assert_eq!(
        instructions[0],
        ComputeBudgetInstruction::set_compute_unit_price(5000)
    );
    assert_eq!(instructions[1].program_id, system_program::id());
}

#[tokio::test]
async fn test_transfer_without_fee_client_has_no_compute_unit_price() {
    let instructions = transfer_instructions(&Pubkey::new_unique(), &Pubkey::new_unique(), None)
        .await
        .expect("failed to build transfer");

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].program_id, system_program::id());
}

#[tokio::test]
async fn test_transfer_with_priority_fee_is_funded() {
    let server = fee_server(5000.0);
    let fees = PriorityFeeClient::new(&server.url);
    let sender = Keypair::new();
    let receiver = Pubkey::new_unique();
    let mock_rpc = mock_rpc_with_balance(LAMPORTS_PER_SOL / 2 - 1);

    let outcome = transfer_sol_if_needed(&mock_rpc, &sender, &receiver, Some(&fees))
        .await
        .expect("failed to check balance");

    // the mock sender answers later getBalance calls with 50 lamports
    assert!(matches!(outcome, FundingOutcome::Funded { new_balance: 50, .. }));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_fee_endpoint_error_fails_the_transfer_softly() {
    let server = HttpServer::json(
        200,
        json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": { "code": -32602, "message": "bad params" },
        }),
    );
    let fees = PriorityFeeClient::new(&server.url);
    let mock_rpc = mock_rpc_with_balance(0);

    let sender = Keypair::new();
    let receiver = Pubkey::new_unique();

    let outcome = transfer_sol_if_needed(&mock_rpc, &sender, &receiver, Some(&fees))
        .await
        .expect("soft failure returned as error");

    match outcome {
        FundingOutcome::Failed { reason } => assert!(reason.contains("bad params")),
        other => panic!("unexpected outcome {:?}", other),
    }
}
