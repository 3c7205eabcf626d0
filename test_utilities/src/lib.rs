use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use solana_sdk::{
    program_option::COption, program_pack::Pack, pubkey::Pubkey, system_instruction,
    transaction::Transaction,
};
use spl_token::state::Mint;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

/// `getBalance` mock response.
pub fn balance_response(lamports: u64) -> Value {
    json!({
        "context": { "slot": 1 },
        "value": lamports,
    })
}

/// Base64 unsigned transaction paid for by `fee_payer`, like the ones the minting API returns.
pub fn encoded_transaction(fee_payer: &Pubkey) -> String {
    let instruction = system_instruction::transfer(fee_payer, &Pubkey::new_unique(), 1);
    let txn = Transaction::new_with_payer(&[instruction], Some(fee_payer));
    base64::encode(bincode::serialize(&txn).unwrap())
}

/// Packed SPL token mint with the given supply and decimals.
pub fn mint_data(authority: Pubkey, supply: u64, decimals: u8) -> Vec<u8> {
    let mint = Mint {
        mint_authority: COption::Some(authority),
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::Some(authority),
    };

    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(mint, &mut data).unwrap();
    data
}

/// `getAccountInfo` mock response for an account holding `data`.
pub fn account_info_response(owner: &Pubkey, data: &[u8]) -> Value {
    json!({
        "context": { "slot": 1 },
        "value": {
            "lamports": 1_461_600u64,
            "data": [base64::encode(data), "base64"],
            "owner": owner.to_string(),
            "executable": false,
            "rentEpoch": 0,
        },
    })
}

/// A request received by [`HttpServer`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Local HTTP server that answers every request with one canned response and records it.
/// Must be started from inside a tokio runtime.
pub struct HttpServer {
    pub url: String,
    reply: Arc<Reply>,
}

impl HttpServer {
    pub fn json(status: u16, body: Value) -> Self {
        Self::spawn(status, "application/json", body.to_string())
    }

    pub fn text(status: u16, content_type: &'static str, body: &str) -> Self {
        Self::spawn(status, content_type, body.to_string())
    }

    fn spawn(status: u16, content_type: &'static str, body: String) -> Self {
        let reply = Arc::new(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            content_type,
            body,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(respond).with_state(reply.clone());
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let url = format!("http://{}", server.local_addr());
        tokio::spawn(server);

        Self { url, reply }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.reply.requests.lock().unwrap().clone()
    }

    /// The only request received so far.
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

async fn respond(
    State(reply): State<Arc<Reply>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    reply.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body.clone(),
    )
}
