use reqwest::Error as ReqwestError;
use solana_client::client_error::ClientError;
use solana_sdk::pubkey::{ParsePubkeyError, Pubkey};
use solana_sdk::signer::SignerError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Required environment variables that were not set, in lookup order.
    MissingConfig(Vec<&'static str>),
    InvalidConfig {
        name: &'static str,
        reason: String,
    },
    ShyftServerError {
        status: u16,
        message: serde_json::Value,
    },
    ShyftApiError(String),
    EmptyRelayResponse,
    UnconfirmedTransaction(String),
    TransactionDecodeError(String),
    UnexpectedFeePayer {
        expected: Pubkey,
        found: Option<Pubkey>,
    },
    InvalidKeypair(String),
    InvalidCollection {
        mint: Pubkey,
        reason: String,
    },
    MissingPriorityFee,
    PriorityFeeRpcError {
        code: i64,
        message: String,
    },
    InvalidJson(serde_json::Error),
    SolanaRpcError(ClientError),
    SignerError(SignerError),
    ReqwestError(ReqwestError),
    FileSystemError(std::io::Error),
    ParsePubkeyError(ParsePubkeyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig(names) => {
                let names = names
                    .iter()
                    .map(|name| format!("{} environment variable", name))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Missing {}", names)
            }
            Self::InvalidConfig { name, reason } => write!(f, "Invalid {}: {}", name, reason),
            Self::ShyftServerError { status, message } => {
                write!(f, "Shyft Server Error {}: {}", status, message)
            }
            Self::ShyftApiError(message) => write!(f, "Shyft API Error: {}", message),
            Self::EmptyRelayResponse => write!(f, "transaction relayer returned no signatures"),
            Self::UnconfirmedTransaction(signature) => {
                write!(f, "transaction {} was not confirmed", signature)
            }
            Self::TransactionDecodeError(e) => write!(f, "failed to decode transaction: {}", e),
            Self::UnexpectedFeePayer { expected, found } => match found {
                Some(found) => write!(f, "expected fee payer {}, found {}", expected, found),
                None => write!(f, "expected fee payer {}, transaction has none", expected),
            },
            Self::InvalidKeypair(e) => write!(f, "invalid keypair: {}", e),
            Self::InvalidCollection { mint, reason } => {
                write!(f, "invalid collection NFT {}: {}", mint, reason)
            }
            Self::MissingPriorityFee => write!(f, "Error getting Priority Fees"),
            Self::PriorityFeeRpcError { code, message } => {
                write!(f, "priority fee RPC error {}: {}", code, message)
            }
            Self::InvalidJson(e) => write!(f, "invalid json: {}", e),
            Self::SolanaRpcError(e) => write!(f, "solana rpc error: {}", e),
            Self::SignerError(e) => write!(f, "signer error: {}", e),
            Self::ReqwestError(e) => write!(f, "http error: {}", e),
            Self::FileSystemError(e) => write!(f, "filesystem error: {}", e),
            Self::ParsePubkeyError(e) => write!(f, "invalid pubkey: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ClientError> for Error {
    fn from(client_error: ClientError) -> Self {
        Self::SolanaRpcError(client_error)
    }
}

impl From<SignerError> for Error {
    fn from(signer_error: SignerError) -> Self {
        Self::SignerError(signer_error)
    }
}

impl From<ReqwestError> for Error {
    fn from(reqwest_error: ReqwestError) -> Self {
        Self::ReqwestError(reqwest_error)
    }
}

impl From<ParsePubkeyError> for Error {
    fn from(parse_pubkey_error: ParsePubkeyError) -> Self {
        Self::ParsePubkeyError(parse_pubkey_error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidJson(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::FileSystemError(e)
    }
}
