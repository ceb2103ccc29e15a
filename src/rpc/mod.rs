//! Blockchain node operations used by the client
//!
//! [`NodeRpc`] is the seam between the client and the JSON-RPC endpoint. The
//! production implementation wraps the nonblocking
//! [`solana_client::nonblocking::rpc_client::RpcClient`]; tests substitute
//! scripted nodes.

mod client;

use async_trait::async_trait;
use serde::Serialize;
use solana_account::Account;
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;
use solana_transaction_error::TransactionError;

use crate::errors::RpcError;

/// Status of a signature as reported by the node.
///
/// `None` means the node has not seen the transaction yet, `Some(Ok(()))`
/// that it executed, `Some(Err(_))` that execution failed.
pub type SignatureStatus = Option<Result<(), TransactionError>>;

/// Output of a diagnostic transaction simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationDiagnostic {
    /// Error message if simulation failed
    pub error: Option<String>,
    /// Program logs
    pub logs: Vec<String>,
    /// Compute units consumed
    pub units_consumed: Option<u64>,
}

/// JSON-RPC operations consumed by the client
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Latest blockhash usable as a transaction's recent block reference
    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError>;

    /// Broadcast a signed transaction and return its signature
    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature, RpcError>;

    /// Current status of a broadcast signature
    async fn get_signature_status(&self, signature: &Signature) -> Result<SignatureStatus, RpcError>;

    /// Whether `blockhash` is still accepted by the cluster
    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, RpcError>;

    /// Simulate a transaction, letting the node substitute a fresh blockhash
    async fn simulate_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<SimulationDiagnostic, RpcError>;

    /// Fetch an account, `None` when it does not exist
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError>;
}
