//! Error handling for the stake vault client.
//!
//! Every failure kind the client can run into has its own variant so callers
//! can branch on what went wrong instead of inspecting strings. Submission
//! failures live in [`SubmitError`], node transport failures in [`RpcError`],
//! signing failures in [`WalletError`], and everything the high-level
//! [`crate::vault::StakeVault`] surfaces is folded into [`ClientError`].

use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction_error::TransactionError;
use thiserror::Error;

use crate::rpc::SimulationDiagnostic;

/// Failure reported by the blockchain node or the transport in front of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("RPC error: {message}")]
pub struct RpcError {
    /// Human-readable description.
    pub message: String,
}

impl RpcError {
    /// Create an RPC error from any displayable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<solana_client::client_error::ClientError> for RpcError {
    fn from(error: solana_client::client_error::ClientError) -> Self {
        Self::new(error.to_string())
    }
}

/// Signing was refused or could not be performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The signer is not one of the message's required signers.
    #[error("signer {0} is not a required signer of this message")]
    NotASigner(Pubkey),

    /// The underlying signer failed.
    #[error("signing failed: {0}")]
    Signer(String),

    /// The wallet rejected the signing request.
    #[error("signing request rejected: {0}")]
    Rejected(String),
}

/// Outcome of a failed submission.
///
/// Each variant corresponds to one terminal state of the submission state
/// machine. Only the confirmation stage is retried; everything before the
/// broadcast fails on the first error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// No instructions were supplied.
    #[error("cannot submit a transaction without instructions")]
    EmptyInstructions,

    /// The latest blockhash could not be fetched.
    #[error("failed to fetch latest blockhash: {0}")]
    BlockhashUnavailable(RpcError),

    /// The instructions could not be compiled into a message.
    #[error("failed to compile transaction message: {0}")]
    Compile(String),

    /// An extra signer or the wallet failed to sign.
    #[error("failed to sign transaction: {0}")]
    SignFailed(WalletError),

    /// The node refused the signed transaction.
    #[error("failed to broadcast transaction: {0}")]
    BroadcastFailed(RpcError),

    /// The transaction landed but its execution failed on chain.
    #[error("transaction {signature} failed on chain: {error}")]
    ExecutionFailed {
        /// Broadcast signature.
        signature: Signature,
        /// Error reported in the signature status.
        error: TransactionError,
        /// Diagnostic re-simulation, when one was captured.
        diagnostic: Option<SimulationDiagnostic>,
    },

    /// The blockhash expired before the transaction was observed.
    #[error("transaction {signature} expired before confirmation")]
    Expired {
        /// Broadcast signature.
        signature: Signature,
    },

    /// No status arrived within the polling budget.
    #[error("transaction {signature} not confirmed after {attempts} attempts")]
    TimedOut {
        /// Broadcast signature.
        signature: Signature,
        /// Number of status polls performed.
        attempts: u32,
    },
}

impl SubmitError {
    /// Signature of the broadcast transaction, if the failure happened after broadcast
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::ExecutionFailed { signature, .. }
            | Self::Expired { signature }
            | Self::TimedOut { signature, .. } => Some(signature),
            _ => None,
        }
    }
}

/// Main error type for the stake vault client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Submitting a transaction failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// A read against the node failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The requested account does not exist.
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    /// Account data could not be decoded into the expected layout.
    #[error("failed to read account {address}: {reason}")]
    ReadFailed {
        /// Account that was read.
        address: Pubkey,
        /// What was wrong with the data.
        reason: String,
    },

    /// A token mint is owned by the wrong token program.
    #[error("mint {mint} must be owned by {expected}, found {actual}")]
    InvalidMint {
        /// Mint address.
        mint: Pubkey,
        /// Token program the mint has to belong to.
        expected: Pubkey,
        /// Owner reported by the node.
        actual: Pubkey,
    },

    /// Instruction arguments could not be serialized.
    #[error("failed to encode instruction {instruction}: {reason}")]
    Encode {
        /// Instruction name.
        instruction: &'static str,
        /// Serializer error.
        reason: String,
    },

    /// A user-supplied amount is not representable.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The wallet could not be loaded.
    #[error("failed to load wallet: {0}")]
    Wallet(String),
}

/// Result type alias for the stake vault client.
pub type ClientResult<T> = Result<T, ClientError>;
