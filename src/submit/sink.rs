//! Diagnostic events emitted while submitting

use log::{debug, error, info, warn};
use solana_signature::Signature;
use solana_transaction_error::TransactionError;

use crate::errors::{RpcError, SubmitError};
use crate::rpc::{SignatureStatus, SimulationDiagnostic};

/// Step of a submission that runs before the transaction is broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    Build,
    FetchBlockhash,
    Compile,
    Sign,
    Broadcast,
}

impl std::fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::FetchBlockhash => "blockhash fetch",
            Self::Compile => "compile",
            Self::Sign => "signing",
            Self::Broadcast => "broadcast",
        };
        f.write_str(name)
    }
}

/// Something worth reporting that happened during a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitEvent {
    /// The submission failed before anything was broadcast
    Aborted { stage: SubmitStage, error: SubmitError },
    /// The node accepted the signed transaction
    Broadcast { signature: Signature },
    /// The node acknowledged the broadcast under a different signature
    SignatureMismatch {
        signature: Signature,
        reported: Signature,
    },
    /// One status poll completed
    Polled {
        signature: Signature,
        attempt: u32,
        status: SignatureStatus,
    },
    /// The recent blockhash was reported invalid
    BlockhashInvalid { signature: Signature, strikes: u32 },
    /// A node call inside the confirmation loop failed and was ignored
    RpcFailure {
        operation: &'static str,
        error: RpcError,
    },
    Confirmed { signature: Signature, attempts: u32 },
    ExecutionFailed {
        signature: Signature,
        error: TransactionError,
        diagnostic: Option<SimulationDiagnostic>,
    },
    Expired { signature: Signature, attempts: u32 },
    TimedOut { signature: Signature, attempts: u32 },
}

/// Receives submission diagnostics
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: SubmitEvent);
}

/// Sink forwarding every event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: SubmitEvent) {
        match event {
            SubmitEvent::Aborted { stage, error: cause } => {
                error!("Submission aborted at {}: {}", stage, cause);
            }
            SubmitEvent::Broadcast { signature } => {
                info!("Broadcast transaction {}", signature);
            }
            SubmitEvent::SignatureMismatch {
                signature,
                reported,
            } => {
                warn!("Node reported signature {} for transaction {}", reported, signature);
            }
            SubmitEvent::Polled {
                signature,
                attempt,
                status,
            } => {
                debug!("Poll {} for {}: {:?}", attempt, signature, status);
            }
            SubmitEvent::BlockhashInvalid { signature, strikes } => {
                warn!("Blockhash of {} reported invalid ({} strikes)", signature, strikes);
            }
            SubmitEvent::RpcFailure { operation, error } => {
                warn!("{} failed during confirmation: {}", operation, error);
            }
            SubmitEvent::Confirmed {
                signature,
                attempts,
            } => {
                info!("Transaction {} confirmed after {} polls", signature, attempts);
            }
            SubmitEvent::ExecutionFailed {
                signature,
                error: tx_error,
                diagnostic,
            } => {
                error!("Transaction {} failed on chain: {}", signature, tx_error);
                match diagnostic {
                    Some(diagnostic) => {
                        error!(
                            "Simulation: err={:?} units={:?}",
                            diagnostic.error, diagnostic.units_consumed
                        );
                        for line in &diagnostic.logs {
                            error!("  {}", line);
                        }
                    }
                    None => error!("No simulation diagnostic captured"),
                }
            }
            SubmitEvent::Expired {
                signature,
                attempts,
            } => {
                error!("Transaction {} expired after {} polls", signature, attempts);
            }
            SubmitEvent::TimedOut {
                signature,
                attempts,
            } => {
                error!("Transaction {} not confirmed after {} polls", signature, attempts);
            }
        }
    }
}
