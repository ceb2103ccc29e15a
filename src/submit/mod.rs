//! Transaction submission and confirmation
//!
//! [`TransactionSubmitter`] turns a list of instructions into a signed v0
//! transaction, broadcasts it without preflight, and polls the node until the
//! transaction is confirmed, fails on chain, expires or runs out of attempts.
//! Only the confirmation stage is retried. Blockhash fetch, signing and
//! broadcast fail on the first error.

mod scheduler;
mod sink;
mod tracker;

use std::sync::Arc;
use std::time::Duration;

use solana_hash::Hash;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_message::{v0, VersionedMessage};
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

use crate::constants::{DEFAULT_EXPIRY_THRESHOLD, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use crate::errors::{RpcError, SubmitError};
use crate::rpc::{NodeRpc, SimulationDiagnostic};
use crate::wallet::{partial_sign, unsigned_transaction, Wallet};

pub use self::scheduler::{Scheduler, TokioScheduler};
pub use self::sink::{DiagnosticSink, LogSink, SubmitEvent, SubmitStage};
pub use self::tracker::{ConfirmationTracker, PollDecision, SubmissionState};

/// Submission tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Delay before each status poll
    pub poll_interval: Duration,
    /// Status polls before giving up
    pub max_attempts: u32,
    /// Invalid-blockhash observations that end the wait early
    pub expiry_threshold: u32,
    /// Broadcast without node-side simulation
    pub skip_preflight: bool,
    /// Re-simulate a transaction that failed on chain to capture its logs
    pub simulate_on_failure: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            expiry_threshold: DEFAULT_EXPIRY_THRESHOLD,
            skip_preflight: true,
            simulate_on_failure: true,
        }
    }
}

/// Builds, signs, broadcasts and confirms transactions
pub struct TransactionSubmitter {
    rpc: Arc<dyn NodeRpc>,
    wallet: Arc<dyn Wallet>,
    scheduler: Arc<dyn Scheduler>,
    sink: Arc<dyn DiagnosticSink>,
    config: SubmitConfig,
}

impl TransactionSubmitter {
    /// Create a submitter that waits on the tokio timer and logs through `log`
    pub fn new(rpc: Arc<dyn NodeRpc>, wallet: Arc<dyn Wallet>) -> Self {
        Self {
            rpc,
            wallet,
            scheduler: Arc::new(TokioScheduler),
            sink: Arc::new(LogSink),
            config: SubmitConfig::default(),
        }
    }

    /// Replace the scheduler used between polls
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_config(mut self, config: SubmitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    pub fn wallet(&self) -> &Arc<dyn Wallet> {
        &self.wallet
    }

    pub fn rpc(&self) -> &Arc<dyn NodeRpc> {
        &self.rpc
    }

    /// Submit `instructions` and wait for a definitive outcome.
    ///
    /// `extra_signers` sign before the wallet does. On success the returned
    /// signature is the one carried by the broadcast transaction.
    pub async fn submit(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature, SubmitError> {
        if instructions.is_empty() {
            return Err(self.abort(SubmitStage::Build, SubmitError::EmptyInstructions));
        }

        let mut tracker = ConfirmationTracker::new(&self.config);

        let recent_blockhash = self.rpc.get_latest_blockhash().await.map_err(|e| {
            self.abort(SubmitStage::FetchBlockhash, SubmitError::BlockhashUnavailable(e))
        })?;

        let transaction = self
            .build_and_sign(instructions, extra_signers, recent_blockhash)
            .await?;
        tracker.signed();

        let signature = transaction.signatures.first().copied().ok_or_else(|| {
            self.abort(
                SubmitStage::Compile,
                SubmitError::Compile("message has no signers".to_string()),
            )
        })?;
        let reported = self
            .rpc
            .send_transaction(&transaction, self.config.skip_preflight)
            .await
            .map_err(|e| self.abort(SubmitStage::Broadcast, SubmitError::BroadcastFailed(e)))?;
        if reported != signature {
            self.sink.emit(SubmitEvent::SignatureMismatch {
                signature,
                reported,
            });
        }
        tracker.broadcast();
        self.sink.emit(SubmitEvent::Broadcast { signature });

        self.confirm(&transaction, signature, &recent_blockhash, tracker)
            .await
    }

    /// Compile the message and collect every signature
    async fn build_and_sign(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
        recent_blockhash: Hash,
    ) -> Result<VersionedTransaction, SubmitError> {
        let payer = self.wallet.pubkey();
        let message = v0::Message::try_compile(&payer, instructions, &[], recent_blockhash)
            .map_err(|e| self.abort(SubmitStage::Compile, SubmitError::Compile(e.to_string())))?;

        let mut transaction = unsigned_transaction(VersionedMessage::V0(message));
        for signer in extra_signers {
            partial_sign(&mut transaction, *signer)
                .map_err(|e| self.abort(SubmitStage::Sign, SubmitError::SignFailed(e)))?;
        }

        self.wallet
            .sign_transaction(transaction)
            .await
            .map_err(|e| self.abort(SubmitStage::Sign, SubmitError::SignFailed(e)))
    }

    /// Poll until the tracker reaches a terminal state
    async fn confirm(
        &self,
        transaction: &VersionedTransaction,
        signature: Signature,
        recent_blockhash: &Hash,
        mut tracker: ConfirmationTracker,
    ) -> Result<Signature, SubmitError> {
        while tracker.should_poll() {
            self.scheduler.sleep(self.config.poll_interval).await;

            let status = match self.rpc.get_signature_status(&signature).await {
                Ok(status) => status,
                Err(error) => {
                    self.rpc_failure("getSignatureStatus", error);
                    None
                }
            };
            self.sink.emit(SubmitEvent::Polled {
                signature,
                attempt: tracker.attempts() + 1,
                status: status.clone(),
            });

            let decision = match tracker.record_status(status) {
                PollDecision::CheckBlockhash => {
                    let valid = match self.rpc.is_blockhash_valid(recent_blockhash).await {
                        Ok(valid) => Some(valid),
                        Err(error) => {
                            self.rpc_failure("isBlockhashValid", error);
                            None
                        }
                    };
                    if valid == Some(false) {
                        self.sink.emit(SubmitEvent::BlockhashInvalid {
                            signature,
                            strikes: tracker.expiry_strikes() + 1,
                        });
                    }
                    tracker.record_blockhash_validity(valid)
                }
                decision => decision,
            };

            match decision {
                PollDecision::Continue | PollDecision::CheckBlockhash => {}
                PollDecision::Confirmed => {
                    self.sink.emit(SubmitEvent::Confirmed {
                        signature,
                        attempts: tracker.attempts(),
                    });
                    return Ok(signature);
                }
                PollDecision::ExecutionFailed(error) => {
                    let diagnostic = self.diagnose(transaction).await;
                    self.sink.emit(SubmitEvent::ExecutionFailed {
                        signature,
                        error: error.clone(),
                        diagnostic: diagnostic.clone(),
                    });
                    return Err(SubmitError::ExecutionFailed {
                        signature,
                        error,
                        diagnostic,
                    });
                }
                PollDecision::Expired => {
                    self.sink.emit(SubmitEvent::Expired {
                        signature,
                        attempts: tracker.attempts(),
                    });
                    return Err(SubmitError::Expired { signature });
                }
                PollDecision::TimedOut => break,
            }
        }

        self.sink.emit(SubmitEvent::TimedOut {
            signature,
            attempts: tracker.attempts(),
        });
        Err(SubmitError::TimedOut {
            signature,
            attempts: tracker.attempts(),
        })
    }

    /// Re-simulate a failed transaction for its logs; never changes the outcome
    async fn diagnose(&self, transaction: &VersionedTransaction) -> Option<SimulationDiagnostic> {
        if !self.config.simulate_on_failure {
            return None;
        }
        match self.rpc.simulate_transaction(transaction).await {
            Ok(diagnostic) => Some(diagnostic),
            Err(error) => {
                self.rpc_failure("simulateTransaction", error);
                None
            }
        }
    }

    /// Report a failure that ends the submission before broadcast
    fn abort(&self, stage: SubmitStage, error: SubmitError) -> SubmitError {
        self.sink.emit(SubmitEvent::Aborted {
            stage,
            error: error.clone(),
        });
        error
    }

    fn rpc_failure(&self, operation: &'static str, error: RpcError) {
        self.sink.emit(SubmitEvent::RpcFailure { operation, error });
    }
}
