//! Per-submission state machine
//!
//! `Built -> Signed -> Broadcast -> {Confirmed | ExecutionFailed | Expired | TimedOut}`.
//! The tracker performs no I/O. The submitter reports what the node said after
//! every poll and the tracker decides whether to keep waiting.

use solana_transaction_error::TransactionError;

use super::SubmitConfig;
use crate::rpc::SignatureStatus;

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Built,
    Signed,
    Broadcast,
    Confirmed,
    ExecutionFailed,
    Expired,
    TimedOut,
}

impl SubmissionState {
    /// Whether no further transition can happen
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::ExecutionFailed | Self::Expired | Self::TimedOut
        )
    }
}

/// What to do after a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollDecision {
    /// Sleep and poll again
    Continue,
    /// No status yet; ask whether the blockhash is still valid
    CheckBlockhash,
    Confirmed,
    ExecutionFailed(TransactionError),
    Expired,
    TimedOut,
}

/// Drives a submission from build to a terminal state
#[derive(Debug, Clone)]
pub struct ConfirmationTracker {
    state: SubmissionState,
    attempts: u32,
    expiry_strikes: u32,
    max_attempts: u32,
    expiry_threshold: u32,
}

impl ConfirmationTracker {
    pub fn new(config: &SubmitConfig) -> Self {
        Self {
            state: SubmissionState::Built,
            attempts: 0,
            expiry_strikes: 0,
            max_attempts: config.max_attempts,
            expiry_threshold: config.expiry_threshold,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Status polls performed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Invalid-blockhash observations so far
    pub fn expiry_strikes(&self) -> u32 {
        self.expiry_strikes
    }

    /// All signatures are in place
    pub fn signed(&mut self) {
        debug_assert_eq!(self.state, SubmissionState::Built);
        self.state = SubmissionState::Signed;
    }

    /// The node accepted the transaction
    pub fn broadcast(&mut self) {
        debug_assert_eq!(self.state, SubmissionState::Signed);
        self.state = SubmissionState::Broadcast;
    }

    /// Whether another poll is allowed
    pub fn should_poll(&self) -> bool {
        self.state == SubmissionState::Broadcast && self.attempts < self.max_attempts
    }

    /// Record the outcome of one status poll.
    ///
    /// A status call that failed is reported as `None`, same as "not seen yet".
    pub fn record_status(&mut self, status: SignatureStatus) -> PollDecision {
        self.attempts += 1;
        match status {
            Some(Ok(())) => {
                self.state = SubmissionState::Confirmed;
                PollDecision::Confirmed
            }
            Some(Err(error)) => {
                self.state = SubmissionState::ExecutionFailed;
                PollDecision::ExecutionFailed(error)
            }
            None => PollDecision::CheckBlockhash,
        }
    }

    /// Record the blockhash validity check that follows an empty status.
    ///
    /// `None` means the check itself failed and is not counted as a strike.
    pub fn record_blockhash_validity(&mut self, valid: Option<bool>) -> PollDecision {
        if valid == Some(false) {
            self.expiry_strikes += 1;
        }
        if self.expiry_strikes >= self.expiry_threshold {
            self.state = SubmissionState::Expired;
            return PollDecision::Expired;
        }
        if self.attempts >= self.max_attempts {
            self.state = SubmissionState::TimedOut;
            return PollDecision::TimedOut;
        }
        PollDecision::Continue
    }
}
