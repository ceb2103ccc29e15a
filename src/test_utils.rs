//! Scripted collaborators shared by the unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solana_account::Account;
use solana_hash::Hash;
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

use crate::errors::{RpcError, WalletError};
use crate::rpc::{NodeRpc, SignatureStatus, SimulationDiagnostic};
use crate::submit::{DiagnosticSink, Scheduler, SubmitConfig, SubmitEvent, TransactionSubmitter};
use crate::wallet::{KeypairWallet, Wallet};

/// Number of calls made to each node operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeCalls {
    pub latest_blockhash: u32,
    pub send: u32,
    pub signature_status: u32,
    pub blockhash_valid: u32,
    pub simulate: u32,
    pub get_account: u32,
}

/// Node whose answers are scripted per call.
///
/// Once a script runs dry, statuses default to "not seen" and the blockhash
/// stays valid.
pub struct ScriptedNode {
    pub blockhash: Hash,
    pub blockhash_error: Option<RpcError>,
    pub send_error: Option<RpcError>,
    /// Signature returned by `send_transaction` instead of the transaction's own
    pub reported_signature: Option<Signature>,
    pub statuses: Mutex<VecDeque<Result<SignatureStatus, RpcError>>>,
    pub validity: Mutex<VecDeque<Result<bool, RpcError>>>,
    pub simulation: Result<SimulationDiagnostic, RpcError>,
    pub accounts: Mutex<HashMap<Pubkey, Account>>,
    pub sent: Mutex<Vec<(VersionedTransaction, bool)>>,
    pub calls: Mutex<NodeCalls>,
}

impl ScriptedNode {
    pub fn new() -> Self {
        Self {
            blockhash: Hash::new_from_array([9u8; 32]),
            blockhash_error: None,
            send_error: None,
            reported_signature: None,
            statuses: Mutex::new(VecDeque::new()),
            validity: Mutex::new(VecDeque::new()),
            simulation: Ok(SimulationDiagnostic {
                error: Some("custom program error: 0x1770".to_string()),
                logs: vec!["Program log: AnchorError".to_string()],
                units_consumed: Some(4_200),
            }),
            accounts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            calls: Mutex::new(NodeCalls::default()),
        }
    }

    pub fn with_statuses(self, statuses: Vec<Result<SignatureStatus, RpcError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_validity(self, validity: Vec<Result<bool, RpcError>>) -> Self {
        *self.validity.lock().unwrap() = validity.into();
        self
    }

    pub fn with_account(self, address: Pubkey, account: Account) -> Self {
        self.accounts.lock().unwrap().insert(address, account);
        self
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub fn calls(&self) -> NodeCalls {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(VersionedTransaction, bool)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeRpc for ScriptedNode {
    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        self.calls.lock().unwrap().latest_blockhash += 1;
        match &self.blockhash_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.blockhash),
        }
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature, RpcError> {
        self.calls.lock().unwrap().send += 1;
        if let Some(error) = &self.send_error {
            return Err(error.clone());
        }
        self.sent
            .lock()
            .unwrap()
            .push((transaction.clone(), skip_preflight));
        Ok(self
            .reported_signature
            .unwrap_or(transaction.signatures[0]))
    }

    async fn get_signature_status(&self, _signature: &Signature) -> Result<SignatureStatus, RpcError> {
        self.calls.lock().unwrap().signature_status += 1;
        self.statuses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn is_blockhash_valid(&self, _blockhash: &Hash) -> Result<bool, RpcError> {
        self.calls.lock().unwrap().blockhash_valid += 1;
        self.validity.lock().unwrap().pop_front().unwrap_or(Ok(true))
    }

    async fn simulate_transaction(
        &self,
        _transaction: &VersionedTransaction,
    ) -> Result<SimulationDiagnostic, RpcError> {
        self.calls.lock().unwrap().simulate += 1;
        self.simulation.clone()
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        self.calls.lock().unwrap().get_account += 1;
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }
}

/// Scheduler that records requested delays instead of sleeping
#[derive(Default)]
pub struct RecordingScheduler {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingScheduler {
    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Sink keeping every event in memory
#[derive(Default)]
pub struct MemorySink {
    pub events: Mutex<Vec<SubmitEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<SubmitEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: SubmitEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Wallet that refuses every signing request
pub struct RejectingWallet {
    pub pubkey: Pubkey,
}

#[async_trait]
impl Wallet for RejectingWallet {
    fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    async fn sign_transaction(
        &self,
        _transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, WalletError> {
        Err(WalletError::Rejected("user declined".to_string()))
    }
}

/// Submitter wired to scripted collaborators
pub struct Harness {
    pub node: Arc<ScriptedNode>,
    pub scheduler: Arc<RecordingScheduler>,
    pub sink: Arc<MemorySink>,
    pub payer: Pubkey,
    pub submitter: TransactionSubmitter,
}

impl Harness {
    pub fn new(node: ScriptedNode) -> Self {
        let keypair = Keypair::new();
        let payer = solana_signer::Signer::pubkey(&keypair);
        Self::with_wallet(node, Arc::new(KeypairWallet::new(keypair)), payer)
    }

    pub fn with_wallet(node: ScriptedNode, wallet: Arc<dyn Wallet>, payer: Pubkey) -> Self {
        let node = Arc::new(node);
        let scheduler = Arc::new(RecordingScheduler::default());
        let sink = Arc::new(MemorySink::default());
        let submitter = TransactionSubmitter::new(node.clone(), wallet)
            .with_scheduler(scheduler.clone())
            .with_sink(sink.clone())
            .with_config(SubmitConfig::default());
        Self {
            node,
            scheduler,
            sink,
            payer,
            submitter,
        }
    }

    /// One instruction signed only by the payer
    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: Pubkey::new_unique(),
            accounts: vec![AccountMeta::new(self.payer, true)],
            data: vec![0, 1, 2, 3],
        }
    }
}
