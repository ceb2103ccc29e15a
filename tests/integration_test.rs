use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mushi_stake_client::errors::{RpcError, SubmitError};
use mushi_stake_client::rpc::{NodeRpc, SignatureStatus, SimulationDiagnostic};
use mushi_stake_client::submit::{Scheduler, SubmitConfig, TransactionSubmitter};
use mushi_stake_client::utils::address::main_state_address;
use mushi_stake_client::vault::StakeVault;
use mushi_stake_client::wallet::KeypairWallet;
use mushi_stake_client::{ClientError, MainStateInfo};
use solana_account::Account;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::versioned::VersionedTransaction;
use tempfile::tempdir;

/// In-memory node that confirms a transaction once it has been polled
/// `confirm_after` times.
struct LocalNode {
    confirm_after: u32,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    polls: Mutex<HashMap<Signature, u32>>,
    sent: Mutex<Vec<VersionedTransaction>>,
}

impl LocalNode {
    fn new(confirm_after: u32) -> Self {
        Self {
            confirm_after,
            accounts: Mutex::new(HashMap::new()),
            polls: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NodeRpc for LocalNode {
    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(Hash::new_from_array([1u8; 32]))
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        _skip_preflight: bool,
    ) -> Result<Signature, RpcError> {
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn get_signature_status(&self, signature: &Signature) -> Result<SignatureStatus, RpcError> {
        if !self
            .sent
            .lock()
            .unwrap()
            .iter()
            .any(|tx| tx.signatures[0] == *signature)
        {
            return Ok(None);
        }
        let mut polls = self.polls.lock().unwrap();
        let count = polls.entry(*signature).or_insert(0);
        *count += 1;
        Ok((*count >= self.confirm_after).then_some(Ok(())))
    }

    async fn is_blockhash_valid(&self, _blockhash: &Hash) -> Result<bool, RpcError> {
        Ok(true)
    }

    async fn simulate_transaction(
        &self,
        _transaction: &VersionedTransaction,
    ) -> Result<SimulationDiagnostic, RpcError> {
        Ok(SimulationDiagnostic::default())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }
}

/// Scheduler that returns immediately
struct Immediate;

#[async_trait]
impl Scheduler for Immediate {
    async fn sleep(&self, _duration: Duration) {}
}

fn wallet_from_file() -> (KeypairWallet, Pubkey) {
    let keypair = Keypair::new();
    let dir = tempdir().unwrap();
    let path = dir.path().join("id.json");
    std::fs::write(&path, format!("{:?}", keypair.to_bytes().to_vec())).unwrap();
    (KeypairWallet::from_file(&path).unwrap(), keypair.pubkey())
}

fn vault(node: Arc<LocalNode>, config: SubmitConfig) -> (StakeVault, Pubkey, Pubkey) {
    let (wallet, payer) = wallet_from_file();
    let program_id = Pubkey::new_unique();
    let submitter = TransactionSubmitter::new(node, Arc::new(wallet))
        .with_scheduler(Arc::new(Immediate))
        .with_config(config);
    (StakeVault::new(submitter, program_id), program_id, payer)
}

#[tokio::test]
async fn test_stake_then_read_state() {
    let node = Arc::new(LocalNode::new(3));
    let (vault, program_id, payer) = vault(node.clone(), SubmitConfig::default());

    let state = MainStateInfo {
        admin: payer,
        mushi_token_amount: 0,
        eclipse_token_amount: 0,
        staking_token_total_supply: 0,
        mushi_token_mint: Pubkey::new_unique(),
        eclipse_token_mint: Pubkey::new_unique(),
        stake_token_mint: Pubkey::new_unique(),
    };
    let mut data = state.to_account_data().unwrap();
    data.resize(data.len() + 128, 0);
    node.accounts.lock().unwrap().insert(
        main_state_address(&program_id),
        Account {
            lamports: 2_000_000,
            data,
            owner: program_id,
            executable: false,
            rent_epoch: 0,
        },
    );

    let signature = vault.stake("12").await.unwrap();

    let sent = node.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].signatures[0], signature);
    assert_eq!(node.polls.lock().unwrap()[&signature], 3);
    assert_eq!(vault.get_main_state().await.unwrap(), state);
}

#[tokio::test]
async fn test_timeout_respects_configured_attempts() {
    let node = Arc::new(LocalNode::new(u32::MAX));
    let config = SubmitConfig {
        max_attempts: 5,
        ..SubmitConfig::default()
    };
    let (vault, _, _) = vault(node.clone(), config);

    let result = vault.update_pool(Pubkey::new_unique()).await;

    match result {
        Err(ClientError::Submit(SubmitError::TimedOut {
            signature,
            attempts,
        })) => {
            assert_eq!(attempts, 5);
            assert_eq!(node.polls.lock().unwrap()[&signature], 5);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_state_blocks_stake() {
    let node = Arc::new(LocalNode::new(1));
    let (vault, _, _) = vault(node.clone(), SubmitConfig::default());

    let result = vault.stake("1").await;

    assert!(matches!(result, Err(ClientError::AccountNotFound(_))));
    assert!(node.sent.lock().unwrap().is_empty());
}
