//! [`NodeRpc`] over the Solana nonblocking RPC client

use async_trait::async_trait;
use log::debug;
use solana_account::Account;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig};
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

use super::{NodeRpc, SignatureStatus, SimulationDiagnostic};
use crate::errors::RpcError;

#[async_trait]
impl NodeRpc for RpcClient {
    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<Signature, RpcError> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            ..RpcSendTransactionConfig::default()
        };
        Ok(self.send_transaction_with_config(transaction, config).await?)
    }

    async fn get_signature_status(&self, signature: &Signature) -> Result<SignatureStatus, RpcError> {
        Ok(RpcClient::get_signature_status(self, signature).await?)
    }

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, RpcError> {
        Ok(RpcClient::is_blockhash_valid(self, blockhash, self.commitment()).await?)
    }

    async fn simulate_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<SimulationDiagnostic, RpcError> {
        let config = RpcSimulateTransactionConfig {
            sig_verify: false,
            replace_recent_blockhash: true,
            commitment: Some(self.commitment()),
            ..RpcSimulateTransactionConfig::default()
        };
        let response = self
            .simulate_transaction_with_config(transaction, config)
            .await?;
        debug!("Simulation evaluated at slot {}", response.context.slot);

        let value = response.value;
        Ok(SimulationDiagnostic {
            error: value.err.map(|err| format!("{:?}", err)),
            logs: value.logs.unwrap_or_default(),
            units_consumed: value.units_consumed,
        })
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }
}
