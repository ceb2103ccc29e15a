//! A client library for the Mushi stake vault program
//!
//! This crate derives the vault's program addresses, encodes its
//! instructions, and submits them through a send-and-confirm loop that
//! reports a typed outcome for every way a transaction can fail.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod rpc;
pub mod submit;
pub mod utils;
pub mod vault;
pub mod wallet;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;

pub use crate::config::Config;
pub use crate::errors::{ClientError, ClientResult, SubmitError};
pub use crate::models::MainStateInfo;
pub use crate::submit::{SubmitConfig, TransactionSubmitter};
pub use crate::vault::StakeVault;

/// Connect a [`StakeVault`] to the node and wallet named by `config`
pub fn connect(config: &Config) -> ClientResult<StakeVault> {
    let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
    let wallet = wallet::KeypairWallet::from_file(&config.keypair_path)?;

    let submitter = TransactionSubmitter::new(Arc::new(rpc), Arc::new(wallet))
        .with_config(config.submit.clone());

    Ok(StakeVault::new(submitter, config.program_id))
}

/// Version of the stake vault client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
