//! Constants used throughout the client

pub mod anchor;
pub mod programs;

use std::time::Duration;

/// Seed of the program-owned main state account
pub const MAIN_STATE_SEED: &[u8] = b"main_state";

/// Seed of the program-owned authority holding the token vaults
pub const VAULT_OWNER_SEED: &[u8] = b"vault_owner";

/// Seed prefix of Metaplex metadata accounts
pub const METADATA_SEED: &[u8] = b"metadata";

/// Decimals shared by the mushi, eclipse and stake tokens
pub const TOKEN_DECIMALS: u8 = 9;

/// Raw units per whole token
pub const TOKEN_DECIMALS_HELPER: u64 = 10u64.pow(TOKEN_DECIMALS as u32);

/// Delay between two signature status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Signature status polls before giving up
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 50;

/// Invalid-blockhash observations that mark a transaction as expired
pub const DEFAULT_EXPIRY_THRESHOLD: u32 = 2;

/// Default JSON-RPC endpoint (local validator)
pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";
