//! Client configuration loaded from the environment

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use solana_pubkey::Pubkey;

use crate::constants::programs::{MUSHI_PROGRAM_ID, STAKE_VAULT_PROGRAM_ID};
use crate::constants::DEFAULT_RPC_URL;
use crate::errors::{ClientError, ClientResult};
use crate::submit::SubmitConfig;

/// Runtime configuration of the stake vault client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rpc_url: String,
    /// Solana CLI JSON keypair of the paying wallet
    pub keypair_path: PathBuf,
    pub program_id: Pubkey,
    pub mushi_program_id: Pubkey,
    /// Required by `initialize` only
    pub mushi_token_mint: Option<Pubkey>,
    /// Required by `initialize` only
    pub eclipse_token_mint: Option<Pubkey>,
    pub submit: SubmitConfig,
}

impl Config {
    /// Load from the process environment, reading a `.env` file first if present
    pub fn from_env() -> ClientResult<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rpc_url = var("RPC_URL")
            .or_else(|| var("ANCHOR_PROVIDER_URL"))
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let keypair_path = match var("KEYPAIR_PATH").or_else(|| var("ANCHOR_WALLET")) {
            Some(path) => PathBuf::from(path),
            None => default_keypair_path()?,
        };

        let program_id = parse_pubkey(&var, "PROGRAM_ID")?.unwrap_or(STAKE_VAULT_PROGRAM_ID);
        let mushi_program_id = parse_pubkey(&var, "MUSHI_PROGRAM_ID")?.unwrap_or(MUSHI_PROGRAM_ID);
        let mushi_token_mint = parse_pubkey(&var, "MUSHI_TOKEN_MINT")?;
        let eclipse_token_mint = parse_pubkey(&var, "ECLIPSE_TOKEN_MINT")?;

        let mut submit = SubmitConfig::default();
        if let Some(ms) = parse_number(&var, "POLL_INTERVAL_MS")? {
            submit.poll_interval = Duration::from_millis(ms);
        }
        if let Some(attempts) = parse_number(&var, "MAX_POLL_ATTEMPTS")? {
            if attempts == 0 {
                return Err(ClientError::Config(
                    "MAX_POLL_ATTEMPTS must be at least 1".to_string(),
                ));
            }
            submit.max_attempts = u32::try_from(attempts).map_err(|_| {
                ClientError::Config(format!("MAX_POLL_ATTEMPTS is too large: {}", attempts))
            })?;
        }

        Ok(Self {
            rpc_url,
            keypair_path,
            program_id,
            mushi_program_id,
            mushi_token_mint,
            eclipse_token_mint,
            submit,
        })
    }
}

fn default_keypair_path() -> ClientResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("solana").join("id.json"))
        .ok_or_else(|| {
            ClientError::Config("KEYPAIR_PATH is not set and no home directory was found".to_string())
        })
}

fn parse_pubkey<F>(var: &F, key: &str) -> ClientResult<Option<Pubkey>>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| {
            Pubkey::from_str(value.trim())
                .map_err(|e| ClientError::Config(format!("{} is not a valid address: {}", key, e)))
        })
        .transpose()
}

fn parse_number<F>(var: &F, key: &str) -> ClientResult<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|e| ClientError::Config(format!("{} is not a number: {}", key, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("KEYPAIR_PATH", "/tmp/id.json")])).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.keypair_path, PathBuf::from("/tmp/id.json"));
        assert_eq!(config.program_id, STAKE_VAULT_PROGRAM_ID);
        assert_eq!(config.mushi_program_id, MUSHI_PROGRAM_ID);
        assert_eq!(config.mushi_token_mint, None);
        assert_eq!(config.submit, SubmitConfig::default());
    }

    #[test]
    fn test_anchor_fallbacks() {
        let config = Config::from_lookup(lookup(&[
            ("ANCHOR_PROVIDER_URL", "https://api.devnet.solana.com"),
            ("ANCHOR_WALLET", "/home/dev/wallet.json"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.keypair_path, PathBuf::from("/home/dev/wallet.json"));

        let config = Config::from_lookup(lookup(&[
            ("RPC_URL", "http://127.0.0.1:8899"),
            ("ANCHOR_PROVIDER_URL", "https://api.devnet.solana.com"),
            ("KEYPAIR_PATH", "/tmp/id.json"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
    }

    #[test]
    fn test_overrides() {
        let mint = Pubkey::new_unique();
        let mint_str = mint.to_string();
        let config = Config::from_lookup(lookup(&[
            ("KEYPAIR_PATH", "/tmp/id.json"),
            ("MUSHI_TOKEN_MINT", mint_str.as_str()),
            ("POLL_INTERVAL_MS", "250"),
            ("MAX_POLL_ATTEMPTS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.mushi_token_mint, Some(mint));
        assert_eq!(config.submit.poll_interval, Duration::from_millis(250));
        assert_eq!(config.submit.max_attempts, 10);
        assert!(config.submit.skip_preflight);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("PROGRAM_ID", "not-a-key"),
            ("POLL_INTERVAL_MS", "two seconds"),
            ("MAX_POLL_ATTEMPTS", "0"),
            ("MAX_POLL_ATTEMPTS", "99999999999"),
        ];
        for (key, value) in cases {
            let result = Config::from_lookup(lookup(&[("KEYPAIR_PATH", "/tmp/id.json"), (key, value)]));
            assert!(
                matches!(result, Err(ClientError::Config(_))),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[
            ("KEYPAIR_PATH", "/tmp/id.json"),
            ("RPC_URL", "  "),
            ("ECLIPSE_TOKEN_MINT", ""),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.eclipse_token_mint, None);
    }
}
