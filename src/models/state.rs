//! On-chain account layouts read by the client

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Serialize, Serializer};
use solana_pubkey::Pubkey;

use crate::constants::anchor::DISCRIMINATOR_LENGTH;
use crate::errors::{ClientError, ClientResult};
use crate::utils::hash::account_discriminator;
use crate::utils::to_ui_amount;

/// Snapshot of the vault's main state account.
///
/// A pure projection of remote state: it is fetched fresh on every query and
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainStateInfo {
    /// Vault administrator
    #[serde(serialize_with = "as_base58")]
    pub admin: Pubkey,
    /// Mushi tokens held by the vault (raw units)
    pub mushi_token_amount: u64,
    /// Eclipse tokens held by the vault (raw units)
    pub eclipse_token_amount: u64,
    /// Stake tokens minted to stakers (raw units)
    pub staking_token_total_supply: u64,
    #[serde(serialize_with = "as_base58")]
    pub mushi_token_mint: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub eclipse_token_mint: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub stake_token_mint: Pubkey,
}

impl MainStateInfo {
    /// Anchor account type name
    pub const ACCOUNT_NAME: &'static str = "MainState";

    /// Decode raw account data (discriminator followed by Borsh fields).
    ///
    /// Bytes past the known fields are ignored; the account is allocated
    /// larger than the struct.
    pub fn decode(address: &Pubkey, data: &[u8]) -> ClientResult<Self> {
        let read_failed = |reason: String| ClientError::ReadFailed {
            address: *address,
            reason,
        };

        if data.len() < DISCRIMINATOR_LENGTH {
            return Err(read_failed(format!(
                "account data is {} bytes, shorter than the discriminator",
                data.len()
            )));
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LENGTH);
        if discriminator != account_discriminator(Self::ACCOUNT_NAME) {
            return Err(read_failed(format!(
                "discriminator mismatch, not a {} account",
                Self::ACCOUNT_NAME
            )));
        }

        Self::deserialize(&mut body).map_err(|e| read_failed(e.to_string()))
    }

    /// Encode into account data as the program stores it
    pub fn to_account_data(&self) -> std::io::Result<Vec<u8>> {
        let mut data = account_discriminator(Self::ACCOUNT_NAME).to_vec();
        borsh::to_writer(&mut data, self)?;
        Ok(data)
    }

    pub fn mushi_token_ui_amount(&self) -> f64 {
        to_ui_amount(self.mushi_token_amount)
    }

    pub fn eclipse_token_ui_amount(&self) -> f64 {
        to_ui_amount(self.eclipse_token_amount)
    }

    pub fn staking_token_ui_supply(&self) -> f64 {
        to_ui_amount(self.staking_token_total_supply)
    }
}

fn as_base58<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}
