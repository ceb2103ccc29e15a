//! Instruction encoding for the stake vault program
//!
//! Every operation declares a fixed argument struct and a fixed account
//! struct whose field order matches the program's account list. Instruction
//! data is the Anchor discriminator of the instruction name followed by the
//! Borsh-encoded arguments.

use borsh::BorshSerialize;
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::constants::programs::{
    ASSOCIATED_TOKEN_PROGRAM_ID, MPL_TOKEN_METADATA_PROGRAM_ID, SYSTEM_PROGRAM_ID,
    SYSVAR_INSTRUCTIONS_ID, SYSVAR_RENT_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::errors::{ClientError, ClientResult};
use crate::models::state::MainStateInfo;
use crate::utils::address::{
    associated_token_address, main_state_address, metadata_address, vault_owner_address,
};
use crate::utils::hash::instruction_discriminator;

/// Arguments of `initialize`
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct InitializeArgs {
    pub stake_token_name: String,
    pub stake_token_symbol: String,
    pub stake_token_uri: String,
    /// Program allowed to invoke stake/unstake
    pub mushi_program: Pubkey,
}

/// Arguments of `stake`
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct StakeArgs {
    /// Raw token amount
    pub amount: u64,
}

/// Arguments of `unstake`
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct UnstakeArgs {
    /// Raw token amount
    pub amount: u64,
}

/// Arguments of `update_pool`
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct UpdatePoolArgs {
    pub mushi_program: Pubkey,
}

/// Accounts of `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeAccounts {
    pub admin: Pubkey,
    pub main_state: Pubkey,
    pub mushi_token_mint: Pubkey,
    pub eclipse_token_mint: Pubkey,
    /// Freshly generated mint; signs the transaction
    pub stake_token_mint: Pubkey,
    pub stake_token_metadata_account: Pubkey,
    pub token_vault_owner: Pubkey,
    pub mushi_token_vault: Pubkey,
    pub eclipse_token_vault: Pubkey,
    pub stake_token_vault: Pubkey,
}

impl InitializeAccounts {
    /// Derive every program-owned address from the program id and the mints
    pub fn derive(
        program_id: &Pubkey,
        admin: Pubkey,
        mushi_token_mint: Pubkey,
        eclipse_token_mint: Pubkey,
        stake_token_mint: Pubkey,
    ) -> Self {
        let token_vault_owner = vault_owner_address(program_id);
        Self {
            admin,
            main_state: main_state_address(program_id),
            mushi_token_mint,
            eclipse_token_mint,
            stake_token_mint,
            stake_token_metadata_account: metadata_address(&stake_token_mint),
            token_vault_owner,
            mushi_token_vault: associated_token_address(
                &token_vault_owner,
                &mushi_token_mint,
                &TOKEN_PROGRAM_ID,
            ),
            eclipse_token_vault: associated_token_address(
                &token_vault_owner,
                &eclipse_token_mint,
                &TOKEN_2022_PROGRAM_ID,
            ),
            stake_token_vault: associated_token_address(
                &token_vault_owner,
                &stake_token_mint,
                &TOKEN_PROGRAM_ID,
            ),
        }
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.main_state, false),
            AccountMeta::new(self.mushi_token_mint, false),
            AccountMeta::new(self.eclipse_token_mint, false),
            AccountMeta::new(self.stake_token_mint, true),
            AccountMeta::new(self.stake_token_metadata_account, false),
            AccountMeta::new(self.token_vault_owner, false),
            AccountMeta::new(self.mushi_token_vault, false),
            AccountMeta::new(self.eclipse_token_vault, false),
            AccountMeta::new(self.stake_token_vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(MPL_TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSVAR_RENT_ID, false),
        ]
    }
}

/// Accounts of `stake`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeAccounts {
    pub user: Pubkey,
    pub main_state: Pubkey,
    pub user_mushi_token_ata: Pubkey,
    pub user_stake_token_ata: Pubkey,
    pub mushi_token_vault: Pubkey,
    pub mushi_token_mint: Pubkey,
    pub eclipse_token_vault: Pubkey,
    pub eclipse_token_mint: Pubkey,
    pub stake_token_mint: Pubkey,
    pub token_vault_owner: Pubkey,
}

impl StakeAccounts {
    /// Derive the user and vault accounts from a fresh main state snapshot
    pub fn derive(program_id: &Pubkey, user: Pubkey, state: &MainStateInfo) -> Self {
        let token_vault_owner = vault_owner_address(program_id);
        Self {
            user,
            main_state: main_state_address(program_id),
            user_mushi_token_ata: associated_token_address(
                &user,
                &state.mushi_token_mint,
                &TOKEN_PROGRAM_ID,
            ),
            user_stake_token_ata: associated_token_address(
                &user,
                &state.stake_token_mint,
                &TOKEN_PROGRAM_ID,
            ),
            mushi_token_vault: associated_token_address(
                &token_vault_owner,
                &state.mushi_token_mint,
                &TOKEN_PROGRAM_ID,
            ),
            mushi_token_mint: state.mushi_token_mint,
            eclipse_token_vault: associated_token_address(
                &token_vault_owner,
                &state.eclipse_token_mint,
                &TOKEN_2022_PROGRAM_ID,
            ),
            eclipse_token_mint: state.eclipse_token_mint,
            stake_token_mint: state.stake_token_mint,
            token_vault_owner,
        }
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.main_state, false),
            AccountMeta::new_readonly(SYSVAR_INSTRUCTIONS_ID, false),
            AccountMeta::new(self.user_mushi_token_ata, false),
            AccountMeta::new(self.user_stake_token_ata, false),
            AccountMeta::new(self.mushi_token_vault, false),
            AccountMeta::new(self.mushi_token_mint, false),
            AccountMeta::new(self.eclipse_token_vault, false),
            AccountMeta::new(self.eclipse_token_mint, false),
            AccountMeta::new(self.stake_token_mint, false),
            AccountMeta::new(self.token_vault_owner, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }
}

/// Accounts of `unstake`.
///
/// Unstaking moves the eclipse tokens to a vault owned by the mushi program,
/// so on top of the stake accounts it needs that vault and its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstakeAccounts {
    pub stake: StakeAccounts,
    pub eclipse_token_mushi_program_vault: Pubkey,
    pub mushi_program_token_vault_owner: Pubkey,
}

impl UnstakeAccounts {
    /// Derive the accounts, taking the mushi program's vault owner from the caller.
    ///
    /// The program only checks the vault's authority, so `eclipse_vault`
    /// overrides the owner's Token-2022 associated token account when set.
    pub fn derive(
        program_id: &Pubkey,
        user: Pubkey,
        state: &MainStateInfo,
        mushi_program_token_vault_owner: Pubkey,
        eclipse_vault: Option<Pubkey>,
    ) -> Self {
        let eclipse_token_mushi_program_vault = eclipse_vault.unwrap_or_else(|| {
            associated_token_address(
                &mushi_program_token_vault_owner,
                &state.eclipse_token_mint,
                &TOKEN_2022_PROGRAM_ID,
            )
        });
        Self {
            stake: StakeAccounts::derive(program_id, user, state),
            eclipse_token_mushi_program_vault,
            mushi_program_token_vault_owner,
        }
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let s = &self.stake;
        vec![
            AccountMeta::new(s.user, true),
            AccountMeta::new(s.main_state, false),
            AccountMeta::new_readonly(SYSVAR_INSTRUCTIONS_ID, false),
            AccountMeta::new(s.user_mushi_token_ata, false),
            AccountMeta::new(s.user_stake_token_ata, false),
            AccountMeta::new(s.mushi_token_vault, false),
            AccountMeta::new(s.mushi_token_mint, false),
            AccountMeta::new(s.eclipse_token_vault, false),
            AccountMeta::new(self.eclipse_token_mushi_program_vault, false),
            AccountMeta::new(s.eclipse_token_mint, false),
            AccountMeta::new(s.stake_token_mint, false),
            AccountMeta::new(s.token_vault_owner, false),
            AccountMeta::new(self.mushi_program_token_vault_owner, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }
}

/// Accounts of `update_pool`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePoolAccounts {
    pub admin: Pubkey,
    pub main_state: Pubkey,
}

impl UpdatePoolAccounts {
    pub fn derive(program_id: &Pubkey, admin: Pubkey) -> Self {
        Self {
            admin,
            main_state: main_state_address(program_id),
        }
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.main_state, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }
}

/// Build an instruction from its name, arguments and accounts
fn build<A: BorshSerialize>(
    program_id: &Pubkey,
    name: &'static str,
    args: &A,
    accounts: Vec<AccountMeta>,
) -> ClientResult<Instruction> {
    let mut data = instruction_discriminator(name).to_vec();
    borsh::to_writer(&mut data, args).map_err(|e| ClientError::Encode {
        instruction: name,
        reason: e.to_string(),
    })?;

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

pub fn initialize(
    program_id: &Pubkey,
    accounts: &InitializeAccounts,
    args: &InitializeArgs,
) -> ClientResult<Instruction> {
    build(program_id, "initialize", args, accounts.to_account_metas())
}

pub fn stake(
    program_id: &Pubkey,
    accounts: &StakeAccounts,
    args: &StakeArgs,
) -> ClientResult<Instruction> {
    build(program_id, "stake", args, accounts.to_account_metas())
}

pub fn unstake(
    program_id: &Pubkey,
    accounts: &UnstakeAccounts,
    args: &UnstakeArgs,
) -> ClientResult<Instruction> {
    build(program_id, "unstake", args, accounts.to_account_metas())
}

pub fn update_pool(
    program_id: &Pubkey,
    accounts: &UpdatePoolAccounts,
    args: &UpdatePoolArgs,
) -> ClientResult<Instruction> {
    build(program_id, "update_pool", args, accounts.to_account_metas())
}
