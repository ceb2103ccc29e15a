//! High-level stake vault client
//!
//! [`StakeVault`] ties the instruction encoder to the submitter: each
//! operation derives its accounts, encodes one instruction and submits it
//! through the shared [`TransactionSubmitter`].


use log::{debug, info};
use solana_instruction::error::InstructionError;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction_error::TransactionError;

use crate::constants::anchor::stake_vault_error;
use crate::constants::programs::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::errors::{ClientError, ClientResult, SubmitError};
use crate::models::instruction;
use crate::models::{
    InitializeAccounts, InitializeArgs, MainStateInfo, StakeAccounts, StakeArgs, UnstakeAccounts,
    UnstakeArgs, UpdatePoolAccounts, UpdatePoolArgs,
};
use crate::submit::TransactionSubmitter;
use crate::utils::address::main_state_address;
use crate::utils::to_raw_amount;

/// Metadata of the stake token created by `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Result of a successful `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeOutcome {
    pub signature: Signature,
    /// Address of the freshly created stake token mint
    pub stake_token_mint: Pubkey,
}

/// Client for one deployment of the stake vault program
pub struct StakeVault {
    submitter: TransactionSubmitter,
    program_id: Pubkey,
}

impl StakeVault {
    pub fn new(submitter: TransactionSubmitter, program_id: Pubkey) -> Self {
        Self {
            submitter,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn submitter(&self) -> &TransactionSubmitter {
        &self.submitter
    }

    /// Wallet paying for and signing every operation
    pub fn payer(&self) -> Pubkey {
        self.submitter.wallet().pubkey()
    }

    /// Fetch and decode the main state account.
    ///
    /// Always reads from the node; nothing is cached between calls.
    pub async fn get_main_state(&self) -> ClientResult<MainStateInfo> {
        let address = main_state_address(&self.program_id);
        debug!("Reading main state {}", address);

        let account = self
            .submitter
            .rpc()
            .get_account(&address)
            .await?
            .ok_or(ClientError::AccountNotFound(address))?;

        MainStateInfo::decode(&address, &account.data)
    }

    /// Create the vault, its token vaults and a new stake token mint.
    ///
    /// The mushi mint must belong to the SPL Token program and the eclipse
    /// mint to Token-2022.
    pub async fn initialize(
        &self,
        metadata: StakeTokenMetadata,
        mushi_program: Pubkey,
        mushi_token_mint: Pubkey,
        eclipse_token_mint: Pubkey,
    ) -> ClientResult<InitializeOutcome> {
        self.check_mint_owner(&mushi_token_mint, &TOKEN_PROGRAM_ID)
            .await?;
        self.check_mint_owner(&eclipse_token_mint, &TOKEN_2022_PROGRAM_ID)
            .await?;

        let stake_token_mint = Keypair::new();
        let accounts = InitializeAccounts::derive(
            &self.program_id,
            self.payer(),
            mushi_token_mint,
            eclipse_token_mint,
            stake_token_mint.pubkey(),
        );
        let args = InitializeArgs {
            stake_token_name: metadata.name,
            stake_token_symbol: metadata.symbol,
            stake_token_uri: metadata.uri,
            mushi_program,
        };
        let ix = instruction::initialize(&self.program_id, &accounts, &args)?;

        info!(
            "Initializing vault {} with stake token mint {}",
            accounts.main_state, accounts.stake_token_mint
        );
        let signature = self.submitter.submit(&[ix], &[&stake_token_mint]).await?;

        Ok(InitializeOutcome {
            signature,
            stake_token_mint: stake_token_mint.pubkey(),
        })
    }

    /// Stake `amount` mushi tokens, given as a decimal UI amount (9 decimals)
    pub async fn stake(&self, amount: &str) -> ClientResult<Signature> {
        let amount = to_raw_amount(amount)?;
        let state = self.get_main_state().await?;

        let accounts = StakeAccounts::derive(&self.program_id, self.payer(), &state);
        let ix = instruction::stake(&self.program_id, &accounts, &StakeArgs { amount })?;

        info!("Staking {} raw units from {}", amount, accounts.user);
        Ok(self.submitter.submit(&[ix], &[]).await?)
    }

    /// Unstake `amount` stake tokens, given as a decimal UI amount (9 decimals).
    ///
    /// `mushi_program_vault_owner` is the authority of the mushi program's
    /// eclipse token vault receiving the eclipse share. That vault defaults to
    /// the owner's Token-2022 associated token account unless `eclipse_vault`
    /// names another one.
    pub async fn unstake(
        &self,
        amount: &str,
        mushi_program_vault_owner: Pubkey,
        eclipse_vault: Option<Pubkey>,
    ) -> ClientResult<Signature> {
        let amount = to_raw_amount(amount)?;
        let state = self.get_main_state().await?;

        let accounts = UnstakeAccounts::derive(
            &self.program_id,
            self.payer(),
            &state,
            mushi_program_vault_owner,
            eclipse_vault,
        );
        let ix = instruction::unstake(&self.program_id, &accounts, &UnstakeArgs { amount })?;

        info!("Unstaking {} raw units to {}", amount, accounts.stake.user);
        Ok(self.submitter.submit(&[ix], &[]).await?)
    }

    /// Point the vault at a new mushi program (admin only)
    pub async fn update_pool(&self, mushi_program: Pubkey) -> ClientResult<Signature> {
        let accounts = UpdatePoolAccounts::derive(&self.program_id, self.payer());
        let ix = instruction::update_pool(
            &self.program_id,
            &accounts,
            &UpdatePoolArgs { mushi_program },
        )?;

        info!("Updating pool to mushi program {}", mushi_program);
        Ok(self.submitter.submit(&[ix], &[]).await?)
    }

    async fn check_mint_owner(&self, mint: &Pubkey, expected: &Pubkey) -> ClientResult<()> {
        let account = self
            .submitter
            .rpc()
            .get_account(mint)
            .await?
            .ok_or(ClientError::AccountNotFound(*mint))?;

        if account.owner != *expected {
            return Err(ClientError::InvalidMint {
                mint: *mint,
                expected: *expected,
                actual: account.owner,
            });
        }
        Ok(())
    }
}

/// Name and message of the stake vault error behind a failed submission, if any
pub fn program_error(error: &ClientError) -> Option<(&'static str, &'static str)> {
    match error {
        ClientError::Submit(SubmitError::ExecutionFailed {
            error: TransactionError::InstructionError(_, InstructionError::Custom(code)),
            ..
        }) => stake_vault_error(*code),
        _ => None,
    }
}
