//! Deterministic address derivation

use solana_pubkey::Pubkey;

use crate::constants::programs::{ASSOCIATED_TOKEN_PROGRAM_ID, MPL_TOKEN_METADATA_PROGRAM_ID};
use crate::constants::{MAIN_STATE_SEED, METADATA_SEED, VAULT_OWNER_SEED};

/// Main state PDA of the stake vault program
pub fn main_state_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[MAIN_STATE_SEED], program_id).0
}

/// PDA that owns the vault token accounts
pub fn vault_owner_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_OWNER_SEED], program_id).0
}

/// Associated token account of `owner` for `mint` under `token_program`.
///
/// Off-curve owners (PDAs) are allowed, matching how the vault accounts are created.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

/// Metaplex metadata account of `mint`
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            MPL_TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &MPL_TOKEN_METADATA_PROGRAM_ID,
    )
    .0
}
