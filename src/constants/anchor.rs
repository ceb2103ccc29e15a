//! Anchor-specific constants

/// Namespace hashed with an instruction name to form its discriminator
pub const INSTRUCTION_NAMESPACE: &str = "global";

/// Namespace hashed with an account type name to form its discriminator
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Length of an Anchor discriminator in bytes
pub const DISCRIMINATOR_LENGTH: usize = 8;

/// First custom error code emitted by Anchor programs
pub const CUSTOM_ERROR_OFFSET: u32 = 6000;

/// Custom errors declared by the stake vault program, in declaration order
pub const STAKE_VAULT_ERRORS: &[(&str, &str)] = &[
    ("InsufficientMushiTokenAmount", "Insufficient mushi token amount"),
    ("InsufficientEclipseTokenAmount", "Insufficient eclipse token amount"),
    ("InsufficientStakeTokenAmount", "Insufficient stake token amount"),
    ("UnauthorizedProgramCall", "Unauthorized program call"),
    ("UnauthorizedAdminAction", "Only admin can perform this action"),
];

/// Look up the name and message of a stake vault custom error code
pub fn stake_vault_error(code: u32) -> Option<(&'static str, &'static str)> {
    let index = code.checked_sub(CUSTOM_ERROR_OFFSET)?;
    STAKE_VAULT_ERRORS.get(index as usize).copied()
}
