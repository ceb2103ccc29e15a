//! Hashing utilities

use sha2::{Digest, Sha256};

use crate::constants::anchor::{ACCOUNT_NAMESPACE, DISCRIMINATOR_LENGTH, INSTRUCTION_NAMESPACE};

/// Generate an Anchor discriminator for `name` within `namespace`
pub fn generate_anchor_discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    let preimage = format!("{}:{}", namespace, name);
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    let hash = hasher.finalize();

    let mut result = [0u8; DISCRIMINATOR_LENGTH];
    result.copy_from_slice(&hash[..DISCRIMINATOR_LENGTH]);
    result
}

/// Discriminator prefixed to the data of the `name` instruction (snake case)
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    generate_anchor_discriminator(INSTRUCTION_NAMESPACE, name)
}

/// Discriminator stored at the start of `name` accounts (type name)
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    generate_anchor_discriminator(ACCOUNT_NAMESPACE, name)
}
