//! Signing capability used to authorize submissions

use std::path::Path;

use async_trait::async_trait;
use solana_keypair::{read_keypair_file, Keypair};
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::versioned::VersionedTransaction;

use crate::errors::{ClientError, ClientResult, WalletError};

/// Primary wallet paying for and signing every submission
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Fee payer identity
    fn pubkey(&self) -> Pubkey;

    /// Add the wallet's signature to `transaction`, keeping signatures already present
    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, WalletError>;
}

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    /// Wrap an in-memory keypair
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Load a keypair from a Solana CLI JSON keypair file
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let keypair = read_keypair_file(path)
            .map_err(|e| ClientError::Wallet(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        mut transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, WalletError> {
        partial_sign(&mut transaction, &self.keypair)?;
        Ok(transaction)
    }
}

/// Unsigned transaction with one default signature slot per required signer
pub fn unsigned_transaction(message: solana_message::VersionedMessage) -> VersionedTransaction {
    let required = usize::from(message.header().num_required_signatures);
    VersionedTransaction {
        signatures: vec![Default::default(); required],
        message,
    }
}

/// Sign `transaction` with `signer`, filling only the signer's own slot
pub fn partial_sign<S: Signer + ?Sized>(
    transaction: &mut VersionedTransaction,
    signer: &S,
) -> Result<(), WalletError> {
    let pubkey = signer.pubkey();
    let required = usize::from(transaction.message.header().num_required_signatures);
    let position = transaction
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == pubkey)
        .ok_or(WalletError::NotASigner(pubkey))?;

    let signature = signer
        .try_sign_message(&transaction.message.serialize())
        .map_err(|e| WalletError::Signer(e.to_string()))?;

    if transaction.signatures.len() < required {
        transaction.signatures.resize(required, Default::default());
    }
    transaction.signatures[position] = signature;
    Ok(())
}
