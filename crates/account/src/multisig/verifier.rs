use alloy_primitives::{Address, B256, Signature, U256};
use avocado_contracts::{ERC1271_MAGIC_VALUE, IERC1271};
use tracing::trace;

use super::{AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig::SignatureParams};
use crate::{constants::ECRECOVER_GAS, error::Result};

/// Recovers the EOA that signed `digest`.
///
/// Accepts 65-byte `r . s . v` signatures and 64-byte EIP-2098 compact signatures. High-s
/// signatures are rejected so every signature has a single valid encoding.
pub fn recover_signer(digest: B256, signature: &[u8]) -> Option<Address> {
    let signature = match signature.len() {
        65 => Signature::from_raw(signature).ok()?,
        64 => Signature::from_erc2098(signature),
        _ => return None,
    };
    if signature.normalize_s().is_some() {
        return None;
    }
    signature.recover_address_from_prehash(&digest).ok()
}

impl AvocadoMultisig<'_> {
    /// Verifies a signature bundle over `digest` and returns the signers.
    ///
    /// Entries must be strictly ascending by signer and every signer must currently be one of
    /// the account's signers. Contract signers are checked through ERC-1271, all others through
    /// ECDSA recovery.
    pub(crate) fn verify_signatures(
        &mut self,
        digest: B256,
        signatures: &[SignatureParams],
    ) -> Result<Vec<Address>> {
        let required = self.required_signers()?.max(1) as usize;
        if signatures.len() < required {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        let allowed = self.signers()?;
        let mut signers = Vec::with_capacity(signatures.len());
        let mut previous = Address::ZERO;
        for entry in signatures {
            if entry.signer <= previous || allowed.binary_search(&entry.signer).is_err() {
                return Err(AvocadoMultisigError::invalid_signature().into());
            }
            if !self.is_valid_signature(digest, entry)? {
                return Err(AvocadoMultisigError::invalid_signature().into());
            }
            previous = entry.signer;
            signers.push(entry.signer);
        }

        trace!(account = %self.address, %digest, signers = signers.len(), "signatures verified");
        Ok(signers)
    }

    fn is_valid_signature(&mut self, digest: B256, entry: &SignatureParams) -> Result<bool> {
        if self.host.is_contract(entry.signer)? {
            let gas = self.host.gas_left();
            let query = IERC1271::isValidSignatureCall {
                hash: digest,
                signature: entry.signature.clone(),
            };
            let magic = self.static_query(entry.signer, &query, gas)?;
            return Ok(magic == Some(ERC1271_MAGIC_VALUE));
        }

        self.host.deduct_gas(ECRECOVER_GAS)?;
        Ok(recover_signer(digest, &entry.signature) == Some(entry.signer))
    }

    /// Checks the inclusive `[valid_after, valid_until]` window. Zero leaves a side open.
    pub(crate) fn validate_timing(&self, valid_after: U256, valid_until: U256) -> Result<()> {
        let now = self.host.timestamp();
        if valid_after > now || (!valid_until.is_zero() && valid_until < now) {
            return Err(AvocadoMultisigError::invalid_timing().into());
        }
        Ok(())
    }
}
