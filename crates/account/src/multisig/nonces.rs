use alloy_primitives::{Address, B256, I256, U256};
use alloy_sol_types::SolCall;
use tracing::trace;

use super::{AvocadoMultisig, AvocadoMultisigError, IAvocadoMultisig, self_action};
use crate::{
    constants::MAX_OCCUPY_NONCES,
    error::Result,
    storage::slots::{AVO_NONCE, NON_SEQUENTIAL_NONCES},
};

use IAvocadoMultisig::Action;

/// Replay protection selected by a cast's signed `avoNonce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NonceMode {
    /// Consumes the sequential nonce, which currently holds this value.
    Sequential(U256),
    /// Consumes the cast digest as a non-sequential nonce.
    NonSequential(B256),
}

impl AvocadoMultisig<'_> {
    pub fn avo_nonce(&mut self) -> Result<U256> {
        self.read(AVO_NONCE)
    }

    pub fn non_sequential_nonce_used(&mut self, nonce: B256) -> Result<bool> {
        self.read(NON_SEQUENTIAL_NONCES.at(nonce))
    }

    /// Checks `avo_nonce` against the stored nonce state without consuming it.
    ///
    /// `-1` selects the non-sequential space keyed by `digest`. Any other value must match the
    /// current sequential nonce.
    pub(crate) fn validate_nonce(&mut self, avo_nonce: I256, digest: B256) -> Result<NonceMode> {
        if avo_nonce == I256::MINUS_ONE {
            if self.non_sequential_nonce_used(digest)? {
                return Err(AvocadoMultisigError::invalid_params().into());
            }
            return Ok(NonceMode::NonSequential(digest));
        }

        if avo_nonce.is_negative() {
            return Err(AvocadoMultisigError::invalid_params().into());
        }
        let current = self.avo_nonce()?;
        if avo_nonce.into_raw() != current {
            return Err(AvocadoMultisigError::invalid_params().into());
        }
        Ok(NonceMode::Sequential(current))
    }

    pub(crate) fn consume_nonce(&mut self, mode: NonceMode) -> Result<()> {
        match mode {
            NonceMode::Sequential(current) => {
                trace!(account = %self.address, nonce = %current, "sequential nonce consumed");
                self.write(AVO_NONCE, current + U256::from(1))
            }
            NonceMode::NonSequential(digest) => {
                trace!(account = %self.address, %digest, "non-sequential nonce consumed");
                self.write(NON_SEQUENTIAL_NONCES.at(digest), true)
            }
        }
    }

    /// Skips sequential nonces so casts signed for them can never execute.
    ///
    /// Values below the current nonce are ignored. Every other value must be the next nonce,
    /// so the input has to be ascending and gap-free from the current nonce on.
    pub fn occupy_avo_nonces(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::occupyAvoNoncesCall,
    ) -> Result<()> {
        self.check_self(sender)?;
        if call.avoNonces.is_empty() || call.avoNonces.len() > MAX_OCCUPY_NONCES {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        let mut next = self.avo_nonce()?;
        for nonce in call.avoNonces {
            if nonce < next {
                continue;
            }
            if nonce != next {
                return Err(AvocadoMultisigError::invalid_params().into());
            }
            self.emit(IAvocadoMultisig::AvoNonceOccupied {
                occupiedAvoNonce: nonce,
            })?;
            next += U256::from(1);
        }

        trace!(account = %self.address, nonce = %next, "avo nonces occupied");
        self.write(AVO_NONCE, next)
    }

    /// Marks arbitrary non-sequential nonces as used.
    pub fn occupy_non_sequential_nonces(
        &mut self,
        sender: Address,
        call: IAvocadoMultisig::occupyNonSequentialNoncesCall,
    ) -> Result<()> {
        self.check_self(sender)?;
        if call.nonSequentialNonces.is_empty() {
            return Err(AvocadoMultisigError::invalid_params().into());
        }

        for nonce in call.nonSequentialNonces {
            self.write(NON_SEQUENTIAL_NONCES.at(nonce), true)?;
            self.emit(IAvocadoMultisig::NonSequentialNonceOccupied {
                occupiedNonSequentialNonce: nonce,
            })?;
        }
        Ok(())
    }
}

/// Builds a self-call action occupying sequential nonces. At most five per action.
pub fn occupy_avo_nonces_action(
    account: Address,
    nonces: Vec<U256>,
) -> std::result::Result<Action, AvocadoMultisigError> {
    if nonces.is_empty() || nonces.len() > MAX_OCCUPY_NONCES {
        return Err(AvocadoMultisigError::invalid_params());
    }
    Ok(self_action(
        account,
        IAvocadoMultisig::occupyAvoNoncesCall { avoNonces: nonces }
            .abi_encode()
            .into(),
    ))
}

/// Builds a self-call action occupying non-sequential nonces. At most five per action.
pub fn occupy_non_sequential_nonces_action(
    account: Address,
    nonces: Vec<B256>,
) -> std::result::Result<Action, AvocadoMultisigError> {
    if nonces.is_empty() || nonces.len() > MAX_OCCUPY_NONCES {
        return Err(AvocadoMultisigError::invalid_params());
    }
    Ok(self_action(
        account,
        IAvocadoMultisig::occupyNonSequentialNoncesCall {
            nonSequentialNonces: nonces,
        }
        .abi_encode()
        .into(),
    ))
}
